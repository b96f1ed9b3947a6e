//! Command surface
//!
//! Parsing of input lines into the fixed command type and dispatch of each
//! variant to its session/store operation.

pub mod handlers;
pub mod parser;

pub use handlers::handle_command;
pub use parser::{parse_command, Command, CommandResult, CommandStatus};
