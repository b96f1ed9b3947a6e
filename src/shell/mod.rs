//! Shell loop
//!
//! The interactive front end over the namespace engine.

pub mod core;

pub use core::Shell;
