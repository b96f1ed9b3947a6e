//! vfs-shell - Entry Point
//!
//! An interactive shell over a persisted virtual-filesystem namespace.

use log::info;
use std::process;

use vfs_shell::config::ShellConfig;
use vfs_shell::error::handlers::handle_error;
use vfs_shell::error::ShellError;
use vfs_shell::Shell;

#[tokio::main]
async fn main() {
    // Initialize the logger (env_logger picks up RUST_LOG environment variable)
    env_logger::init();

    info!("Launching shell...");

    if let Err(e) = run().await {
        handle_error(&e);
        process::exit(1);
    }
}

async fn run() -> Result<(), ShellError> {
    let config = ShellConfig::load()?;
    let mut shell = Shell::new(config);
    shell.run().await
}
