//! Command handlers module for the shell.
//!
//! Defines one handler per command variant. Each handler maps its command
//! onto exactly one session/store operation and renders the user-facing
//! result; no namespace logic lives here.

use log::info;

use crate::commands::{Command, CommandResult, CommandStatus};
use crate::config::ShellConfig;
use crate::error::handlers::user_message;
use crate::error::SessionError;
use crate::session::{operations, Session};
use crate::store::NamespaceStore;

const HELP_TEXT: &str = "Available commands:\n\
    mkdir <directory_path>: Create a new directory.\n\
    cd <directory_path>: Change directory.\n\
    ls: List the owners of the current directory.\n\
    pwd: Print working directory.\n\
    adduser <username>: Add a new user.\n\
    host -e <new_hostname>: Change the hostname.\n\
    rm <file_path>: Remove a directory entry.\n\
    info: Display build information.\n\
    clear: Clear the screen.\n\
    help: Display this help message.\n\
    exit: Leave the shell.";

const CLEAR_SEQUENCE: &str = "\x1b[2J\x1b[1;1H";

/// Dispatches a parsed command to its handler.
pub fn handle_command(
    session: &mut Session,
    store: &mut NamespaceStore,
    command: &Command,
    config: &ShellConfig,
) -> CommandResult {
    match command {
        Command::Mkdir(path) => handle_cmd_mkdir(session, store, path),
        Command::Cd(path) => handle_cmd_cd(session, store, path),
        Command::Ls => handle_cmd_ls(session, store),
        Command::Pwd => handle_cmd_pwd(session),
        Command::Adduser(username) => handle_cmd_adduser(session, store, username, config),
        Command::Host(name) => handle_cmd_host(store, name),
        Command::Rm(path) => handle_cmd_rm(session, store, path),
        Command::Info => handle_cmd_info(),
        Command::Help => handle_cmd_help(),
        Command::Clear => handle_cmd_clear(),
        Command::Exit => handle_cmd_exit(),
        Command::Usage(usage) => handle_cmd_usage(usage),
        Command::Unknown(raw) => handle_cmd_unknown(raw),
    }
}

fn success(message: Option<String>) -> CommandResult {
    CommandResult {
        status: CommandStatus::Success,
        message,
    }
}

fn failure(err: &SessionError) -> CommandResult {
    let message = user_message(err);
    CommandResult {
        status: CommandStatus::Failure(message.clone()),
        message: Some(message),
    }
}

/// Handles `mkdir`: creates the resolved entry and back-fills ancestors.
/// Silent on success, like the rest of the mutating commands.
fn handle_cmd_mkdir(session: &Session, store: &mut NamespaceStore, path: &str) -> CommandResult {
    match operations::make_directory(session, store, path) {
        Ok(_) => success(None),
        Err(e) => failure(&e),
    }
}

/// Handles `cd`: moves the working directory to an existing entry.
fn handle_cmd_cd(session: &mut Session, store: &NamespaceStore, path: &str) -> CommandResult {
    match operations::change_directory(session, store, path) {
        Ok(_) => success(None),
        Err(e) => failure(&e),
    }
}

/// Handles `ls`: prints the owner usernames at the working directory.
/// A working directory with no entry lists as an empty line.
fn handle_cmd_ls(session: &Session, store: &NamespaceStore) -> CommandResult {
    let owners = operations::list_entries(session, store);
    success(Some(owners.join(" ")))
}

fn handle_cmd_pwd(session: &Session) -> CommandResult {
    success(Some(session.current_virtual_path().to_string()))
}

fn handle_cmd_adduser(
    session: &Session,
    store: &mut NamespaceStore,
    username: &str,
    config: &ShellConfig,
) -> CommandResult {
    match operations::add_user(session, store, username, config) {
        Ok(()) => success(Some(format!("User {} added successfully.", username))),
        Err(e) => failure(&e),
    }
}

fn handle_cmd_host(store: &mut NamespaceStore, name: &str) -> CommandResult {
    match operations::change_hostname(store, name) {
        Ok(()) => success(None),
        Err(e) => failure(&e),
    }
}

/// Handles `rm`: removes the resolved entry. Reports with the path as the
/// user typed it.
fn handle_cmd_rm(session: &Session, store: &mut NamespaceStore, path: &str) -> CommandResult {
    match operations::remove_entry(session, store, path) {
        Ok(_) => success(Some(format!("{} removed successfully.", path))),
        Err(e) => failure(&e),
    }
}

fn handle_cmd_info() -> CommandResult {
    success(Some(format!(
        "{} {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    )))
}

fn handle_cmd_help() -> CommandResult {
    success(Some(HELP_TEXT.to_string()))
}

fn handle_cmd_clear() -> CommandResult {
    success(Some(CLEAR_SEQUENCE.to_string()))
}

fn handle_cmd_exit() -> CommandResult {
    info!("Session exit requested");
    CommandResult {
        status: CommandStatus::CloseSession,
        message: None,
    }
}

fn handle_cmd_usage(usage: &'static str) -> CommandResult {
    CommandResult {
        status: CommandStatus::Failure(usage.to_string()),
        message: Some(usage.to_string()),
    }
}

fn handle_cmd_unknown(raw: &str) -> CommandResult {
    info!("Unknown command: {:?}", raw);
    let message = "Command not found. Type 'help' for available commands.".to_string();
    CommandResult {
        status: CommandStatus::Failure(message.clone()),
        message: Some(message),
    }
}
