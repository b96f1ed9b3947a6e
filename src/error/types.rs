//! Error types
//!
//! Defines domain-specific error types for each module of the shell.

use std::fmt;
use std::io;

/// Snapshot codec errors. Internal to the store: `load()` recovers from
/// both variants by reinitializing, so they never reach a caller.
#[derive(Debug)]
pub enum SnapshotError {
    Io(io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::Io(e) => write!(f, "snapshot unreadable: {}", e),
            SnapshotError::Parse(e) => write!(f, "snapshot unparsable: {}", e),
        }
    }
}

impl std::error::Error for SnapshotError {}

impl From<io::Error> for SnapshotError {
    fn from(error: io::Error) -> Self {
        SnapshotError::Io(error)
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(error: serde_json::Error) -> Self {
        SnapshotError::Parse(error)
    }
}

/// Namespace store errors
#[derive(Debug)]
pub enum StoreError {
    EntryExists(String),
    EntryNotFound(String),
    UserExists(String),
    Snapshot(io::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::EntryExists(p) => write!(f, "Entry already exists: {}", p),
            StoreError::EntryNotFound(p) => write!(f, "Entry not found: {}", p),
            StoreError::UserExists(u) => write!(f, "User already exists: {}", u),
            StoreError::Snapshot(e) => write!(f, "Failed to write snapshot: {}", e),
        }
    }
}

impl std::error::Error for StoreError {}

/// Session errors
#[derive(Debug)]
pub enum SessionError {
    PermissionDenied(String),
    DirectoryNotFound(String),
    InvalidUsername(String),
    Store(StoreError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::PermissionDenied(p) => write!(f, "Permission denied: {}", p),
            SessionError::DirectoryNotFound(p) => write!(f, "Directory not found: {}", p),
            SessionError::InvalidUsername(u) => write!(f, "Invalid username: {}", u),
            SessionError::Store(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<StoreError> for SessionError {
    fn from(error: StoreError) -> Self {
        SessionError::Store(error)
    }
}

/// General shell error that encompasses all error types
#[derive(Debug)]
pub enum ShellError {
    Session(SessionError),
    Store(StoreError),
    Config(config::ConfigError),
    Io(io::Error),
}

impl fmt::Display for ShellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShellError::Session(e) => write!(f, "Session error: {}", e),
            ShellError::Store(e) => write!(f, "Store error: {}", e),
            ShellError::Config(e) => write!(f, "Configuration error: {}", e),
            ShellError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for ShellError {}

impl From<SessionError> for ShellError {
    fn from(error: SessionError) -> Self {
        ShellError::Session(error)
    }
}

impl From<StoreError> for ShellError {
    fn from(error: StoreError) -> Self {
        ShellError::Store(error)
    }
}

impl From<config::ConfigError> for ShellError {
    fn from(error: config::ConfigError) -> Self {
        ShellError::Config(error)
    }
}

impl From<io::Error> for ShellError {
    fn from(error: io::Error) -> Self {
        ShellError::Io(error)
    }
}
