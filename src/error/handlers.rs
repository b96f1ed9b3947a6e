//! Error handlers
//!
//! Maps engine errors to log output and to the fixed user-facing
//! message lines printed by the command handlers.

use log::error;

use crate::error::types::{SessionError, ShellError, StoreError};

/// Handle a shell error
pub fn handle_error(err: &ShellError) {
    error!("Shell error: {}", err);
}

/// Convert a session error to the line shown to the user.
///
/// These strings are part of the observable command surface and stay
/// stable independently of the `Display` impls used for logging.
pub fn user_message(err: &SessionError) -> String {
    match err {
        SessionError::PermissionDenied(_) => "Permission denied.".to_string(),
        SessionError::DirectoryNotFound(_) => "Directory does not exist.".to_string(),
        SessionError::InvalidUsername(_) => "Invalid username.".to_string(),
        SessionError::Store(StoreError::EntryExists(_)) => "Directory already exists.".to_string(),
        SessionError::Store(StoreError::EntryNotFound(_)) => {
            "File or directory does not exist.".to_string()
        }
        SessionError::Store(StoreError::UserExists(_)) => "User already exists.".to_string(),
        SessionError::Store(StoreError::Snapshot(e)) => {
            format!("Failed to save filesystem: {}", e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages_are_fixed_strings() {
        let err = SessionError::PermissionDenied("/x".to_string());
        assert_eq!(user_message(&err), "Permission denied.");

        let err = SessionError::Store(StoreError::EntryExists("/etc".to_string()));
        assert_eq!(user_message(&err), "Directory already exists.");

        let err = SessionError::Store(StoreError::EntryNotFound("/gone".to_string()));
        assert_eq!(user_message(&err), "File or directory does not exist.");
    }
}
