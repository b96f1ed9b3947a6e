//! Module `state`
//!
//! Defines the `Session` struct tracking the per-run user and working-path
//! context layered over the namespace store. Created at process start,
//! destroyed at process end; never persisted.

/// State of the active interactive session.
pub struct Session {
    current_user: String,
    current_virtual_path: String,
}

impl Session {
    /// Opens a session for `username` rooted at `/`.
    pub fn new(username: &str) -> Self {
        Self {
            current_user: username.to_string(),
            current_virtual_path: "/".to_string(),
        }
    }

    /// Returns the username this session acts as.
    pub fn current_user(&self) -> &str {
        &self.current_user
    }

    /// Returns the current working absolute path.
    pub fn current_virtual_path(&self) -> &str {
        &self.current_virtual_path
    }

    /// Sets the current working path. Callers are expected to have
    /// resolved and existence-checked the path first.
    pub fn set_current_virtual_path(&mut self, path: String) {
        self.current_virtual_path = path;
    }
}
