//! Session operations
//!
//! The permission gate in front of the namespace store. Every operation
//! resolves its input path against the session's working directory, checks
//! what needs checking, and delegates the mutation to the store.

use log::info;

use crate::config::ShellConfig;
use crate::error::SessionError;
use crate::navigate::{ancestors, resolve_path};
use crate::session::Session;
use crate::store::NamespaceStore;

/// Whether the session's user may mutate `path`.
///
/// The superuser may always; anyone else only if they are among the
/// entry's owners. A path with no entry is a plain `false` for
/// non-superusers, not an error.
pub fn check_permission(session: &Session, store: &NamespaceStore, path: &str) -> bool {
    if store.is_superuser(session.current_user()) {
        return true;
    }
    match store.entry_owners(path) {
        Ok(owners) => owners.iter().any(|o| o == session.current_user()),
        Err(_) => false,
    }
}

/// Creates a directory entry at the resolved path, owned by the session's
/// user.
///
/// The namespace is a flat table keyed by full path, so ancestors of a
/// freshly created entry may have no record of their own. After the
/// insert, every ancestor up to but excluding `/` is reconciled, deepest
/// first: created owned by the current user if missing, or extended with
/// the current user as an owner if present without them. Reconciliation
/// runs even when the target itself already existed.
pub fn make_directory(
    session: &Session,
    store: &mut NamespaceStore,
    target_path: &str,
) -> Result<String, SessionError> {
    let path = resolve_path(session.current_virtual_path(), target_path);

    if !check_permission(session, store, &path) {
        return Err(SessionError::PermissionDenied(path));
    }

    let created = store.put_entry(&path, session.current_user());

    for ancestor in ancestors(&path) {
        if store.entry_exists(&ancestor) {
            let _ = store.add_owner(&ancestor, session.current_user());
        } else {
            let _ = store.put_entry(&ancestor, session.current_user());
        }
    }

    created.map(|_| path).map_err(SessionError::from)
}

/// Moves the session's working directory to the resolved path, which must
/// have an entry.
pub fn change_directory(
    session: &mut Session,
    store: &NamespaceStore,
    target_path: &str,
) -> Result<String, SessionError> {
    let path = resolve_path(session.current_virtual_path(), target_path);

    if !store.entry_exists(&path) {
        return Err(SessionError::DirectoryNotFound(path));
    }

    session.set_current_virtual_path(path.clone());
    Ok(path)
}

/// Owner usernames at the working directory, sorted. A working directory
/// with no entry lists as empty rather than failing.
pub fn list_entries(session: &Session, store: &NamespaceStore) -> Vec<String> {
    store
        .entry_owners(session.current_virtual_path())
        .unwrap_or_default()
}

/// Deletes the entry at the resolved path.
///
/// No ownership check is applied: any user may remove any entry, owners
/// or not. `mkdir` gates on ownership and `rm` does not.
pub fn remove_entry(
    session: &Session,
    store: &mut NamespaceStore,
    target_path: &str,
) -> Result<String, SessionError> {
    let path = resolve_path(session.current_virtual_path(), target_path);
    store.remove_entry(&path)?;
    Ok(path)
}

/// Registers a new user. Superuser only.
pub fn add_user(
    session: &Session,
    store: &mut NamespaceStore,
    username: &str,
    config: &ShellConfig,
) -> Result<(), SessionError> {
    if !store.is_superuser(session.current_user()) {
        return Err(SessionError::PermissionDenied(username.to_string()));
    }

    if !is_valid_username(username, config.max_username_length) {
        return Err(SessionError::InvalidUsername(username.to_string()));
    }

    store.add_user(username)?;
    Ok(())
}

/// Overwrites the host identity; persists immediately.
pub fn change_hostname(store: &mut NamespaceStore, name: &str) -> Result<(), SessionError> {
    store.set_hostname(name)?;
    info!("Hostname changed to {}", name);
    Ok(())
}

/// Basic input sanitation for usernames: non-empty, bounded, free of
/// control characters and path separators.
fn is_valid_username(username: &str, max_length: usize) -> bool {
    !username.trim().is_empty()
        && username.len() <= max_length
        && !username.contains(['\r', '\n', '\0', '/'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_username() {
        assert!(is_valid_username("alice", 32));
        assert!(!is_valid_username("", 32));
        assert!(!is_valid_username("   ", 32));
        assert!(!is_valid_username("a/b", 32));
        assert!(!is_valid_username("toolong", 4));
        assert!(!is_valid_username("a\nb", 32));
    }
}
