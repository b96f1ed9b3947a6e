use std::fs;

use tempfile::TempDir;

use vfs_shell::commands::{handle_command, parse_command, CommandStatus};
use vfs_shell::config::ShellConfig;
use vfs_shell::error::{SessionError, StoreError};
use vfs_shell::session::{operations, Session};
use vfs_shell::store::NamespaceStore;

// Helper to build a config pointing at a per-test snapshot file
fn test_config(dir: &TempDir) -> ShellConfig {
    ShellConfig {
        snapshot_path: dir
            .path()
            .join("filesystem.json")
            .to_string_lossy()
            .into_owned(),
        ..ShellConfig::default()
    }
}

fn superuser_session(store: &NamespaceStore) -> Session {
    Session::new(store.superuser())
}

#[test]
fn test_fresh_load_initializes_defaults() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);

    let store = NamespaceStore::load(&config);

    assert!(store.entry_exists("/"));
    assert_eq!(store.entry_owners("/").unwrap(), vec!["root".to_string()]);
    assert_eq!(store.hostname(), "default_hostname");
    assert!(store.users().contains("root"));
    assert_eq!(store.users().len(), 1);

    // The initial snapshot is written immediately and parses back.
    let text = fs::read_to_string(&config.snapshot_path).unwrap();
    assert!(text.contains("\"root\""));
    assert!(text.contains("default_hostname"));
}

#[test]
fn test_corrupt_snapshot_self_heals() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    fs::write(&config.snapshot_path, "{not json at all").unwrap();

    let store = NamespaceStore::load(&config);

    assert!(store.entry_exists("/"));
    assert_eq!(store.hostname(), "default_hostname");
    assert!(store.users().contains("root"));

    // The corrupt file was replaced by a valid initial snapshot.
    let reloaded = NamespaceStore::load(&config);
    assert!(reloaded.entry_exists("/"));
}

#[test]
fn test_partial_snapshot_falls_back_per_key() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    fs::write(&config.snapshot_path, r#"{"hostname": "kept"}"#).unwrap();

    let store = NamespaceStore::load(&config);

    assert_eq!(store.hostname(), "kept");
    assert!(store.entry_exists("/"));
    assert!(store.users().contains("root"));
}

#[test]
fn test_fresh_namespace_walkthrough() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    let mut store = NamespaceStore::load(&config);
    let mut session = superuser_session(&store);

    let created = operations::make_directory(&session, &mut store, "/etc").unwrap();
    assert_eq!(created, "/etc");
    assert!(store.entry_exists("/etc"));
    assert_eq!(store.entry_owners("/etc").unwrap(), vec!["root".to_string()]);

    operations::change_directory(&mut session, &store, "/etc").unwrap();
    assert_eq!(session.current_virtual_path(), "/etc");

    assert_eq!(
        operations::list_entries(&session, &store),
        vec!["root".to_string()]
    );

    operations::add_user(&session, &mut store, "alice", &config).unwrap();
    assert!(store.users().contains("alice"));

    let err = operations::add_user(&session, &mut store, "alice", &config).unwrap_err();
    assert!(matches!(err, SessionError::Store(StoreError::UserExists(_))));
}

#[test]
fn test_mkdir_backfills_ancestors() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    let mut store = NamespaceStore::load(&config);
    let session = superuser_session(&store);

    operations::make_directory(&session, &mut store, "/a/b/c").unwrap();

    for path in ["/a", "/a/b", "/a/b/c"] {
        assert!(store.entry_exists(path), "{path} should exist");
        assert_eq!(
            store.entry_owners(path).unwrap(),
            vec!["root".to_string()],
            "{path} should be owned by the creating user"
        );
    }
}

#[test]
fn test_mkdir_twice_reports_exists_without_change() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    let mut store = NamespaceStore::load(&config);
    let session = superuser_session(&store);

    operations::make_directory(&session, &mut store, "/etc").unwrap();
    let before = store.entry_owners("/etc").unwrap();

    let err = operations::make_directory(&session, &mut store, "/etc").unwrap_err();
    assert!(matches!(
        err,
        SessionError::Store(StoreError::EntryExists(_))
    ));
    assert_eq!(store.entry_owners("/etc").unwrap(), before);
}

#[test]
fn test_non_superuser_mkdir_denied() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    let mut store = NamespaceStore::load(&config);
    let root_session = superuser_session(&store);
    operations::add_user(&root_session, &mut store, "bob", &config).unwrap();

    // bob is registered but owns nothing.
    let bob_session = Session::new("bob");
    let err = operations::make_directory(&bob_session, &mut store, "/x").unwrap_err();
    assert!(matches!(err, SessionError::PermissionDenied(_)));
    assert!(!store.entry_exists("/x"));
}

#[test]
fn test_ownership_does_not_extend_to_new_paths() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    let mut store = NamespaceStore::load(&config);
    let root_session = superuser_session(&store);
    operations::add_user(&root_session, &mut store, "bob", &config).unwrap();

    // Hand bob an entry of his own.
    store.put_entry("/home", "bob").unwrap();
    let bob_session = Session::new("bob");
    assert!(operations::check_permission(&bob_session, &store, "/home"));

    // Ownership of /home does not extend to paths below it: a fresh path
    // has no entry, so the permission check denies non-superusers.
    let err = operations::make_directory(&bob_session, &mut store, "/home/new").unwrap_err();
    assert!(matches!(err, SessionError::PermissionDenied(_)));
    assert!(!store.entry_exists("/home/new"));
}

#[test]
fn test_removal_applies_no_permission_check() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    let mut store = NamespaceStore::load(&config);
    let root_session = superuser_session(&store);

    operations::make_directory(&root_session, &mut store, "/etc").unwrap();
    operations::add_user(&root_session, &mut store, "bob", &config).unwrap();

    // bob owns nothing, yet removal succeeds.
    let bob_session = Session::new("bob");
    let removed = operations::remove_entry(&bob_session, &mut store, "/etc").unwrap();
    assert_eq!(removed, "/etc");
    assert!(!store.entry_exists("/etc"));

    let err = operations::remove_entry(&bob_session, &mut store, "/etc").unwrap_err();
    assert!(matches!(
        err,
        SessionError::Store(StoreError::EntryNotFound(_))
    ));
}

#[test]
fn test_relative_navigation() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    let mut store = NamespaceStore::load(&config);
    let mut session = superuser_session(&store);

    operations::make_directory(&session, &mut store, "/a/b").unwrap();
    operations::change_directory(&mut session, &store, "/a").unwrap();

    operations::change_directory(&mut session, &store, "b").unwrap();
    assert_eq!(session.current_virtual_path(), "/a/b");

    operations::change_directory(&mut session, &store, "..").unwrap();
    assert_eq!(session.current_virtual_path(), "/a");

    let err = operations::change_directory(&mut session, &store, "missing").unwrap_err();
    assert!(matches!(err, SessionError::DirectoryNotFound(_)));
    assert_eq!(session.current_virtual_path(), "/a");
}

#[test]
fn test_save_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    let mut store = NamespaceStore::load(&config);
    let session = superuser_session(&store);

    operations::make_directory(&session, &mut store, "/etc/conf").unwrap();
    operations::add_user(&session, &mut store, "alice", &config).unwrap();
    store.set_hostname("roundtrip").unwrap();
    store.save().unwrap();

    let reloaded = NamespaceStore::load(&config);
    for path in ["/", "/etc", "/etc/conf"] {
        assert_eq!(
            reloaded.entry_owners(path).unwrap(),
            store.entry_owners(path).unwrap()
        );
    }
    assert_eq!(reloaded.hostname(), "roundtrip");
    assert_eq!(reloaded.users(), store.users());
}

#[test]
fn test_directory_mutations_require_explicit_save() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    let mut store = NamespaceStore::load(&config);
    let session = superuser_session(&store);

    operations::make_directory(&session, &mut store, "/etc").unwrap();

    // Not saved yet: a fresh process sees the pre-mutation snapshot.
    let stale = NamespaceStore::load(&config);
    assert!(!stale.entry_exists("/etc"));

    store.save().unwrap();
    let fresh = NamespaceStore::load(&config);
    assert!(fresh.entry_exists("/etc"));
}

#[test]
fn test_hostname_change_persists_immediately() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    let mut store = NamespaceStore::load(&config);

    operations::change_hostname(&mut store, "devbox").unwrap();

    // No explicit save: the hostname mutation persisted on its own.
    let reloaded = NamespaceStore::load(&config);
    assert_eq!(reloaded.hostname(), "devbox");
}

#[test]
fn test_adduser_denied_for_non_superuser() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    let mut store = NamespaceStore::load(&config);
    let root_session = superuser_session(&store);
    operations::add_user(&root_session, &mut store, "bob", &config).unwrap();

    let bob_session = Session::new("bob");
    let err = operations::add_user(&bob_session, &mut store, "eve", &config).unwrap_err();
    assert!(matches!(err, SessionError::PermissionDenied(_)));
    assert!(!store.users().contains("eve"));
}

#[test]
fn test_command_dispatch_flow() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    let mut store = NamespaceStore::load(&config);
    let mut session = superuser_session(&store);

    let dispatch = |session: &mut Session, store: &mut NamespaceStore, line: &str| {
        handle_command(session, store, &parse_command(line), &config)
    };

    let result = dispatch(&mut session, &mut store, "mkdir /etc");
    assert!(matches!(result.status, CommandStatus::Success));
    assert!(result.message.is_none());

    let result = dispatch(&mut session, &mut store, "cd /etc");
    assert!(matches!(result.status, CommandStatus::Success));

    let result = dispatch(&mut session, &mut store, "pwd");
    assert_eq!(result.message.as_deref(), Some("/etc"));

    let result = dispatch(&mut session, &mut store, "ls");
    assert_eq!(result.message.as_deref(), Some("root"));

    let result = dispatch(&mut session, &mut store, "adduser alice");
    assert_eq!(
        result.message.as_deref(),
        Some("User alice added successfully.")
    );

    let result = dispatch(&mut session, &mut store, "adduser alice");
    assert!(matches!(result.status, CommandStatus::Failure(_)));
    assert_eq!(result.message.as_deref(), Some("User already exists."));

    let result = dispatch(&mut session, &mut store, "rm /etc");
    assert_eq!(result.message.as_deref(), Some("/etc removed successfully."));

    let result = dispatch(&mut session, &mut store, "mkdir");
    assert_eq!(
        result.message.as_deref(),
        Some("Usage: mkdir <directory_path>")
    );

    let result = dispatch(&mut session, &mut store, "bogus");
    assert_eq!(
        result.message.as_deref(),
        Some("Command not found. Type 'help' for available commands.")
    );

    let result = dispatch(&mut session, &mut store, "exit");
    assert!(matches!(result.status, CommandStatus::CloseSession));
}
