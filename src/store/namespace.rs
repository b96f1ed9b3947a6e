//! Namespace store implementation
//!
//! Durable source of truth for the path table, the user registry, and the
//! host identity. The namespace is a flat lookup table keyed by absolute
//! path string; parent/child structure exists only in the path strings
//! themselves, and the session layer keeps it coherent on creation.

use log::{info, warn};
use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;

use crate::config::ShellConfig;
use crate::error::StoreError;
use crate::store::snapshot::{self, DirectoryEntry, OwnerRecord, Snapshot};

pub struct NamespaceStore {
    root: BTreeMap<String, DirectoryEntry>,
    hostname: String,
    users: HashSet<String>,
    superuser: String,
    snapshot_path: PathBuf,
}

impl NamespaceStore {
    /// Loads the namespace from the snapshot file named by `config`.
    ///
    /// Never fails the caller: a missing or malformed snapshot is treated
    /// as a first run. The namespace falls back to its defaults and the
    /// initial snapshot is written back immediately.
    pub fn load(config: &ShellConfig) -> Self {
        let path = PathBuf::from(&config.snapshot_path);
        match snapshot::read(&path) {
            Ok(snap) => {
                let store = Self::from_snapshot(snap, config, path);
                info!(
                    "Loaded namespace: {} entries, {} users, hostname {:?}",
                    store.root.len(),
                    store.users.len(),
                    store.hostname
                );
                store
            }
            Err(e) => {
                warn!(
                    "{} at {}; initializing fresh namespace",
                    e,
                    path.display()
                );
                let store = Self::from_snapshot(Snapshot::default(), config, path);
                if let Err(e) = store.save() {
                    warn!("Failed to write initial snapshot: {}", e);
                }
                store
            }
        }
    }

    /// Builds a store from a parsed snapshot, filling each missing key
    /// with its default. Two invariants are re-asserted no matter what the
    /// file contained: the superuser is a registered user, and `/` has an
    /// entry (owned by the superuser if it had to be created).
    fn from_snapshot(snap: Snapshot, config: &ShellConfig, snapshot_path: PathBuf) -> Self {
        let superuser = config.superuser.clone();

        let mut root = snap.root.unwrap_or_default();
        root.entry("/".to_string())
            .or_insert_with(|| BTreeMap::from([(superuser.clone(), OwnerRecord::default())]));

        let mut users: HashSet<String> = snap
            .users
            .map(|u| u.into_iter().collect())
            .unwrap_or_default();
        users.insert(superuser.clone());

        let hostname = snap
            .hostname
            .unwrap_or_else(|| config.default_hostname.clone());

        Self {
            root,
            hostname,
            users,
            superuser,
            snapshot_path,
        }
    }

    /// Serializes the namespace, host identity, and user registry to the
    /// snapshot file, overwriting it wholesale.
    pub fn save(&self) -> Result<(), StoreError> {
        let snap = Snapshot {
            root: Some(self.root.clone()),
            hostname: Some(self.hostname.clone()),
            users: Some(self.users.iter().cloned().collect()),
        };
        snapshot::write(&self.snapshot_path, &snap).map_err(StoreError::Snapshot)
    }

    pub fn entry_exists(&self, path: &str) -> bool {
        self.root.contains_key(path)
    }

    /// Owner usernames at `path`, in sorted order.
    pub fn entry_owners(&self, path: &str) -> Result<Vec<String>, StoreError> {
        self.root
            .get(path)
            .map(|entry| entry.keys().cloned().collect())
            .ok_or_else(|| StoreError::EntryNotFound(path.to_string()))
    }

    /// Inserts a new entry owned by `owner`. The namespace is unchanged if
    /// the path already has an entry.
    pub fn put_entry(&mut self, path: &str, owner: &str) -> Result<(), StoreError> {
        if self.root.contains_key(path) {
            return Err(StoreError::EntryExists(path.to_string()));
        }
        self.root.insert(
            path.to_string(),
            BTreeMap::from([(owner.to_string(), OwnerRecord::default())]),
        );
        info!("Created entry {} owned by {}", path, owner);
        Ok(())
    }

    /// Adds `owner` to an existing entry. Returns `Ok(false)` if they were
    /// already an owner.
    pub fn add_owner(&mut self, path: &str, owner: &str) -> Result<bool, StoreError> {
        let entry = self
            .root
            .get_mut(path)
            .ok_or_else(|| StoreError::EntryNotFound(path.to_string()))?;
        if entry.contains_key(owner) {
            return Ok(false);
        }
        entry.insert(owner.to_string(), OwnerRecord::default());
        info!("Added owner {} to {}", owner, path);
        Ok(true)
    }

    pub fn remove_entry(&mut self, path: &str) -> Result<(), StoreError> {
        match self.root.remove(path) {
            Some(_) => {
                info!("Removed entry {}", path);
                Ok(())
            }
            None => Err(StoreError::EntryNotFound(path.to_string())),
        }
    }

    /// Inserts a username into the registry. Role gating is the caller's
    /// job; this does not autosave.
    pub fn add_user(&mut self, username: &str) -> Result<(), StoreError> {
        if !self.users.insert(username.to_string()) {
            return Err(StoreError::UserExists(username.to_string()));
        }
        info!("Registered user {}", username);
        Ok(())
    }

    pub fn is_superuser(&self, username: &str) -> bool {
        username == self.superuser
    }

    pub fn superuser(&self) -> &str {
        &self.superuser
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// Overwrites the host identity and persists immediately — the one
    /// mutation that always triggers a save. Directory and user mutations
    /// stay in memory until an explicit `save()`.
    pub fn set_hostname(&mut self, name: &str) -> Result<(), StoreError> {
        self.hostname = name.to_string();
        self.save()
    }

    pub fn users(&self) -> &HashSet<String> {
        &self.users
    }
}
