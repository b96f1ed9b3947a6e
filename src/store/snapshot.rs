//! Snapshot codec
//!
//! On-disk form of the namespace: one JSON object holding the path table,
//! the host identity, and the user registry. Consumed whole on load,
//! replaced whole on save.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use crate::error::SnapshotError;

/// Owner set stored at a namespace path. Maps owner username to an
/// always-empty record, reserved for future per-owner metadata.
pub type DirectoryEntry = BTreeMap<String, OwnerRecord>;

/// Serializes as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OwnerRecord {}

/// Serialized snapshot. Every field is optional on the wire: a snapshot
/// missing a key falls back to that key's default at load time, so a
/// hand-edited or truncated-but-parsable file still loads.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub root: Option<BTreeMap<String, DirectoryEntry>>,
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(default)]
    pub users: Option<Vec<String>>,
}

/// Reads and parses the snapshot file.
pub fn read(path: &Path) -> Result<Snapshot, SnapshotError> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Serializes the snapshot and overwrites the file wholesale.
///
/// No temp-file-and-rename: a crash mid-write can corrupt the file, which
/// the self-healing load path then treats as a first run.
pub fn write(path: &Path, snapshot: &Snapshot) -> io::Result<()> {
    let text = serde_json::to_string(snapshot)?;
    fs::write(path, text)
}
