use serde::Serialize;
use std::path::PathBuf;

/// Machine-readable outcome of a managed-block write.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApplyResult {
    pub entries_added: usize,
    pub entries_removed: usize,
    pub final_entry_count: usize,
    /// `false` when the file already matched and nothing was written.
    pub changed: bool,
    pub backup_created: bool,
    pub backup_path: Option<PathBuf>,
    pub repaired_duplicates: bool,
    pub migrated_legacy_markers: bool,
}
