use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

const BACKUP_EXTENSION: &str = "bak";
const TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%S%.3fZ";

/// A point-in-time copy of a hosts file taken before it was mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Backup {
    pub source: PathBuf,
    pub path: PathBuf,
    pub created_at: DateTime<Utc>,
}

impl Backup {
    /// `<backup_dir>/<source file name>.<timestamp>.bak`, with `backup_dir`
    /// defaulting to the source's own directory.
    pub fn path_for(source: &Path, backup_dir: Option<&Path>, at: DateTime<Utc>) -> PathBuf {
        let dir = backup_dir
            .map(Path::to_path_buf)
            .or_else(|| source.parent().map(Path::to_path_buf))
            .unwrap_or_default();
        dir.join(format!(
            "{}.{}.{}",
            file_name(source),
            at.format(TIMESTAMP_FORMAT),
            BACKUP_EXTENSION
        ))
    }

    pub fn new(source: &Path, backup_dir: Option<&Path>, at: DateTime<Utc>) -> Self {
        Self {
            source: source.to_path_buf(),
            path: Self::path_for(source, backup_dir, at),
            created_at: at,
        }
    }

    /// Recognises a backup file name produced by [`Backup::path_for`] for
    /// `source` and recovers its timestamp.
    pub fn parse_file_name(source: &Path, candidate: &Path) -> Option<DateTime<Utc>> {
        let name = candidate.file_name()?.to_str()?;
        let prefix = format!("{}.", file_name(source));
        let stamp = name
            .strip_prefix(&prefix)?
            .strip_suffix(&format!(".{}", BACKUP_EXTENSION))?;
        NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT)
            .ok()
            .map(|naive| naive.and_utc())
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "hosts".to_string())
}
