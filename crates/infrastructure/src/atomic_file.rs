//! Whole-file replacement through a temp file in the target's directory
//! followed by a rename, so readers see either the old or the new content.
//!
//! A symlinked path is resolved first: the link stays in place and the file
//! it points to is the one replaced.

use hostguard_domain::DomainError;
use std::borrow::Cow;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// The file a write to `path` must replace.
fn resolve_target(path: &Path) -> Result<Cow<'_, Path>, DomainError> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => {
            let target =
                fs::canonicalize(path).map_err(|e| DomainError::from_io(path.display(), &e))?;
            debug!(link = %path.display(), target = %target.display(), "Writing through symlink");
            Ok(Cow::Owned(target))
        }
        _ => Ok(Cow::Borrowed(path)),
    }
}

pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), DomainError> {
    let target = resolve_target(path)?;
    let path = target.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = tempfile::Builder::new()
        .prefix(".hostguard-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| DomainError::from_io(dir.display(), &e))?;

    temp.write_all(bytes)
        .and_then(|_| temp.as_file().sync_all())
        .map_err(|e| DomainError::from_io(temp.path().display(), &e))?;

    if let Ok(existing) = fs::metadata(path) {
        preserve_metadata(temp.path(), &existing)?;
    }

    temp.persist(path)
        .map_err(|e| DomainError::from_io(path.display(), &e.error))?;

    sync_dir(dir);
    debug!(path = %path.display(), bytes = bytes.len(), "File replaced atomically");
    Ok(())
}

fn preserve_metadata(temp: &Path, existing: &fs::Metadata) -> Result<(), DomainError> {
    fs::set_permissions(temp, existing.permissions())
        .map_err(|e| DomainError::from_io(temp.display(), &e))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;
        // Only root may give the file away; an unprivileged writer already owns it.
        let _ = std::os::unix::fs::chown(temp, Some(existing.uid()), Some(existing.gid()));
    }

    Ok(())
}

#[cfg(unix)]
fn sync_dir(dir: &Path) {
    if let Ok(handle) = fs::File::open(dir) {
        let _ = handle.sync_all();
    }
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) {}
