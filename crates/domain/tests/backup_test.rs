use chrono::{TimeZone, Utc};
use hostguard_domain::Backup;
use std::path::{Path, PathBuf};

fn at() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 15, 9, 26).unwrap()
        + chrono::Duration::milliseconds(535)
}

#[test]
fn test_path_for_defaults_to_source_directory() {
    let path = Backup::path_for(Path::new("/etc/hosts"), None, at());
    assert_eq!(path, PathBuf::from("/etc/hosts.20260314T150926.535Z.bak"));
}

#[test]
fn test_path_for_uses_backup_dir() {
    let path = Backup::path_for(
        Path::new("/etc/hosts"),
        Some(Path::new("/var/backups/hostguard")),
        at(),
    );
    assert_eq!(
        path,
        PathBuf::from("/var/backups/hostguard/hosts.20260314T150926.535Z.bak")
    );
}

#[test]
fn test_parse_file_name_recovers_timestamp() {
    let backup = Backup::new(Path::new("/etc/hosts"), None, at());
    let parsed = Backup::parse_file_name(Path::new("/etc/hosts"), &backup.path);
    assert_eq!(parsed, Some(at()));
}

#[test]
fn test_parse_file_name_ignores_unrelated_files() {
    let source = Path::new("/etc/hosts");
    assert!(Backup::parse_file_name(source, Path::new("/etc/hosts")).is_none());
    assert!(Backup::parse_file_name(source, Path::new("/etc/hosts.allow")).is_none());
    assert!(Backup::parse_file_name(source, Path::new("/etc/hosts.lock")).is_none());
    assert!(Backup::parse_file_name(source, Path::new("/etc/hosts.garbage.bak")).is_none());
    assert!(Backup::parse_file_name(
        source,
        Path::new("/etc/other.20260314T150926.535Z.bak")
    )
    .is_none());
}

#[test]
fn test_backup_names_sort_chronologically() {
    let source = Path::new("/etc/hosts");
    let earlier = Backup::path_for(source, None, at());
    let later = Backup::path_for(source, None, at() + chrono::Duration::seconds(1));
    assert!(earlier < later);
}
