mod apply_block_list;
mod list_backups;
mod remove_block;
mod restore_from_backup;
mod show_current_block;

pub use apply_block_list::ApplyBlockListUseCase;
pub use list_backups::ListBackupsUseCase;
pub use remove_block::RemoveBlockUseCase;
pub use restore_from_backup::{RestoreFromBackupUseCase, RestoreOutcome};
pub use show_current_block::ShowCurrentBlockUseCase;

