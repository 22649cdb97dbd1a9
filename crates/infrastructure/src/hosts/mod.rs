mod encoding;
pub mod lock;
mod manager;

pub use lock::{HostsLock, LockPolicy};
pub use manager::HostsSectionManager;
