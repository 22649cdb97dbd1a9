//! hostguard infrastructure: filesystem, process and network adapters for
//! the application ports.
mod atomic_file;
pub mod blocklist;
pub mod hosts;
pub mod system;
