//! hostguard application layer: ports implemented by the infrastructure
//! adapters and the use cases driven by the CLI and the jobs.
pub mod ports;
pub mod use_cases;
