pub mod builders;
pub mod http_server_mock;

pub use builders::*;
pub use http_server_mock::MockHttpServer;
