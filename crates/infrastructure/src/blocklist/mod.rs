pub mod fetcher;
pub mod parser;
pub mod store;

pub use fetcher::HttpBlocklistFetcher;
pub use parser::{parse_list_line, parse_list_text};
pub use store::FileBlocklistStore;
