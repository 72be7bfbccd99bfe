pub mod catalog;
pub mod config;
pub mod detect;
pub mod search;
pub mod service;
pub mod util;
pub mod walker;

pub use config::DocsConfig;
pub use search::{SearchEngine, SearchMatch, SearchOptions};
pub use service::FullstackDocsService;
