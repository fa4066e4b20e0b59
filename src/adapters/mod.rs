// Adapters layer: concrete implementations of the domain ports for external systems.

pub mod http;
pub mod storage;

pub use http::HttpPageFetcher;
pub use storage::LocalStorage;
