pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::TomlConfig;

pub use crate::adapters::{HttpPageFetcher, LocalStorage};
pub use crate::core::{
    etl::{EtlEngine, RunSummary},
    pipeline::TopListPipeline,
};
pub use crate::domain::model::{Collection, FieldValue, NormalizedRecord, Page, StopReason, NOT_AVAILABLE};
pub use crate::domain::ports::{ExportOutcome, LoadReport};
pub use crate::utils::error::{EtlError, Result};
