use crate::domain::model::{Collection, Page};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn locate(&self, path: &str) -> PathBuf;
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn output_path(&self) -> &str;
    fn request_delay(&self) -> Duration;
    fn json_filename(&self) -> &str;
    fn csv_filename(&self) -> &str;
}

/// Source of listing pages, 1-based.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_page(&self, page: u32) -> Result<Page>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExportOutcome {
    Written { path: PathBuf, count: usize },
    /// Nothing to write (empty collection for the tabular export).
    Skipped,
    Failed { path: PathBuf, error: String },
}

impl ExportOutcome {
    pub fn is_written(&self) -> bool {
        matches!(self, ExportOutcome::Written { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport {
    pub json: ExportOutcome,
    pub csv: ExportOutcome,
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Collection;
    async fn load(&self, collection: &Collection) -> LoadReport;
}
