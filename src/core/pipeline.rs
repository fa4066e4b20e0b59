use crate::core::collector::collect_pages;
use crate::core::export::{render_csv, render_json};
use crate::domain::model::{Collection, NormalizedRecord};
use crate::domain::ports::{ConfigProvider, ExportOutcome, LoadReport, PageSource, Pipeline, Storage};
use crate::utils::error::Result;

/// Ranked-list export: page through the source, then write the JSON and
/// CSV files through `Storage`.
pub struct TopListPipeline<F: PageSource, S: Storage, C: ConfigProvider> {
    pub(crate) source: F,
    pub(crate) storage: S,
    pub(crate) config: C,
}

impl<F: PageSource, S: Storage, C: ConfigProvider> TopListPipeline<F, S, C> {
    pub fn new(source: F, storage: S, config: C) -> Self {
        Self {
            source,
            storage,
            config,
        }
    }

    async fn export_json(&self, records: &[NormalizedRecord]) -> ExportOutcome {
        let filename = self.config.json_filename();
        let path = self.storage.locate(filename);

        let written: Result<()> = async {
            let data = render_json(records)?;
            tracing::debug!("Writing JSON export ({} bytes)", data.len());
            self.storage.write_file(filename, &data).await
        }
        .await;

        match written {
            Ok(()) => {
                tracing::info!(
                    "Successfully saved {} anime entries to {}",
                    records.len(),
                    path.display()
                );
                ExportOutcome::Written {
                    path,
                    count: records.len(),
                }
            }
            Err(e) => {
                tracing::error!("Error saving JSON file {}: {}", path.display(), e);
                ExportOutcome::Failed {
                    path,
                    error: e.to_string(),
                }
            }
        }
    }

    async fn export_csv(&self, records: &[NormalizedRecord]) -> ExportOutcome {
        let filename = self.config.csv_filename();
        let path = self.storage.locate(filename);

        let written: Result<bool> = async {
            let Some(data) = render_csv(records)? else {
                return Ok(false);
            };
            tracing::debug!("Writing CSV export ({} bytes)", data.len());
            self.storage.write_file(filename, &data).await?;
            Ok(true)
        }
        .await;

        match written {
            Ok(true) => {
                tracing::info!(
                    "Successfully saved {} anime entries to {}",
                    records.len(),
                    path.display()
                );
                ExportOutcome::Written {
                    path,
                    count: records.len(),
                }
            }
            Ok(false) => {
                tracing::warn!("Collection is empty; {} was not written", path.display());
                ExportOutcome::Skipped
            }
            Err(e) => {
                tracing::error!("Error saving CSV file {}: {}", path.display(), e);
                ExportOutcome::Failed {
                    path,
                    error: e.to_string(),
                }
            }
        }
    }
}

#[async_trait::async_trait]
impl<F: PageSource, S: Storage, C: ConfigProvider> Pipeline for TopListPipeline<F, S, C> {
    async fn extract(&self) -> Collection {
        tracing::debug!(
            "Collecting from {} with {:?} between requests",
            self.config.api_endpoint(),
            self.config.request_delay()
        );
        collect_pages(&self.source, self.config.request_delay()).await
    }

    async fn load(&self, collection: &Collection) -> LoadReport {
        // 兩個輸出彼此獨立，一個失敗不影響另一個
        let json = self.export_json(&collection.records).await;
        let csv = self.export_csv(&collection.records).await;
        LoadReport { json, csv }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Page, StopReason};
    use crate::domain::normalize::normalize;
    use crate::utils::error::EtlError;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
        read_only: Vec<String>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
                read_only: Vec::new(),
            }
        }

        fn with_read_only(path: &str) -> Self {
            Self {
                read_only: vec![path.to_string()],
                ..Self::new()
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                EtlError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            if self.read_only.iter().any(|p| p == path) {
                return Err(EtlError::IoError(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    format!("Read-only: {}", path),
                )));
            }
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }

        fn locate(&self, path: &str) -> PathBuf {
            Path::new("mock").join(path)
        }
    }

    struct MockConfig {
        api_endpoint: String,
    }

    impl ConfigProvider for MockConfig {
        fn api_endpoint(&self) -> &str {
            &self.api_endpoint
        }

        fn output_path(&self) -> &str {
            "mock"
        }

        fn request_delay(&self) -> Duration {
            Duration::ZERO
        }

        fn json_filename(&self) -> &str {
            "top.json"
        }

        fn csv_filename(&self) -> &str {
            "top.csv"
        }
    }

    struct SinglePage;

    #[async_trait]
    impl PageSource for SinglePage {
        async fn fetch_page(&self, page: u32) -> Result<Page> {
            assert_eq!(page, 1);
            Ok(Page {
                items: vec![json!({"mal_id": 1, "title": "Gintama°"})],
                has_next_page: false,
            })
        }
    }

    fn pipeline(storage: MockStorage) -> TopListPipeline<SinglePage, MockStorage, MockConfig> {
        TopListPipeline::new(
            SinglePage,
            storage,
            MockConfig {
                api_endpoint: "http://test.invalid/top/anime".to_string(),
            },
        )
    }

    fn collection(records: Vec<NormalizedRecord>) -> Collection {
        Collection {
            records,
            pages_fetched: 1,
            stop_reason: StopReason::LastPage,
        }
    }

    #[tokio::test]
    async fn test_extract_then_load_writes_both_files() {
        let storage = MockStorage::new();
        let pipeline = pipeline(storage.clone());

        let collected = pipeline.extract().await;
        assert_eq!(collected.len(), 1);

        let report = pipeline.load(&collected).await;

        assert_eq!(
            report.json,
            ExportOutcome::Written {
                path: PathBuf::from("mock/top.json"),
                count: 1
            }
        );
        assert!(report.csv.is_written());

        let json_data = storage.get_file("top.json").await.unwrap();
        assert!(String::from_utf8(json_data).unwrap().contains("Gintama°"));
        assert!(storage.get_file("top.csv").await.is_some());
    }

    #[tokio::test]
    async fn test_load_empty_collection_skips_csv() {
        let storage = MockStorage::new();
        let pipeline = pipeline(storage.clone());

        let report = pipeline.load(&collection(vec![])).await;

        assert!(report.json.is_written());
        assert_eq!(report.csv, ExportOutcome::Skipped);
        assert_eq!(storage.get_file("top.json").await.unwrap(), b"[]");
        assert!(storage.get_file("top.csv").await.is_none());
    }

    #[tokio::test]
    async fn test_json_failure_does_not_block_csv() {
        let storage = MockStorage::with_read_only("top.json");
        let pipeline = pipeline(storage.clone());

        let report = pipeline
            .load(&collection(vec![normalize(&json!({"mal_id": 2}))]))
            .await;

        assert!(matches!(report.json, ExportOutcome::Failed { .. }));
        assert!(report.csv.is_written());
        assert!(storage.get_file("top.json").await.is_none());
        assert!(storage.read_file("top.csv").await.is_ok());
    }

    #[tokio::test]
    async fn test_csv_failure_keeps_json() {
        let storage = MockStorage::with_read_only("top.csv");
        let pipeline = pipeline(storage.clone());

        let report = pipeline
            .load(&collection(vec![normalize(&json!({"mal_id": 3}))]))
            .await;

        assert!(report.json.is_written());
        match report.csv {
            ExportOutcome::Failed { path, error } => {
                assert_eq!(path, PathBuf::from("mock/top.csv"));
                assert!(error.contains("Read-only"));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }
}
