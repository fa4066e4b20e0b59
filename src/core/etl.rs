use crate::core::Pipeline;
use crate::domain::model::{Collection, NormalizedRecord};
use crate::domain::ports::LoadReport;
use crate::utils::monitor::RunMonitor;
use chrono::{DateTime, Local};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub collection: Collection,
    pub report: LoadReport,
    pub started_at: DateTime<Local>,
    pub finished_at: DateTime<Local>,
}

impl RunSummary {
    pub fn total_collected(&self) -> usize {
        self.collection.len()
    }

    /// Two lines per record for the first `limit` records.
    pub fn preview(&self, limit: usize) -> Vec<String> {
        self.collection
            .records
            .iter()
            .take(limit)
            .enumerate()
            .flat_map(|(i, record)| preview_lines(i + 1, record))
            .collect()
    }
}

fn preview_lines(position: usize, record: &NormalizedRecord) -> [String; 2] {
    [
        format!("{}. {} (Rank: {})", position, record.title, record.rank),
        format!(
            "   Score: {}, Type: {}, Episodes: {}",
            record.score, record.kind, record.episodes
        ),
    ]
}

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor_enabled: bool,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor_enabled,
        }
    }

    pub async fn run(&self) -> RunSummary {
        let mut monitor = RunMonitor::new(self.monitor_enabled);
        let started_at = Local::now();
        tracing::info!("Starting to scrape top anime data...");
        tracing::info!("Started at: {}", started_at.format(TIMESTAMP_FORMAT));

        // Extract + Transform (逐頁正規化)
        let collection = self.pipeline.extract().await;
        tracing::info!(
            "Collected {} records from {} page request(s); stopped because {}",
            collection.len(),
            collection.pages_fetched,
            collection.stop_reason
        );
        monitor.finish_phase("collect");

        // Load
        let report = self.pipeline.load(&collection).await;
        monitor.finish_phase("export");
        monitor.log_final_stats();

        let finished_at = Local::now();
        tracing::info!("Scraping completed at: {}", finished_at.format(TIMESTAMP_FORMAT));
        tracing::info!("Total anime collected: {}", collection.len());

        RunSummary {
            collection,
            report,
            started_at,
            finished_at,
        }
    }
}
