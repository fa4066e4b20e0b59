use super::{
    DEFAULT_API_ENDPOINT, DEFAULT_CSV_FILE, DEFAULT_DELAY_MS, DEFAULT_JSON_FILE, DEFAULT_OUTPUT_PATH,
    MAX_DELAY_MS,
};
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "top-anime-etl")]
#[command(about = "Export the ranked top anime list to JSON and CSV")]
pub struct CliConfig {
    #[arg(long, default_value = DEFAULT_API_ENDPOINT)]
    pub api_endpoint: String,

    /// Minimum time between the starts of two page requests
    #[arg(long, default_value_t = DEFAULT_DELAY_MS)]
    pub delay_ms: u64,

    #[arg(long, default_value = DEFAULT_OUTPUT_PATH)]
    pub output_path: String,

    #[arg(long, default_value = DEFAULT_JSON_FILE)]
    pub json_file: String,

    #[arg(long, default_value = DEFAULT_CSV_FILE)]
    pub csv_file: String,

    /// Load settings from a TOML file instead of the flags above
    #[arg(short, long)]
    pub config: Option<String>,

    /// Number of records to print after the export
    #[arg(long, default_value_t = 3)]
    pub preview: usize,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[arg(long, help = "Log process CPU/memory after each phase")]
    pub monitor: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
            delay_ms: DEFAULT_DELAY_MS,
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            json_file: DEFAULT_JSON_FILE.to_string(),
            csv_file: DEFAULT_CSV_FILE.to_string(),
            config: None,
            preview: 3,
            verbose: false,
            json_logs: false,
            monitor: false,
        }
    }
}

impl ConfigProvider for CliConfig {
    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn request_delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    fn json_filename(&self) -> &str {
        &self.json_file
    }

    fn csv_filename(&self) -> &str {
        &self.csv_file
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("api_endpoint", &self.api_endpoint)?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_output_filename("json_file", &self.json_file, "json")?;
        validation::validate_output_filename("csv_file", &self.csv_file, "csv")?;
        validation::validate_range("delay_ms", self.delay_ms, 0, MAX_DELAY_MS)?;
        Ok(())
    }
}
