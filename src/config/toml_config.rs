use super::{
    DEFAULT_API_ENDPOINT, DEFAULT_CSV_FILE, DEFAULT_DELAY_MS, DEFAULT_JSON_FILE, DEFAULT_OUTPUT_PATH,
    MAX_DELAY_MS,
};
use crate::core::ConfigProvider;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{self, Validate};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub load: LoadConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    #[serde(default = "default_output_path")]
    pub output_path: String,
    #[serde(default)]
    pub filenames: FilenameConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilenameConfig {
    #[serde(default = "default_json_file")]
    pub json: String,
    #[serde(default = "default_csv_file")]
    pub csv: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

fn default_endpoint() -> String {
    DEFAULT_API_ENDPOINT.to_string()
}

fn default_delay_ms() -> u64 {
    DEFAULT_DELAY_MS
}

fn default_output_path() -> String {
    DEFAULT_OUTPUT_PATH.to_string()
}

fn default_json_file() -> String {
    DEFAULT_JSON_FILE.to_string()
}

fn default_csv_file() -> String {
    DEFAULT_CSV_FILE.to_string()
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            delay_ms: default_delay_ms(),
        }
    }
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            output_path: default_output_path(),
            filenames: FilenameConfig::default(),
        }
    }
}

impl Default for FilenameConfig {
    fn default() -> Self {
        Self {
            json: default_json_file(),
            csv: default_csv_file(),
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${JIKAN_ENDPOINT})，找不到的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| {
            Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("env var pattern is valid")
        });

        re.replace_all(content, |caps: &Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn api_endpoint(&self) -> &str {
        &self.source.endpoint
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn request_delay(&self) -> Duration {
        Duration::from_millis(self.source.delay_ms)
    }

    fn json_filename(&self) -> &str {
        &self.load.filenames.json
    }

    fn csv_filename(&self) -> &str {
        &self.load.filenames.csv
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("source.endpoint", &self.source.endpoint)?;
        validation::validate_range("source.delay_ms", self.source.delay_ms, 0, MAX_DELAY_MS)?;
        validation::validate_path("load.output_path", &self.load.output_path)?;
        validation::validate_output_filename("load.filenames.json", &self.load.filenames.json, "json")?;
        validation::validate_output_filename("load.filenames.csv", &self.load.filenames.csv, "csv")?;
        Ok(())
    }
}
