#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

pub const DEFAULT_API_ENDPOINT: &str = "https://api.jikan.moe/v4/top/anime";
pub const DEFAULT_DELAY_MS: u64 = 1000;
pub const DEFAULT_OUTPUT_PATH: &str = ".";
pub const DEFAULT_JSON_FILE: &str = "top_anime_list.json";
pub const DEFAULT_CSV_FILE: &str = "top_anime_list.csv";
pub const MAX_DELAY_MS: u64 = 60_000;
