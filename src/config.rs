use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub endpoints: EndpointConfig,
    pub output: OutputConfig,
}

/// Remote endpoints for the vocabulary archive, the reference translation
/// and the companion quote services.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// Vocabulary archive (ZIP of `bible/<category>/<slug>.md` files).
    pub archive_url: String,
    /// Strong's companion source (`article -> {terms, strongs}` JSON).
    pub strongs_list_url: String,
    /// Content-addressed endpoint for USFM books. `{book}` is replaced with
    /// `NN-CODE` (e.g. `01-GEN`).
    pub translation_url: String,
    /// "add-GL-quote" companion service.
    pub gl_quote_url: String,
    /// GL-to-OL converter companion service.
    pub ol_convert_url: String,
}

/// Output location configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory for generated TSV files when `--out` is not given.
    pub out_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoints: EndpointConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            archive_url: "https://git.door43.org/unfoldingWord/en_tw/archive/master.zip"
                .to_string(),
            strongs_list_url:
                "https://git.door43.org/unfoldingWord/en_tw/raw/branch/master/tw_strongs_list.json"
                    .to_string(),
            translation_url:
                "https://git.door43.org/api/v1/repos/unfoldingWord/en_ult/contents/{book}.usfm"
                    .to_string(),
            gl_quote_url: "http://localhost:8090/add-gl-quote".to_string(),
            ol_convert_url: "http://localhost:8090/convert".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { out_dir: None }
    }
}

impl AppConfig {
    /// Load configuration from `~/.config/twlgen/config.toml`.
    /// Returns `Default` if the file is missing or unparseable.
    pub fn load() -> Self {
        let config_path = Self::config_path();
        match std::fs::read_to_string(&config_path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    log::info!("Loaded config from {}", config_path.display());
                    config
                }
                Err(e) => {
                    log::warn!(
                        "Failed to parse config at {}: {e} — using defaults",
                        config_path.display()
                    );
                    Self::default()
                }
            },
            Err(_) => {
                log::debug!(
                    "No config file at {} — using defaults",
                    config_path.display()
                );
                Self::default()
            }
        }
    }

    /// Resolved output directory (config override or current directory).
    pub fn out_dir(&self) -> PathBuf {
        self.output
            .out_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("twlgen").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.endpoints.archive_url.ends_with(".zip"));
        assert!(config.endpoints.translation_url.contains("{book}"));
        assert!(config.output.out_dir.is_none());
    }

    #[test]
    fn test_out_dir_default() {
        let config = AppConfig::default();
        assert_eq!(config.out_dir(), PathBuf::from("."));
    }

    #[test]
    fn test_out_dir_override() {
        let mut config = AppConfig::default();
        config.output.out_dir = Some(PathBuf::from("/tmp/twl"));
        assert_eq!(config.out_dir(), PathBuf::from("/tmp/twl"));
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = AppConfig::default();
        let serialized = toml::to_string(&config).unwrap();
        let deserialized: AppConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(
            deserialized.endpoints.archive_url,
            config.endpoints.archive_url
        );
    }
}
