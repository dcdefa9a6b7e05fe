use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use mdreport_reports::MarkdownOptions;

use crate::cli::args::ExportArgs;

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct MdreportConfig {
    #[serde(default)]
    pub markdown: MarkdownOptions,

    #[serde(default)]
    pub input: InputConfig,
}

/// Where findings are read from and how bad lines are treated
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct InputConfig {
    /// JSON-lines file with findings; stdin when absent
    pub path: Option<PathBuf>,

    /// Skip lines that are not valid findings instead of failing
    #[serde(default = "default_skip_invalid")]
    pub skip_invalid: bool,
}

fn default_skip_invalid() -> bool {
    true
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: None,
            skip_invalid: default_skip_invalid(),
        }
    }
}

/// One config file as written: only the keys it sets are `Some`
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ConfigLayer {
    pub markdown: MarkdownLayer,
    pub input: InputLayer,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct MarkdownLayer {
    pub directory: Option<String>,
    pub detailed_filenames: Option<bool>,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct InputLayer {
    pub path: Option<PathBuf>,
    pub skip_invalid: Option<bool>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid path in {field}: {path} does not exist")]
    InvalidPath { field: String, path: PathBuf },

    #[error("Invalid value for {field}: {value} (expected {expected})")]
    InvalidValue {
        field: String,
        value: String,
        expected: String,
    },

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl MdreportConfig {
    pub fn generate_default_config() -> String {
        let default_config = Self::default();
        toml::to_string_pretty(&default_config).unwrap_or_else(|_| {
            r#"# mdreport configuration file

[markdown]
# Empty means the current working directory
directory = ""
detailed_filenames = false

[input]
# path = "results.jsonl"
skip_invalid = true
"#
            .to_string()
        })
    }

    pub fn load_layer_from_file<P: AsRef<Path>>(path: P) -> Result<ConfigLayer, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let layer: ConfigLayer = toml::from_str(&content)?;
        Ok(layer)
    }

    /// Get the user config file path (~/.config/mdreport/config.toml)
    pub fn get_user_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".config/mdreport/config.toml"))
    }

    /// Get the current directory config file path (./mdreport.toml)
    pub fn get_current_config_path() -> PathBuf {
        PathBuf::from("./mdreport.toml")
    }

    /// Merge a config file layer into this one; every key the layer sets wins
    pub fn merge(&mut self, layer: &ConfigLayer) {
        if let Some(ref directory) = layer.markdown.directory {
            self.markdown.directory = directory.clone();
        }
        if let Some(detailed_filenames) = layer.markdown.detailed_filenames {
            self.markdown.detailed_filenames = detailed_filenames;
        }

        if let Some(ref path) = layer.input.path {
            self.input.path = Some(path.clone());
        }
        if let Some(skip_invalid) = layer.input.skip_invalid {
            self.input.skip_invalid = skip_invalid;
        }
    }

    /// Load and merge configs from all sources with priority:
    /// 1. User config (~/.config/mdreport/config.toml) - lowest priority (base)
    /// 2. Current directory (./mdreport.toml)
    ///
    /// Unreadable files are skipped with a debug log.
    pub fn load_with_merged_configs() -> Self {
        let mut config = Self::default();

        let mut candidates = Vec::new();
        if let Some(user_path) = Self::get_user_config_path() {
            candidates.push(user_path);
        }
        candidates.push(Self::get_current_config_path());

        for path in candidates.iter().filter(|p| p.exists()) {
            match Self::load_layer_from_file(path) {
                Ok(loaded) => {
                    config.merge(&loaded);
                    log::debug!("Loaded config from: {}", path.display());
                }
                Err(e) => log::debug!("Skipping config {}: {}", path.display(), e),
            }
        }

        config
    }

    pub fn apply_env_vars(&mut self, env_vars: &HashMap<String, String>) -> Result<(), ConfigError> {
        for (key, value) in env_vars {
            if let Some(config_key) = key.strip_prefix("MDREPORT_") {
                match config_key {
                    "MARKDOWN_DIRECTORY" => self.markdown.directory = value.clone(),
                    "MARKDOWN_DETAILED_FILENAMES" => {
                        self.markdown.detailed_filenames = parse_bool(key, value)?;
                    }
                    "INPUT_PATH" => self.input.path = Some(PathBuf::from(value)),
                    "INPUT_SKIP_INVALID" => {
                        self.input.skip_invalid = parse_bool(key, value)?;
                    }
                    _ => {} // Ignore unknown environment variables
                }
            }
        }
        Ok(())
    }

    pub fn apply_export_args(&mut self, args: &ExportArgs) {
        if let Some(ref directory) = args.directory {
            self.markdown.directory = directory.clone();
        }

        if args.detailed_filenames {
            self.markdown.detailed_filenames = true;
        }

        if let Some(ref input) = args.input {
            self.input.path = Some(input.clone());
        }

        if args.strict {
            self.input.skip_invalid = false;
        }
    }

    /// Load configuration with full precedence chain:
    /// 1. Default values (lowest)
    /// 2. User config, then ./mdreport.toml
    /// 3. Explicit --config file
    /// 4. Environment variables (MDREPORT_*)
    /// 5. CLI arguments (highest)
    pub fn load_with_precedence(
        config_path: Option<&Path>,
        cli_args: &ExportArgs,
        env_vars: &HashMap<String, String>,
    ) -> Result<Self> {
        let mut config = Self::load_with_merged_configs();

        if let Some(path) = config_path {
            let explicit_config = Self::load_layer_from_file(path)
                .map_err(|e| anyhow!("Failed to load config file {}: {}", path.display(), e))?;
            config.merge(&explicit_config);
        }

        config.apply_env_vars(env_vars)?;
        config.apply_export_args(cli_args);
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref path) = self.input.path {
            if !path.is_file() {
                return Err(ConfigError::InvalidPath {
                    field: "input.path".to_string(),
                    path: path.clone(),
                });
            }
        }

        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        field: key.to_string(),
        value: value.to_string(),
        expected: "true or false".to_string(),
    })
}
