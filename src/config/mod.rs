//! Configuration management
//!
//! Settings are read from a TOML file (default `cartmate.toml`) with CLI and
//! environment overrides layered on top. API keys never live in the file;
//! only the names of the environment variables that hold them do.

pub mod validator;

use config::{Config, File};
use serde::{Deserialize, Serialize};

use crate::cli::Cli;

#[derive(Debug, Deserialize, Serialize)]
pub struct Settings {
    pub server: ServerSettings,
    #[serde(default)]
    pub model: ModelSettings,
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default)]
    pub scrape: ScrapeSettings,
    #[serde(default)]
    pub documents: DocumentSettings,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

/// Model API settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModelSettings {
    /// Default model identifier; switchable at runtime per call
    #[serde(default = "default_model")]
    pub default: String,
    /// Fixed output token cap per call
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Override for the API base URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Environment variable holding the API key (default ANTHROPIC_API_KEY)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            default: default_model(),
            max_tokens: default_max_tokens(),
            base_url: None,
            api_key_env: None,
        }
    }
}

/// Web search API settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchSettings {
    /// Result-count cap per query
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    /// Retailers searched when the caller names none
    #[serde(default = "default_retailers")]
    pub default_retailers: Vec<String>,
    /// Override for the API base URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Environment variable holding the API key (default TAVILY_API_KEY)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
            default_retailers: default_retailers(),
            base_url: None,
            api_key_env: None,
        }
    }
}

/// Page-scraping API settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ScrapeSettings {
    /// Override for the API base URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Environment variable holding the API key (default FIRECRAWL_API_KEY)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,
}

/// Paths of the local JSON documents the assistant reads at startup
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DocumentSettings {
    /// Tool schema document; absent file degrades to "no tools available"
    #[serde(default = "default_tools_schema")]
    pub tools_schema: String,
    /// Policy document; absent file triggers the hardcoded default policy
    #[serde(default = "default_policies")]
    pub policies: String,
}

impl Default for DocumentSettings {
    fn default() -> Self {
        Self {
            tools_schema: default_tools_schema(),
            policies: default_policies(),
        }
    }
}

fn default_model() -> String {
    "claude-3-7-sonnet-latest".to_string()
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_max_results() -> usize {
    5
}

fn default_retailers() -> Vec<String> {
    vec![
        "Target".to_string(),
        "Walmart".to_string(),
        "BestBuy".to_string(),
    ]
}

fn default_tools_schema() -> String {
    "config/tools.json".to_string()
}

fn default_policies() -> String {
    "config/policies.json".to_string()
}

impl Settings {
    pub fn new() -> Result<Self, anyhow::Error> {
        Self::from_file("cartmate.toml")
    }

    /// Create settings from CLI arguments (config file plus CLI overrides)
    pub fn new_with_cli(cli: &Cli) -> Result<Self, anyhow::Error> {
        let mut settings = Self::from_file(
            cli.config
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path is not valid UTF-8"))?,
        )?;

        settings.apply_cli_overrides(cli);

        validator::validate(&settings).map_err(|errors| {
            anyhow::anyhow!("Configuration validation failed:\n{}", errors.join("\n"))
        })?;

        Ok(settings)
    }

    fn from_file(path: &str) -> Result<Self, anyhow::Error> {
        let s = Config::builder()
            .add_source(File::with_name(path).required(false))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .build()?;

        let settings: Settings = s.try_deserialize()?;
        Ok(settings)
    }

    /// Apply CLI argument overrides (CLI > env vars > config file)
    fn apply_cli_overrides(&mut self, cli: &Cli) {
        if let Some(host) = &cli.host {
            self.server.host = host.clone();
        }
        if let Some(port) = cli.port {
            self.server.port = port;
        }
        if let Some(model) = &cli.model {
            self.model.default = model.clone();
        }
    }
}
