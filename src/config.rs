use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub listen: ListenConfig,
    #[serde(default)]
    pub tmdb: TmdbConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default = "default_query")]
    pub default_query: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen: ListenConfig::default(),
            tmdb: TmdbConfig::default(),
            session: SessionConfig::default(),
            default_query: default_query(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListenConfig {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default = "default_port")]
    pub port: String,
    #[serde(default)]
    pub tlscert: Option<String>,
    #[serde(default)]
    pub tlskey: Option<String>,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            address: None,
            port: default_port(),
            tlscert: None,
            tlskey: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TmdbConfig {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_image_base")]
    pub image_base: String,
    #[serde(default = "default_card_poster_size")]
    pub card_poster_size: String,
    #[serde(default = "default_overlay_poster_size")]
    pub overlay_poster_size: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "default_token_env")]
    pub token_env: String,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            image_base: default_image_base(),
            card_poster_size: default_card_poster_size(),
            overlay_poster_size: default_overlay_poster_size(),
            timeout_secs: default_timeout_secs(),
            token: None,
            token_env: default_token_env(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    #[serde(default = "default_session_idle_secs")]
    pub idle_secs: u64,
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_secs: default_session_idle_secs(),
            max_sessions: default_max_sessions(),
        }
    }
}

fn default_session_idle_secs() -> u64 {
    1800
}

fn default_max_sessions() -> usize {
    10_000
}

fn default_port() -> String {
    "8080".to_string()
}

fn default_query() -> String {
    "batman".to_string()
}

fn default_api_base() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_image_base() -> String {
    "https://image.tmdb.org/t/p".to_string()
}

fn default_card_poster_size() -> String {
    "w500".to_string()
}

fn default_overlay_poster_size() -> String {
    "w300".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_token_env() -> String {
    "TMDB_READ_TOKEN".to_string()
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.to_string(), e))?;

        Self::from_yaml(&content).map_err(|e| ConfigError::ParseError(path.to_string(), e))
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document deserializes as null, which should mean "all defaults".
        if content.trim().is_empty() {
            return Ok(Config::default());
        }
        serde_yaml::from_str(content)
    }
}

impl TmdbConfig {
    pub fn resolve_token(&self) -> Result<String, ConfigError> {
        self.resolve_token_with(|name| std::env::var(name).ok())
    }

    fn resolve_token_with<F>(&self, lookup: F) -> Result<String, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.token
            .clone()
            .or_else(|| lookup(&self.token_env))
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ConfigError::MissingToken(self.token_env.clone()))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    ReadError(String, std::io::Error),
    #[error("Failed to parse config file {0}: {1}")]
    ParseError(String, serde_yaml::Error),
    #[error("No TMDB token configured: set tmdb.token or the {0} environment variable")]
    MissingToken(String),
}
