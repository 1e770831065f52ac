use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub llm: LlmConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub project_name: String,
    pub api_prefix: String,
    pub cors_origins: CorsOrigins,
    pub bind_addr: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum CorsOrigins {
    Any,
    List(Vec<String>),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(skip_serializing)]
    pub api_key: String,
    pub api_base: String,
    pub model: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                project_name: "Component Forge".to_string(),
                api_prefix: "/api/v1".to_string(),
                cors_origins: CorsOrigins::Any,
                bind_addr: "0.0.0.0:8000".to_string(),
            },
            llm: LlmConfig {
                api_key: String::new(),
                api_base: synth::llm::DEFAULT_API_BASE.to_string(),
                model: synth::DEFAULT_MODEL.to_string(),
            },
        }
    }
}

impl CorsOrigins {
    /// Comma-separated origins. A `*` entry anywhere allows every origin.
    pub fn parse(raw: &str) -> Self {
        let origins: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(String::from)
            .collect();

        if origins.iter().any(|o| o == "*") {
            Self::Any
        } else {
            Self::List(origins)
        }
    }
}

impl AppConfig {
    /// Load from the process environment, reading `.env` first if present.
    pub fn from_env() -> Result<Self> {
        accept_missing_dotenv(dotenv::dotenv().map(|_| ()))?;
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from a variable lookup. Unset or blank variables keep their defaults;
    /// `OPENAI_API_KEY` is mandatory.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let Some(api_key) = get("OPENAI_API_KEY") else {
            bail!("OPENAI_API_KEY not found in environment variables");
        };

        let mut config = Self::default();
        config.llm.api_key = api_key;

        if let Some(api_base) = get("OPENAI_API_BASE_URL") {
            config.llm.api_base = api_base;
        }
        if let Some(model) = get("MODEL") {
            config.llm.model = model;
        }
        if let Some(name) = get("PROJECT_NAME") {
            config.server.project_name = name;
        }
        if let Some(prefix) = get("API_V1_STR") {
            config.server.api_prefix = prefix;
        }
        if let Some(origins) = get("BACKEND_CORS_ORIGINS") {
            config.server.cors_origins = CorsOrigins::parse(&origins);
        }
        if let Some(addr) = get("BIND_ADDR") {
            config.server.bind_addr = addr;
        }

        Ok(config)
    }
}

/// A missing `.env` is fine; an unreadable or malformed one is not.
fn accept_missing_dotenv(loaded: dotenv::Result<()>) -> Result<()> {
    match loaded {
        Err(dotenv::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        other => other.context("Failed to read .env file"),
    }
}
