use anyhow::Context;
use std::str::FromStr;

const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8080/api";
const DEFAULT_HIDDEN_STORE_URL: &str = "sqlite://author-registry.db";

#[derive(Debug)]
pub struct Config {
    api_base_url: String,
    hidden_store_url: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let api_base_url = load_env_or("API_BASE_URL", DEFAULT_API_BASE_URL)?;
        let hidden_store_url = load_env_or("HIDDEN_STORE_URL", DEFAULT_HIDDEN_STORE_URL)?;
        Ok(Self {
            api_base_url,
            hidden_store_url,
        })
    }

    #[must_use]
    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    #[must_use]
    pub fn hidden_store_url(&self) -> &str {
        &self.hidden_store_url
    }
}

fn load_env_or<T>(key: &str, default: &str) -> anyhow::Result<T>
where
    T: FromStr,
    <T as FromStr>::Err: std::error::Error + Send + Sync + 'static,
{
    let val = match std::env::var(key) {
        Ok(val) => val,
        Err(std::env::VarError::NotPresent) => default.to_string(),
        Err(err) => {
            return Err(err).with_context(|| format!("Failed to load environment variable {key}"));
        }
    };
    val.parse::<T>()
        .with_context(|| format!("Failed to parse environment variable {key}"))
}
