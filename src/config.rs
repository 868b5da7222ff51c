use anyhow::{bail, Context, Result};
use std::fmt;
use url::Url;

use crate::clients::ai::openai::DEFAULT_BASE_URL;

/// Log filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "parcel_report=info,tower_http=info";

const DEFAULT_ALLOWED_ORIGINS: &[&str] = &["http://localhost:3000", "http://localhost:5173"];

/// Process-wide settings, read once at startup and handed to the router.
#[derive(Clone)]
pub struct Config {
    /// Completion service credential. Requests fail with 500 while unset.
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    /// Normalized origins (`scheme://host[:port]`) echoed back in CORS headers.
    pub allowed_origins: Vec<String>,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let allowed_origins = match non_empty("ALLOWED_ORIGINS") {
            Some(raw) => parse_origins(&raw)?,
            None => DEFAULT_ALLOWED_ORIGINS.iter().map(|o| o.to_string()).collect(),
        };

        Ok(Config {
            openai_api_key: non_empty("OPENAI_API_KEY").map(|k| k.trim().to_string()),
            openai_base_url: non_empty("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            allowed_origins,
            port: non_empty("PORT")
                .unwrap_or_else(|| "3000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("openai_api_key", &self.openai_api_key.as_ref().map(|_| "<redacted>"))
            .field("openai_base_url", &self.openai_base_url)
            .field("allowed_origins", &self.allowed_origins)
            .field("port", &self.port)
            .finish()
    }
}

fn parse_origins(raw: &str) -> Result<Vec<String>> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(|origin| {
            let url = Url::parse(origin)
                .with_context(|| format!("ALLOWED_ORIGINS entry '{origin}' is not a valid URL"))?;
            let origin = url.origin();
            if !origin.is_tuple() {
                bail!("ALLOWED_ORIGINS entry '{url}' has no host");
            }
            Ok(origin.ascii_serialization())
        })
        .collect()
}
