use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

use crate::archive::fields::MIN_STYLE_COUNT;
use crate::scraper::reddit::{ClientOptions, Credentials, API_BASE, TOKEN_URL};

const ENV_PREFIX: &str = "WHISKY";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub min_style_count: usize,
    pub reddit: RedditSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedditSettings {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub user_agent: String,
    pub request_interval_ms: u64,
    pub timeout_secs: u64,
    pub token_url: String,
    pub api_base: String,
}

/// Shape of a `pass_info.json` credentials file.
#[derive(Debug, Deserialize)]
struct CredentialsFile {
    client_id: Option<String>,
    client_secret: Option<String>,
    username: Option<String>,
    password: Option<String>,
}

impl Settings {
    /// Defaults, then the settings file, then the credentials file, then
    /// `WHISKY_*` environment variables.
    pub fn load(config_path: Option<&Path>, credentials_path: Option<&Path>) -> Result<Self> {
        Self::load_with(config_path, credentials_path, environment())
    }

    fn load_with(
        config_path: Option<&Path>,
        credentials_path: Option<&Path>,
        env: Environment,
    ) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("min_style_count", MIN_STYLE_COUNT as u64)?
            .set_default("reddit.user_agent", "whisky_reddit")?
            .set_default("reddit.request_interval_ms", 1000)?
            .set_default("reddit.timeout_secs", 30)?
            .set_default("reddit.token_url", TOKEN_URL)?
            .set_default("reddit.api_base", API_BASE)?;

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path).required(true));
        }
        if let Some(path) = credentials_path {
            let nested = credentials_source(path)?;
            builder = builder.add_source(File::from_str(&nested, FileFormat::Json));
        }

        builder
            .add_source(env)
            .build()
            .context("Failed to load settings")?
            .try_deserialize()
            .context("Invalid settings")
    }

    /// Credentials for the API login. Every missing key is named in the error.
    pub fn credentials(&self) -> Result<Credentials> {
        let r = &self.reddit;
        let fields = [
            ("client_id", &r.client_id),
            ("client_secret", &r.client_secret),
            ("username", &r.username),
            ("password", &r.password),
        ];
        let missing: Vec<&str> = fields
            .iter()
            .filter(|(_, v)| v.as_deref().map_or(true, |s| s.trim().is_empty()))
            .map(|(name, _)| *name)
            .collect();
        if !missing.is_empty() {
            bail!("Missing Reddit credentials: {}", missing.join(", "));
        }

        let get = |v: &Option<String>| v.clone().unwrap_or_default();
        Ok(Credentials {
            client_id: get(&r.client_id),
            client_secret: get(&r.client_secret),
            username: get(&r.username),
            password: get(&r.password),
            user_agent: r.user_agent.clone(),
        })
    }

    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            request_interval: Duration::from_millis(self.reddit.request_interval_ms),
            timeout: Duration::from_secs(self.reddit.timeout_secs),
            token_url: self.reddit.token_url.clone(),
            api_base: self.reddit.api_base.clone(),
        }
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
}

/// Re-root a flat credentials file under `reddit` so it layers like the rest.
fn credentials_source(path: &Path) -> Result<String> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read credentials file {}", path.display()))?;
    let creds: CredentialsFile = serde_json::from_str(&text)
        .with_context(|| format!("Malformed credentials file {}", path.display()))?;

    let mut reddit = serde_json::Map::new();
    for (key, value) in [
        ("client_id", creds.client_id),
        ("client_secret", creds.client_secret),
        ("username", creds.username),
        ("password", creds.password),
    ] {
        if let Some(v) = value {
            reddit.insert(key.to_string(), serde_json::Value::String(v));
        }
    }
    Ok(serde_json::json!({ "reddit": reddit }).to_string())
}
