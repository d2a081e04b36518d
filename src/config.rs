use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::Duration;

/// Environment variables starting with this prefix (plus `_`) map onto config keys.
const ENV_PREFIX: &str = "TRANSLATOR";

/// Runtime settings, layered from defaults, an optional config file and the environment.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub openai_api_key: Option<String>,
    #[serde(default = "default_openai_model")]
    pub openai_model: String,
    #[serde(default = "default_openai_base_url")]
    pub openai_base_url: String,
    #[serde(default = "default_google_base_url")]
    pub google_base_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_openai_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_google_base_url() -> String {
    "https://translate.googleapis.com".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_allowed_origins() -> Vec<String> {
    [5173, 5174, 5175]
        .iter()
        .flat_map(|port| {
            [
                format!("http://localhost:{}", port),
                format!("http://127.0.0.1:{}", port),
            ]
        })
        .collect()
}

impl Config {
    /// Load configuration from `CONFIG_PATH` (or `translator.*` if present) and the process environment.
    ///
    /// Only `TRANSLATOR_*` variables are read as config keys, plus the bare `PORT` and
    /// `OPENAI_API_KEY`, which take precedence.
    pub fn load() -> Result<Self> {
        let vars: config::Map<String, String> = std::env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .collect();
        let path = vars.get("CONFIG_PATH").cloned();
        Self::build(path.as_deref(), &vars)
    }

    fn build(path: Option<&str>, vars: &config::Map<String, String>) -> Result<Self> {
        let file = match path {
            Some(p) => config::File::with_name(p).required(true),
            None => config::File::with_name("translator").required(false),
        };

        let port = vars
            .get("PORT")
            .map(|port| port.trim().parse::<u16>())
            .transpose()
            .context("PORT must be a number between 0 and 65535")?;

        let settings = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("allowed_origins")
                    .source(Some(vars.clone())),
            )
            .set_override_option("port", port.map(i64::from))?
            .set_override_option("openai_api_key", vars.get("OPENAI_API_KEY").cloned())?
            .build()?;

        let config: Config = settings.try_deserialize()?;
        Ok(config)
    }

    /// The chat-model credential, ignoring blank values.
    pub fn openai_api_key(&self) -> Option<&str> {
        self.openai_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            openai_api_key: None,
            openai_model: default_openai_model(),
            openai_base_url: default_openai_base_url(),
            google_base_url: default_google_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            allowed_origins: default_allowed_origins(),
        }
    }
}
