//! Settings structures for Prolific configuration

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Main settings structure matching `settings.yml`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub server: ServerSettings,
    pub outgoing: OutgoingSettings,
    pub search: SearchApiSettings,
    pub llm: LlmSettings,
    pub ui: UiSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            general: GeneralSettings::default(),
            server: ServerSettings::default(),
            outgoing: OutgoingSettings::default(),
            search: SearchApiSettings::default(),
            llm: LlmSettings::default(),
            ui: UiSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse settings from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(content)?;
        Ok(settings)
    }

    /// Merge with environment variables
    pub fn merge_env(&mut self) {
        self.merge_vars(|key| std::env::var(key).ok());
    }

    /// Merge with values from an arbitrary variable source
    pub fn merge_vars<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("SERPER_API_KEY").or_else(|| lookup("SERP_API_KEY")) {
            self.search.api_key = val;
        }
        if let Some(val) = lookup("GOOGLE_API_KEY") {
            self.llm.api_key = val;
        }
        if let Some(val) = lookup("PROLIFIC_DEBUG") {
            self.general.debug = val.parse().unwrap_or(false);
        }
        if let Some(val) = lookup("PROLIFIC_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = lookup("PROLIFIC_BIND_ADDRESS") {
            self.server.bind_address = val;
        }
        if let Some(val) = lookup("PROLIFIC_MODEL") {
            self.llm.model = val;
        }
    }

    /// Check that both API keys are present and endpoints parse
    pub fn validate(&self) -> Result<()> {
        if self.search.api_key.trim().is_empty() {
            bail!("search API key is missing (set SERPER_API_KEY or search.api_key)");
        }
        if self.llm.api_key.trim().is_empty() {
            bail!("generative API key is missing (set GOOGLE_API_KEY or llm.api_key)");
        }
        if self.llm.model.trim().is_empty() {
            bail!("llm.model must not be empty");
        }
        Url::parse(&self.search.base_url)
            .map_err(|e| anyhow::anyhow!("invalid search.base_url: {}", e))?;
        Url::parse(&self.llm.base_url)
            .map_err(|e| anyhow::anyhow!("invalid llm.base_url: {}", e))?;
        check_timeout("search.timeout", self.search.timeout)?;
        check_timeout("llm.timeout", self.llm.timeout)?;
        Ok(())
    }
}

/// Timeouts must be finite, positive and representable as a `Duration`
fn check_timeout(name: &str, secs: f64) -> Result<()> {
    match Duration::try_from_secs_f64(secs) {
        Ok(duration) if !duration.is_zero() => Ok(()),
        Ok(_) => bail!("{} must be greater than zero", name),
        Err(e) => bail!("invalid {} ({}): {}", name, secs, e),
    }
}

/// General settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Enable debug logging
    pub debug: bool,
    /// Instance name displayed in the page title
    pub instance_name: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            debug: false,
            instance_name: "Prolific".to_string(),
        }
    }
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Server port
    pub port: u16,
    /// Bind address
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 8888,
            bind_address: "127.0.0.1".to_string(),
        }
    }
}

/// Outgoing request settings shared by both API clients
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Pool max size
    pub pool_maxsize: usize,
    /// Verify SSL certificates
    pub verify_ssl: bool,
    /// Proxy settings
    pub proxies: ProxySettings,
    /// Extra headers to send
    pub extra_headers: HashMap<String, String>,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            pool_maxsize: 20,
            verify_ssl: true,
            proxies: ProxySettings::default(),
            extra_headers: HashMap::new(),
        }
    }
}

/// Proxy settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    pub http: Option<String>,
    pub https: Option<String>,
    pub all: Option<String>,
}

/// Search provider (Serper) settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchApiSettings {
    /// Search endpoint
    pub base_url: String,
    /// Value of the `X-API-KEY` header
    #[serde(skip_serializing)]
    pub api_key: String,
    /// Request timeout in seconds
    pub timeout: f64,
}

impl Default for SearchApiSettings {
    fn default() -> Self {
        Self {
            base_url: "https://google.serper.dev/search".to_string(),
            api_key: String::new(),
            timeout: 10.0,
        }
    }
}

impl SearchApiSettings {
    /// Request timeout, falling back to 10 seconds when the value is unusable
    pub fn timeout(&self) -> Duration {
        Duration::try_from_secs_f64(self.timeout)
            .ok()
            .filter(|d| !d.is_zero())
            .unwrap_or(Duration::from_secs(10))
    }
}

/// Text-generation provider (Gemini) settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    /// API root, without the version segment
    pub base_url: String,
    /// Model identifier
    pub model: String,
    /// Generative Language API key
    #[serde(skip_serializing)]
    pub api_key: String,
    /// Request timeout in seconds
    pub timeout: f64,
    /// Sampling temperature (provider default when unset)
    pub temperature: Option<f32>,
    /// Output token cap (provider default when unset)
    pub max_output_tokens: Option<u32>,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-2.5-flash".to_string(),
            api_key: String::new(),
            timeout: 60.0,
            temperature: None,
            max_output_tokens: None,
        }
    }
}

impl LlmSettings {
    /// Request timeout, falling back to 60 seconds when the value is unusable
    pub fn timeout(&self) -> Duration {
        Duration::try_from_secs_f64(self.timeout)
            .ok()
            .filter(|d| !d.is_zero())
            .unwrap_or(Duration::from_secs(60))
    }
}

/// UI settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Related searches offered before the first query
    pub initial_suggestions: Vec<String>,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            initial_suggestions: vec![
                "tell me something about procedure technologies".to_string(),
                "please give information about last9".to_string(),
            ],
        }
    }
}
