//! Application configuration
//!
//! Handles loading and managing configuration from config.json

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::Duration;

use crate::cddb::charset::DEFAULT_ENCODING;
use crate::cddb::client::DEFAULT_TIMEOUT_SECS;
use crate::cddb::{AppIdentity, ClientSettings, DEFAULT_PROTO_LEVEL};

/// Global application config
static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Get the global application config
pub fn get_config() -> &'static AppConfig {
    APP_CONFIG.get_or_init(AppConfig::load)
}

/// Root application configuration
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub cddb: CddbConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

/// CDDB server settings
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CddbConfig {
    #[serde(default = "default_cgi_url")]
    pub cgi_url: String,
    /// Hello user name; must be set here or on the command line
    #[serde(default)]
    pub user: String,
    /// Hello host name; must be set here or on the command line
    #[serde(default)]
    pub host: String,
    #[serde(default = "default_encoding")]
    pub encoding: String,
    #[serde(default = "default_proto")]
    pub proto: u8,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_cgi_url() -> String {
    "http://gnudb.gnudb.org/~cddb/cddb.cgi".to_string()
}

fn default_encoding() -> String {
    DEFAULT_ENCODING.to_string()
}

fn default_proto() -> u8 {
    DEFAULT_PROTO_LEVEL
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for CddbConfig {
    fn default() -> Self {
        Self {
            cgi_url: default_cgi_url(),
            user: String::new(),
            host: String::new(),
            encoding: default_encoding(),
            proto: default_proto(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl CddbConfig {
    /// Client settings for this server
    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            cgi_base: self.cgi_url.clone(),
            user: self.user.clone(),
            host: self.host.clone(),
            app: AppIdentity::default(),
            proto: self.proto,
            encoding: self.encoding.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

/// Settings for files written after a lookup
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ExportConfig {
    /// Encoding for saved XMCD files; the response encoding when unset
    #[serde(default)]
    pub out_encoding: Option<String>,
    #[serde(default = "default_cdplayer_ini_encoding")]
    pub cdplayer_ini_encoding: String,
}

fn default_cdplayer_ini_encoding() -> String {
    "utf-8".to_string()
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            out_encoding: None,
            cdplayer_ini_encoding: default_cdplayer_ini_encoding(),
        }
    }
}

impl AppConfig {
    /// Load configuration from config.json
    pub fn load() -> Self {
        // Try to load from current directory first
        if let Ok(config) = Self::load_from_path("config.json") {
            log::info!("Loaded config from ./config.json");
            return config;
        }

        // Try to load from executable directory
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let config_path = exe_dir.join("config.json");
                if let Ok(config) = Self::load_from_path(&config_path) {
                    log::info!("Loaded config from {}", config_path.display());
                    return config;
                }
            }
        }

        log::info!("No config.json found, using defaults");
        Self::default()
    }

    fn load_from_path(path: impl Into<PathBuf>) -> Result<Self, Box<dyn std::error::Error>> {
        let path = path.into();
        let content = fs::read_to_string(&path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        Ok(config)
    }
}
