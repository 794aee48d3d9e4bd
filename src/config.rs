// astro-report-service/src/config.rs

use config::{Config as ConfigLoader, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub server: ServerConfig,
    pub backend: BackendConfig,
    pub pdf: PdfConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub bind: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PdfConfig {
    /// Path to a Devanagari-capable TTF, loaded once per process.
    pub devanagari_font: String,
    /// Branding line stamped into every page footer.
    pub branding: String,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let config = ConfigLoader::builder()
            // Start with default values
            .set_default("service.name", "astro-report-service")?
            .set_default("service.log_level", "info")?
            .set_default("server.bind", "0.0.0.0:8080")?
            .set_default("backend.base_url", "http://localhost:9000/v1")?
            .set_default("backend.timeout_secs", "20")?
            .set_default(
                "pdf.devanagari_font",
                "./fonts/NotoSansDevanagari-Regular.ttf",
            )?
            .set_default("pdf.branding", "astro-report-service")?
            // Load from config file if it exists
            .add_source(File::with_name("config").required(false))
            // Override with environment variables (e.g., SERVICE__BACKEND__BASE_URL)
            .add_source(Environment::with_prefix("SERVICE").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
