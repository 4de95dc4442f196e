// workorder-generation-service/src/config.rs

use config::{Config as ConfigLoader, ConfigError, Environment, File};
use serde::Deserialize;

use crate::crm::CrmConfig;
use crate::models::DocumentFormat;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub crm: CrmConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    pub output_dir: String,
    /// Formats rendered when a request does not name any.
    pub default_formats: Vec<DocumentFormat>,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let config = ConfigLoader::builder()
            // Start with default values
            .set_default("service.name", "workorder-generation-service")?
            .set_default("service.log_level", "info")?
            .set_default("crm.subdomain", "")?
            .set_default("crm.access_token", "")?
            .set_default("export.output_dir", "./out")?
            .set_default("export.default_formats", vec!["docx"])?
            // Load from config file if it exists
            .add_source(File::with_name("config").required(false))
            // Override with environment variables (e.g., SERVICE__CRM__SUBDOMAIN)
            .add_source(Environment::with_prefix("SERVICE").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
