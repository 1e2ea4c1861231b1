use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use folio_contact::Recipient;
use folio_notification::EmailConfig;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub contact: ContactConfig,
    #[serde(default)]
    pub email: EmailConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ContactConfig {
    /// Display name of the person receiving contact messages
    pub recipient_name: String,
    /// Address every contact message is delivered to
    pub recipient_address: String,
}

impl ContactConfig {
    pub fn recipient(&self) -> Recipient {
        Recipient::new(&self.recipient_name, &self.recipient_address)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (FOLIO__CONTACT__RECIPIENT_ADDRESS, etc.)
    /// 2. Config file specified by path
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("contact.recipient_name", "Portfolio Owner")?
            .set_default("contact.recipient_address", "")?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Config file is optional
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("FOLIO")
                .separator("__")
                .try_parsing(true),
        );

        if let Ok(smtp_password) = env::var("SMTP_PASSWORD") {
            builder = builder.set_override("email.smtp_password", smtp_password)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.contact.recipient_address.trim().is_empty() {
            return Err("Contact recipient_address must be set".to_string());
        }
        if !self.contact.recipient_address.contains('@') {
            return Err("Contact recipient_address must be an email address".to_string());
        }
        if self.email.from_address.trim().is_empty() {
            return Err("Email from_address must be set".to_string());
        }
        if self.email.smtp_port == 0 {
            return Err("SMTP port must be greater than 0".to_string());
        }
        Ok(())
    }
}
