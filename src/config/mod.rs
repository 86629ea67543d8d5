//! Configuration loading and management
//!
//! Secrets and deployment settings come from environment variables; the
//! wording of the confirmation email comes from an optional YAML document.

use crate::core::error::ConfigError;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::PathBuf;

/// SMTP transport settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub login: String,
    pub password: String,
}

impl SmtpConfig {
    /// Implicit TLS port used when `SMTP_PORT` is unset
    pub const DEFAULT_PORT: u16 = 465;

    /// Build from `SMTP_HOST`, `SMTP_PORT`, `SMTP_LOGIN` and `SMTP_PASSWORD`
    ///
    /// Returns `Ok(None)` when `SMTP_HOST` is not set.
    pub fn from_env() -> Result<Option<Self>> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Option<Self>> {
        let Some(host) = lookup("SMTP_HOST").filter(|h| !h.is_empty()) else {
            return Ok(None);
        };

        let port = match lookup("SMTP_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| ConfigError::InvalidValue {
                field: "SMTP_PORT".to_string(),
                value: raw.clone(),
                message: e.to_string(),
            })?,
            None => Self::DEFAULT_PORT,
        };

        Ok(Some(Self {
            host,
            port,
            login: lookup("SMTP_LOGIN").unwrap_or_default(),
            password: lookup("SMTP_PASSWORD").unwrap_or_default(),
        }))
    }
}

/// Event details used in the confirmation email
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EventConfig {
    /// Display name of the event (e.g., "Open Components Hackathon")
    pub event_name: String,

    /// Display name of the sender mailbox
    #[serde(default = "default_sender_name")]
    pub sender_name: String,

    /// Free-form schedule sentence included in the email
    #[serde(default)]
    pub schedule: Option<String>,

    /// Community invite link (chat server, forum, ...)
    #[serde(default)]
    pub community_url: Option<String>,

    /// Emails pre-registered in the in-memory store at startup
    #[serde(default)]
    pub attendees: Vec<String>,
}

fn default_sender_name() -> String {
    "Support".to_string()
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            event_name: "the hackathon".to_string(),
            sender_name: default_sender_name(),
            schedule: None,
            community_url: None,
            attendees: Vec::new(),
        }
    }
}

impl EventConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ConfigError::FileNotFound {
                path: path.to_string(),
            },
            _ => ConfigError::ReadError {
                path: path.to_string(),
                message: e.to_string(),
            },
        })?;
        let config = serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
            source_name: path.to_string(),
            message: e.to_string(),
        })?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config = serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError {
            source_name: "<inline>".to_string(),
            message: e.to_string(),
        })?;
        Ok(config)
    }
}

/// Which form fields feed the chained confirmation after a form submit
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FormConfig {
    /// Field id holding the attendee email; enables the chained confirmation
    pub email_field: Option<String>,

    /// Field id holding the display name
    pub name_field: Option<String>,
}

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub bind_addr: String,
    pub form_schema_path: PathBuf,

    /// Optional salt mixed into user id derivation
    pub email_id_secret: Option<String>,

    pub smtp: Option<SmtpConfig>,
    pub event: EventConfig,
    pub form: FormConfig,
}

impl AppConfig {
    pub const DEFAULT_BIND_ADDR: &'static str = "127.0.0.1:3000";
    pub const DEFAULT_FORM_SCHEMA_PATH: &'static str = "form.json";

    /// Build the configuration from the process environment
    ///
    /// Reads `BIND_ADDR`, `FORM_SCHEMA_PATH`, `EVENT_CONFIG_PATH`,
    /// `EMAIL_TO_ID_SECRET`, `CONFIRM_EMAIL_FIELD`, `CONFIRM_NAME_FIELD` and
    /// the `SMTP_*` variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let event = match lookup("EVENT_CONFIG_PATH") {
            Some(path) => EventConfig::from_yaml_file(&path)?,
            None => EventConfig::default(),
        };

        Ok(Self {
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| Self::DEFAULT_BIND_ADDR.to_string()),
            form_schema_path: lookup("FORM_SCHEMA_PATH")
                .unwrap_or_else(|| Self::DEFAULT_FORM_SCHEMA_PATH.to_string())
                .into(),
            email_id_secret: lookup("EMAIL_TO_ID_SECRET").filter(|s| !s.is_empty()),
            smtp: SmtpConfig::from_lookup(&lookup)?,
            event,
            form: FormConfig {
                email_field: lookup("CONFIRM_EMAIL_FIELD"),
                name_field: lookup("CONFIRM_NAME_FIELD"),
            },
        })
    }
}
