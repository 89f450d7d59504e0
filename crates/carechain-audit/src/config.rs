//! TOML-driven configuration for the audit crates.
//!
//! ```toml
//! default_page_size = 50
//! max_page_size = 500
//! redact_keys = ["password", "token", "otp_secret"]
//! ```
//!
//! Every field is optional; omitted fields take the defaults below.

use std::path::Path;

use serde::Deserialize;

use carechain_contracts::{AuditError, AuditResult};

use crate::redact::Redactor;

const DEFAULT_PAGE_SIZE: usize = 50;
const DEFAULT_MAX_PAGE_SIZE: usize = 500;

/// Configuration shared by the writer and reader.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Page size used when a query asks for `limit = 0`.
    pub default_page_size: usize,

    /// Hard ceiling on a single query page.
    pub max_page_size: usize,

    /// Detail keys the writer's redaction hook strips before hashing.
    pub redact_keys: Vec<String>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
            redact_keys: Vec::new(),
        }
    }
}

impl AuditConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> AuditResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| AuditError::Storage {
            reason: format!("failed to read config '{}': {e}", path.display()),
        })?;
        Self::from_toml_str(&text)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(text: &str) -> AuditResult<Self> {
        toml::from_str(text).map_err(|e| AuditError::Encoding {
            reason: format!("malformed audit config: {e}"),
        })
    }

    /// Build the writer's redaction hook, if any keys are configured.
    pub fn redactor(&self) -> Option<Redactor> {
        if self.redact_keys.is_empty() {
            None
        } else {
            Some(Redactor::new(self.redact_keys.iter().cloned()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_fields_omitted() {
        let config = AuditConfig::from_toml_str("").unwrap();
        assert_eq!(config.default_page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.max_page_size, DEFAULT_MAX_PAGE_SIZE);
        assert!(config.redactor().is_none());
    }

    #[test]
    fn parses_all_fields() {
        let toml = r#"
            default_page_size = 25
            max_page_size = 100
            redact_keys = ["password", "token"]
        "#;

        let config = AuditConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.default_page_size, 25);
        assert_eq!(config.max_page_size, 100);
        assert!(config.redactor().is_some());
    }

    #[test]
    fn malformed_toml_is_an_encoding_error() {
        let err = AuditConfig::from_toml_str("max_page_size = \"lots\"").unwrap_err();
        assert!(matches!(err, AuditError::Encoding { .. }));
    }
}
