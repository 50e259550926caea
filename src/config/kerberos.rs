//! Kerberos configuration for the authenticated connection path.
//!
//! Discovery never authenticates by itself; these settings only decide
//! whether describe calls ask the connection provider for a ticketed
//! connection, and carry what the provider needs to obtain one.
//!
//! Supports configuration via environment variables:
//! - `DISCOVERY_KERBEROS_ENABLED`: `true`/`1`/`yes` to enable
//! - `DISCOVERY_KERBEROS_PRINCIPAL`: Kerberos principal
//! - `DISCOVERY_KERBEROS_KEYTAB`: Path to the keytab file
//! - `DISCOVERY_KERBEROS_KRB5_CONF`: Path to krb5.conf (optional)

use std::env;

use serde::{Deserialize, Serialize};

use super::settings::{expand_env_vars, SettingsError};

/// Kerberos ticket settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct KerberosSettings {
    /// Use the authenticated connection path.
    pub enabled: bool,

    /// Principal to obtain tickets for (supports ${ENV_VAR} expansion).
    pub principal: Option<String>,

    /// Keytab location (supports ${ENV_VAR} expansion).
    pub keytab: Option<String>,

    /// Alternate krb5.conf location.
    pub krb5_conf: Option<String>,
}

impl KerberosSettings {
    /// Load Kerberos settings from environment variables.
    ///
    /// Missing variables leave Kerberos disabled.
    pub fn from_env() -> Result<Self, SettingsError> {
        let enabled = env::var("DISCOVERY_KERBEROS_ENABLED")
            .map(|v| matches!(v.trim().to_lowercase().as_str(), "true" | "1" | "yes"))
            .unwrap_or(false);

        let settings = Self {
            enabled,
            principal: env::var("DISCOVERY_KERBEROS_PRINCIPAL").ok(),
            keytab: env::var("DISCOVERY_KERBEROS_KEYTAB").ok(),
            krb5_conf: env::var("DISCOVERY_KERBEROS_KRB5_CONF").ok(),
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Check that an enabled configuration names a principal and a keytab.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !self.enabled {
            return Ok(());
        }
        if self.principal.as_deref().map_or(true, |p| p.trim().is_empty()) {
            return Err(SettingsError::InvalidConfig(
                "kerberos is enabled but no principal is configured".to_string(),
            ));
        }
        if self.keytab.as_deref().map_or(true, |k| k.trim().is_empty()) {
            return Err(SettingsError::InvalidConfig(
                "kerberos is enabled but no keytab is configured".to_string(),
            ));
        }
        Ok(())
    }

    /// Get a copy with environment variables expanded in every path and name.
    pub fn resolved(&self) -> Result<Self, SettingsError> {
        let expand = |value: &Option<String>| -> Result<Option<String>, SettingsError> {
            value.as_deref().map(expand_env_vars).transpose()
        };
        Ok(Self {
            enabled: self.enabled,
            principal: expand(&self.principal)?,
            keytab: expand(&self.keytab)?,
            krb5_conf: expand(&self.krb5_conf)?,
        })
    }
}
