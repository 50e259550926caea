//! Discovery settings file.
//!
//! Settings are read from TOML. String values in the `[kerberos]` table may
//! reference environment variables as `${VAR}` or `$VAR`; they are expanded
//! only when Kerberos is enabled.
//!
//! ```toml
//! [discovery]
//! table_types = ["TABLE", "VIEW"]
//!
//! [kerberos]
//! enabled = true
//! principal = "${KRB_PRINCIPAL}"
//! keytab = "/etc/security/keytabs/ingest.keytab"
//! ```

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::kerberos::KerberosSettings;
use crate::discovery::DEFAULT_TABLE_TYPES;

/// Environment variable naming an explicit settings file.
pub const CONFIG_PATH_ENV: &str = "DISCOVERY_CONFIG";

/// Settings file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "discovery.toml";

/// `${NAME}` or `$NAME`.
static ENV_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([^}]*)\}|\$([A-Za-z0-9_]+)").expect("env reference regex is valid")
});

/// Errors loading or validating settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("settings file {} does not exist", .0.display())]
    FileNotFound(PathBuf),

    #[error("unable to read settings: {0}")]
    ReadError(#[from] io::Error),

    #[error("malformed settings: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("environment variable `{0}` is referenced but not set")]
    MissingEnvVar(String),

    #[error("invalid settings: {0}")]
    InvalidConfig(String),
}

/// Everything a discoverer can be configured with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub discovery: DiscoverySettings,
    pub kerberos: KerberosSettings,
}

/// The `[discovery]` table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DiscoverySettings {
    /// Table types requested from table enumerations.
    pub table_types: Vec<String>,
}

impl Default for DiscoverySettings {
    fn default() -> Self {
        Self {
            table_types: DEFAULT_TABLE_TYPES.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl Settings {
    /// Parse, expand and validate settings text.
    ///
    /// A disabled `[kerberos]` table is kept verbatim.
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        let mut settings: Settings = toml::from_str(content)?;
        if settings.kerberos.enabled {
            settings.kerberos = settings.kerberos.resolved()?;
        }
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from `path`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => SettingsError::FileNotFound(path.to_path_buf()),
            _ => SettingsError::ReadError(err),
        })?;
        Self::from_toml(&content)
    }

    /// Read settings from the first location that has them.
    ///
    /// `DISCOVERY_CONFIG` wins when set, and must then point at a readable
    /// file. Otherwise the [`candidate_paths`](Self::candidate_paths) are
    /// tried in order, falling back to defaults when none exists.
    pub fn load() -> Result<Self, SettingsError> {
        if let Some(explicit) = env::var_os(CONFIG_PATH_ENV) {
            return Self::from_file(PathBuf::from(explicit));
        }

        match Self::candidate_paths().into_iter().find(|p| p.is_file()) {
            Some(path) => Self::from_file(path),
            None => Ok(Settings::default()),
        }
    }

    /// Implicit settings locations, most specific first: `./discovery.toml`,
    /// then `rdbms-discovery/config.toml` in the user config directory.
    pub fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
        paths.extend(
            dirs::config_dir().map(|dir| dir.join("rdbms-discovery").join("config.toml")),
        );
        paths
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.discovery.table_types.iter().any(|t| t.trim().is_empty()) {
            return Err(SettingsError::InvalidConfig(
                "discovery.table_types must not contain blank entries".to_string(),
            ));
        }
        self.kerberos.validate()
    }
}

/// Substitute `${VAR}` and `$VAR` references with environment values.
///
/// A `$` not followed by a name is kept as is. Referencing an unset
/// variable is an error.
pub fn expand_env_vars(input: &str) -> Result<String, SettingsError> {
    let mut expanded = String::with_capacity(input.len());
    let mut copied_to = 0;

    for caps in ENV_REFERENCE.captures_iter(input) {
        let Some(reference) = caps.get(0) else {
            continue;
        };
        let name = caps
            .get(1)
            .or_else(|| caps.get(2))
            .map_or("", |m| m.as_str());
        let value =
            env::var(name).map_err(|_| SettingsError::MissingEnvVar(name.to_string()))?;

        expanded.push_str(&input[copied_to..reference.start()]);
        expanded.push_str(&value);
        copied_to = reference.end();
    }

    expanded.push_str(&input[copied_to..]);
    Ok(expanded)
}
