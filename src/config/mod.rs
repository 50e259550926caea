//! Configuration module.
//!
//! Handles the discovery settings file, Kerberos settings and environment
//! variable expansion.

mod kerberos;
mod settings;

pub use kerberos::KerberosSettings;
pub use settings::{
    expand_env_vars, DiscoverySettings, Settings, SettingsError, CONFIG_PATH_ENV, LOCAL_CONFIG_FILE,
};
