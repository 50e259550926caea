//! Settings files, Kerberos configuration and their effect on discovery.

#[path = "../common/mod.rs"]
mod common;

use std::env;
use std::fs;
use std::path::PathBuf;

use common::{schema_vendor, RecordingProvider};
use rdbms_discovery::config::{KerberosSettings, Settings, SettingsError};
use rdbms_discovery::discovery::SchemaDiscoverer;

fn temp_path(name: &str) -> PathBuf {
    env::temp_dir().join(format!("rdbms-discovery-{}-{}", std::process::id(), name))
}

#[test]
fn test_parse_full_settings() {
    env::set_var("SETTINGS_TEST_REALM", "EXAMPLE.COM");
    let settings = Settings::from_toml(
        r#"
[discovery]
table_types = ["TABLE"]

[kerberos]
enabled = true
principal = "ingest@${SETTINGS_TEST_REALM}"
keytab = "/etc/security/keytabs/ingest.keytab"
krb5_conf = "/etc/krb5.conf"
"#,
    )
    .unwrap();
    env::remove_var("SETTINGS_TEST_REALM");

    assert_eq!(settings.discovery.table_types, vec!["TABLE"]);
    assert!(settings.kerberos.enabled);
    assert_eq!(
        settings.kerberos.principal.as_deref(),
        Some("ingest@EXAMPLE.COM")
    );
    assert_eq!(settings.kerberos.krb5_conf.as_deref(), Some("/etc/krb5.conf"));
}

#[test]
fn test_empty_settings_use_defaults() {
    let settings = Settings::from_toml("").unwrap();
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.discovery.table_types, vec!["TABLE", "VIEW"]);
}

#[test]
fn test_kerberos_without_keytab_is_rejected() {
    let result = Settings::from_toml(
        r#"
[kerberos]
enabled = true
principal = "ingest@EXAMPLE.COM"
"#,
    );
    match result {
        Err(SettingsError::InvalidConfig(message)) => assert!(message.contains("keytab")),
        other => panic!("expected InvalidConfig, got {:?}", other),
    }
}

#[test]
fn test_missing_env_var() {
    let result = Settings::from_toml(
        r#"
[kerberos]
enabled = true
principal = "${SETTINGS_TEST_UNSET_PRINCIPAL_9876}"
keytab = "/keytabs/ingest.keytab"
"#,
    );
    match result {
        Err(SettingsError::MissingEnvVar(name)) => {
            assert_eq!(name, "SETTINGS_TEST_UNSET_PRINCIPAL_9876")
        }
        other => panic!("expected MissingEnvVar, got {:?}", other),
    }
}

#[test]
fn test_disabled_kerberos_is_kept_verbatim() {
    let settings = Settings::from_toml(
        r#"
[kerberos]
enabled = false
principal = "${SETTINGS_TEST_UNSET_DISABLED_PRINCIPAL_5150}"
"#,
    )
    .unwrap();

    assert!(!settings.kerberos.enabled);
    assert_eq!(
        settings.kerberos.principal.as_deref(),
        Some("${SETTINGS_TEST_UNSET_DISABLED_PRINCIPAL_5150}")
    );
}

#[test]
fn test_invalid_toml() {
    let result = Settings::from_toml("[discovery\ntable_types = 1");
    assert!(matches!(result, Err(SettingsError::ParseError(_))));
}

#[test]
fn test_wrong_value_type() {
    let result = Settings::from_toml("[discovery]\ntable_types = \"TABLE\"");
    assert!(matches!(result, Err(SettingsError::ParseError(_))));
}

#[test]
fn test_from_file() {
    let path = temp_path("discovery.toml");
    fs::write(&path, "[discovery]\ntable_types = [\"VIEW\"]\n").unwrap();

    let settings = Settings::from_file(&path).unwrap();
    fs::remove_file(&path).unwrap();

    assert_eq!(settings.discovery.table_types, vec!["VIEW"]);
    assert!(!settings.kerberos.enabled);
}

#[test]
fn test_from_missing_file() {
    let path = temp_path("missing.toml");
    match Settings::from_file(&path) {
        Err(SettingsError::FileNotFound(reported)) => assert_eq!(reported, path),
        other => panic!("expected FileNotFound, got {:?}", other),
    }
}

#[test]
fn test_load_from_env_path() {
    let path = temp_path("load.toml");
    fs::write(&path, "[discovery]\ntable_types = [\"TABLE\", \"SYNONYM\"]\n").unwrap();

    env::set_var("DISCOVERY_CONFIG", &path);
    let settings = Settings::load();
    env::remove_var("DISCOVERY_CONFIG");
    fs::remove_file(&path).unwrap();

    assert_eq!(
        settings.unwrap().discovery.table_types,
        vec!["TABLE", "SYNONYM"]
    );
}

#[test]
fn test_kerberos_from_env() {
    env::set_var("DISCOVERY_KERBEROS_ENABLED", "yes");
    env::set_var("DISCOVERY_KERBEROS_PRINCIPAL", "svc@EXAMPLE.COM");
    env::set_var("DISCOVERY_KERBEROS_KEYTAB", "/keytabs/svc.keytab");
    let settings = KerberosSettings::from_env();
    env::remove_var("DISCOVERY_KERBEROS_ENABLED");
    env::remove_var("DISCOVERY_KERBEROS_PRINCIPAL");
    env::remove_var("DISCOVERY_KERBEROS_KEYTAB");

    let settings = settings.unwrap();
    assert!(settings.enabled);
    assert_eq!(settings.principal.as_deref(), Some("svc@EXAMPLE.COM"));
    assert_eq!(settings.krb5_conf, None);
}

#[test]
fn test_settings_drive_discovery() {
    let settings = Settings::from_toml(
        r#"
[discovery]
table_types = ["VIEW"]

[kerberos]
enabled = true
principal = "ingest@EXAMPLE.COM"
keytab = "/keytabs/ingest.keytab"
"#,
    )
    .unwrap();

    let provider = RecordingProvider::new(schema_vendor());
    let discoverer = SchemaDiscoverer::from_settings(provider.clone(), &settings);
    assert!(discoverer.options().authenticated);
    assert_eq!(discoverer.options().table_types, vec!["VIEW"]);

    assert_eq!(
        discoverer.list_tables(None, None).unwrap(),
        vec!["SALES.ORDER_SUMMARY"]
    );
    // Listing stays on the plain path
    assert!(provider.authenticated_requests().iter().all(|a| !a));

    discoverer
        .describe_table(None, "ORDER_SUMMARY")
        .unwrap()
        .expect("view exists");
    assert_eq!(provider.authenticated_requests().last(), Some(&true));
    assert_eq!(discoverer.provider().open_connections(), 0);
}
