use std::collections::HashMap;
use std::path::PathBuf;

use practica_api::config::{
    BackendConfig, PracticaConfig, apply_env_overrides, load_config_from, resolve_config_at,
    save_config_to,
};

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn save_then_load_keeps_the_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.json");

    let config = PracticaConfig {
        bind_addr: "127.0.0.1:8080".to_string(),
        backend: BackendConfig::S3 {
            bucket: "roster".to_string(),
            region: Some("us-east-1".to_string()),
        },
        seed_demo_data: true,
        ..PracticaConfig::default()
    };
    save_config_to(&path, &config).unwrap();

    let loaded = load_config_from(&path).unwrap();
    assert_eq!(loaded, config);
    assert!(!path.with_extension("json.tmp").exists());

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}

#[test]
fn v0_data_file_becomes_file_backend() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{ "bind_addr": "0.0.0.0:4000", "data_file": "/var/lib/practica/roster.json" }"#,
    )
    .unwrap();

    let config = load_config_from(&path).unwrap();
    assert_eq!(config.config_version, 1);
    assert_eq!(config.bind_addr, "0.0.0.0:4000");
    assert_eq!(
        config.backend,
        BackendConfig::File {
            path: PathBuf::from("/var/lib/practica/roster.json")
        }
    );
}

#[test]
fn newer_config_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{ "config_version": 99, "created_at": "2024-01-01T00:00:00Z" }"#,
    )
    .unwrap();

    let err = load_config_from(&path).unwrap_err();
    assert!(err.to_string().contains("newer"), "{err}");
}

#[test]
fn missing_fields_take_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{ "config_version": 1, "created_at": "2024-01-01T00:00:00Z" }"#,
    )
    .unwrap();

    let config = load_config_from(&path).unwrap();
    assert_eq!(config.bind_addr, "0.0.0.0:3000");
    assert_eq!(config.backend, BackendConfig::Memory);
    assert!(!config.seed_demo_data);
}

#[test]
fn data_file_override_selects_file_backend() {
    let mut config = PracticaConfig::default();
    apply_env_overrides(
        &mut config,
        env(&[("PRACTICA_DATA_FILE", "/tmp/roster.json"), ("PRACTICA_BIND", "127.0.0.1:9000")]),
    )
    .unwrap();

    assert_eq!(config.bind_addr, "127.0.0.1:9000");
    assert_eq!(
        config.backend,
        BackendConfig::File {
            path: PathBuf::from("/tmp/roster.json")
        }
    );
}

#[test]
fn s3_override_keeps_configured_region_unless_set() {
    let mut config = PracticaConfig {
        backend: BackendConfig::S3 {
            bucket: "old".to_string(),
            region: Some("eu-west-1".to_string()),
        },
        ..PracticaConfig::default()
    };
    apply_env_overrides(&mut config, env(&[("PRACTICA_BUCKET", "new")])).unwrap();
    assert_eq!(
        config.backend,
        BackendConfig::S3 {
            bucket: "new".to_string(),
            region: Some("eu-west-1".to_string()),
        }
    );

    apply_env_overrides(&mut config, env(&[("AWS_REGION", "us-east-2")])).unwrap();
    assert_eq!(
        config.backend,
        BackendConfig::S3 {
            bucket: "new".to_string(),
            region: Some("us-east-2".to_string()),
        }
    );
}

#[test]
fn backend_override_is_validated() {
    let mut config = PracticaConfig::default();
    assert!(apply_env_overrides(&mut config, env(&[("PRACTICA_BACKEND", "s3")])).is_err());
    assert!(apply_env_overrides(&mut config, env(&[("PRACTICA_BACKEND", "redis")])).is_err());
    assert_eq!(config.backend, BackendConfig::Memory);

    apply_env_overrides(&mut config, env(&[("PRACTICA_BACKEND", "Memory")])).unwrap();
    assert_eq!(config.backend, BackendConfig::Memory);
}

#[test]
fn first_run_writes_the_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");

    let config = resolve_config_at(&path, env(&[])).unwrap();

    assert!(path.exists());
    assert_eq!(load_config_from(&path).unwrap(), config);
}

#[test]
fn migrated_config_is_written_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{ "data_file": "/srv/roster.json" }"#).unwrap();

    resolve_config_at(&path, env(&[])).unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["config_version"], 1);
    assert!(raw.get("data_file").is_none());
    assert_eq!(raw["backend"]["path"], "/srv/roster.json");
}

#[test]
fn env_overrides_are_not_saved() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");

    let config = resolve_config_at(&path, env(&[("PRACTICA_BIND", "0.0.0.0:9999")])).unwrap();
    assert_eq!(config.bind_addr, "0.0.0.0:9999");

    let saved = load_config_from(&path).unwrap();
    assert_ne!(saved.bind_addr, "0.0.0.0:9999");
}
