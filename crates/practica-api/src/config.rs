use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PracticaConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    #[serde(default)]
    pub backend: BackendConfig,
    /// Store the demo staff on startup when there are no professionals.
    #[serde(default)]
    pub seed_demo_data: bool,
    pub created_at: jiff::Timestamp,
}

/// Where the roster is persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BackendConfig {
    #[default]
    Memory,
    File {
        path: PathBuf,
    },
    S3 {
        bucket: String,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        region: Option<String>,
    },
}

impl BackendConfig {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::File { .. } => "file",
            Self::S3 { .. } => "s3",
        }
    }
}

impl Default for PracticaConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            bind_addr: default_bind_addr(),
            backend: BackendConfig::default(),
            seed_demo_data: false,
            created_at: jiff::Timestamp::now(),
        }
    }
}

fn default_bind_addr() -> String {
    DEFAULT_BIND_ADDR.to_string()
}

pub fn config_dir() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("practica"))
}

/// `PRACTICA_CONFIG` if set, otherwise `config.json` in [`config_dir`].
pub fn config_path() -> eyre::Result<PathBuf> {
    match std::env::var_os("PRACTICA_CONFIG") {
        Some(path) => Ok(PathBuf::from(path)),
        None => Ok(config_dir()?.join("config.json")),
    }
}

fn default_data_file() -> eyre::Result<PathBuf> {
    let base = dirs::data_dir().ok_or_else(|| eyre::eyre!("no data directory found"))?;
    Ok(base.join("practica").join("roster.json"))
}

pub fn load_config_from(path: &Path) -> eyre::Result<PracticaConfig> {
    let (config, _on_disk_version) = read_config(path)?;
    Ok(config)
}

/// Load and migrate, also returning the version found on disk.
fn read_config(path: &Path) -> eyre::Result<(PracticaConfig, u32)> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0);
    let on_disk_version = u32::try_from(on_disk_version)
        .map_err(|_| eyre::eyre!("config_version {on_disk_version} is out of range"))?;

    let migrated = migrate(json, on_disk_version)?;
    let config: PracticaConfig = serde_json::from_value(migrated)?;
    Ok((config, on_disk_version))
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION})"
        ));
    }

    // v0 → v1: top-level `data_file` becomes a file backend
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        if let Some(data_file) = obj.remove("data_file")
            && !obj.contains_key("backend")
        {
            obj.insert(
                "backend".to_string(),
                serde_json::json!({ "type": "file", "path": data_file }),
            );
        }
        obj.entry("created_at")
            .or_insert_with(|| serde_json::Value::String(jiff::Timestamp::now().to_string()));
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (data_file moved to backend)");
    }

    Ok(json)
}

pub fn save_config_to(path: &Path, config: &PracticaConfig) -> eyre::Result<()> {
    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        std::fs::create_dir_all(dir)?;
    }

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;
    let json = serde_json::to_string_pretty(&stamped)?;

    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(&tmp_path, path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}

/// Apply `PRACTICA_*` overrides on top of a loaded config.
///
/// `PRACTICA_BACKEND` picks the backend explicitly. Without it, setting
/// `PRACTICA_DATA_FILE` selects the file backend and `PRACTICA_BUCKET` the S3
/// one. `AWS_REGION` only applies to S3.
pub fn apply_env_overrides(
    config: &mut PracticaConfig,
    var: impl Fn(&str) -> Option<String>,
) -> eyre::Result<()> {
    if let Some(bind) = var("PRACTICA_BIND") {
        config.bind_addr = bind;
    }

    let data_file = var("PRACTICA_DATA_FILE").map(PathBuf::from);
    let bucket = var("PRACTICA_BUCKET");

    let kind = match var("PRACTICA_BACKEND") {
        Some(kind) => Some(kind.trim().to_ascii_lowercase()),
        None if data_file.is_some() => Some("file".to_string()),
        None if bucket.is_some() => Some("s3".to_string()),
        None => None,
    };

    if let Some(kind) = kind {
        config.backend = match (kind.as_str(), &config.backend) {
            ("memory", _) => BackendConfig::Memory,
            ("file", current) => {
                let path = match (data_file, current) {
                    (Some(path), _) => path,
                    (None, BackendConfig::File { path }) => path.clone(),
                    (None, _) => default_data_file()?,
                };
                BackendConfig::File { path }
            }
            ("s3", current) => {
                let (current_bucket, current_region) = match current {
                    BackendConfig::S3 { bucket, region } => (Some(bucket.clone()), region.clone()),
                    _ => (None, None),
                };
                let bucket = bucket.or(current_bucket).ok_or_else(|| {
                    eyre::eyre!("the s3 backend needs PRACTICA_BUCKET or a bucket in the config")
                })?;
                BackendConfig::S3 {
                    bucket,
                    region: current_region,
                }
            }
            (other, _) => {
                return Err(eyre::eyre!(
                    "unknown backend {other:?} (expected memory, file or s3)"
                ));
            }
        };
    }

    if let (Some(new_region), BackendConfig::S3 { region, .. }) =
        (var("AWS_REGION"), &mut config.backend)
    {
        *region = Some(new_region);
    }

    Ok(())
}

/// The effective config, read from [`config_path`] with the process
/// environment applied on top.
pub fn resolve_config() -> eyre::Result<PracticaConfig> {
    resolve_config_at(&config_path()?, |key| std::env::var(key).ok())
}

/// Load the config at `path`, then apply `var` overrides.
///
/// A missing file is created with defaults, and an older file is written back
/// at the current version. Overrides are never saved.
pub fn resolve_config_at(
    path: &Path,
    var: impl Fn(&str) -> Option<String>,
) -> eyre::Result<PracticaConfig> {
    let mut config = if path.exists() {
        let (config, on_disk_version) = read_config(path)?;
        if on_disk_version < CURRENT_VERSION {
            save_config_to(path, &config)?;
        }
        tracing::info!(path = %path.display(), "config loaded");
        config
    } else {
        let config = PracticaConfig::default();
        save_config_to(path, &config)?;
        tracing::info!(path = %path.display(), "no config file, wrote defaults");
        config
    };

    apply_env_overrides(&mut config, var)?;
    Ok(config)
}
