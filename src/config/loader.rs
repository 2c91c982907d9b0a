//! Config file loading

use super::IndexPlanConfig;
use crate::error::{PlanError, Result};
use figment::providers::{Env, Serialized};
use figment::Figment;
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_PREFIX: &str = "INDEX_PLAN_";

/// Load configuration for `workspace`.
///
/// An explicit `config_path` must parse; an auto-discovered file that fails
/// to parse is logged and replaced by defaults. Environment overrides are
/// applied last and the threshold ladder is validated before returning.
pub fn load_config(workspace: &Path, config_path: Option<&Path>) -> Result<IndexPlanConfig> {
    let config = load_file_config(workspace, config_path)?;
    let config = apply_env_overrides(config, ENV_PREFIX)?;
    config.validate()?;
    Ok(config)
}

fn load_file_config(workspace: &Path, config_path: Option<&Path>) -> Result<IndexPlanConfig> {
    let explicit = config_path.is_some();

    let discovered = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => discover_config(workspace),
    };

    let Some(config_file) = discovered else {
        return Ok(IndexPlanConfig::default());
    };

    let content = fs::read_to_string(&config_file)
        .map_err(|source| PlanError::ConfigRead { path: config_file.clone(), source })?;

    let ext = config_file.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();
    let parsed = match ext.as_str() {
        "toml" => parse_toml_config(&content, &config_file),
        "yaml" | "yml" => parse_yaml_config(&content, &config_file),
        other => Err(PlanError::ConfigParse {
            path: config_file.clone(),
            message: format!("unsupported config extension '.{}'", other),
        }),
    };

    match parsed {
        Ok(config) => {
            tracing::debug!("Loaded config from {}", config_file.display());
            Ok(config)
        }
        Err(e) if !explicit => {
            tracing::warn!("Ignoring auto-discovered config {}: {}", config_file.display(), e);
            Ok(IndexPlanConfig::default())
        }
        Err(e) => Err(e),
    }
}

/// Parse TOML config, accepting settings nested under `[index-plan]`.
fn parse_toml_config(content: &str, config_file: &Path) -> Result<IndexPlanConfig> {
    let parse_err =
        |message: String| PlanError::ConfigParse { path: config_file.to_path_buf(), message };

    let raw: toml::Value = toml::from_str(content).map_err(|e| parse_err(e.to_string()))?;
    let config_val = match raw.get("index-plan") {
        Some(nested) => nested.clone(),
        None => raw,
    };
    config_val.try_into().map_err(|e: toml::de::Error| parse_err(e.to_string()))
}

/// Parse YAML config, accepting settings nested under `index-plan`.
fn parse_yaml_config(content: &str, config_file: &Path) -> Result<IndexPlanConfig> {
    let parse_err =
        |message: String| PlanError::ConfigParse { path: config_file.to_path_buf(), message };

    let raw: serde_yaml::Value =
        serde_yaml::from_str(content).map_err(|e| parse_err(e.to_string()))?;
    let config_val = match raw.get("index-plan") {
        Some(nested) => nested.clone(),
        None => raw,
    };
    serde_yaml::from_value(config_val).map_err(|e| parse_err(e.to_string()))
}

/// Overlay `<prefix>*` environment variables. Nested keys use `__`, e.g.
/// `INDEX_PLAN_THRESHOLDS__WARNING_COUNT=100`.
pub fn apply_env_overrides(config: IndexPlanConfig, prefix: &str) -> Result<IndexPlanConfig> {
    Figment::from(Serialized::defaults(config))
        .merge(Env::prefixed(prefix).split("__"))
        .extract()
        .map_err(|e| PlanError::ConfigParse {
            path: PathBuf::from(format!("{}* environment", prefix)),
            message: e.to_string(),
        })
}

fn discover_config(workspace: &Path) -> Option<PathBuf> {
    let candidates = ["index-plan.toml", ".index-plan.toml", "index-plan.yml", "index-plan.yaml"];

    candidates.iter().map(|candidate| workspace.join(candidate)).find(|path| path.exists())
}
