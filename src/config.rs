use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context, Result, anyhow, bail};
use jsonschema::JSONSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    checkout::{
        Asset, AssetDirectory, AuditSink, CheckoutPolicy, NoopAuditSink, Requester,
        RequesterDirectory, StdoutAuditSink, TracingAuditSink,
        policy::{MAX_SECURITY_LEVEL, MIN_SECURITY_LEVEL},
        validation::{validate_asset_id, validate_requester_id},
    },
    driver::RawCheckoutRequest,
};

/// Used when the config carries no `$schema` reference.
const BUNDLED_SCHEMA: &str = include_str!("../checkout.schema.json");

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub audit_sink: AuditSinkKind,
    #[serde(default)]
    pub policy: CheckoutPolicy,
    #[serde(default)]
    pub requesters: Vec<Requester>,
    #[serde(default)]
    pub assets: Vec<Asset>,
    #[serde(default)]
    pub requests: Vec<RawCheckoutRequest>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditSinkKind {
    /// `[AUDIT]` lines on stdout.
    #[default]
    Stdout,
    Tracing,
    None,
}

/// One JSON log file per day under `dir`, pruned after `retention_days`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub dir: PathBuf,
    pub filter: String,
    pub retention_days: usize,
    pub stderr_warn_enabled: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./logs/checkout"),
            filter: "info".to_string(),
            retention_days: 14,
            stderr_warn_enabled: true,
        }
    }
}

impl Config {
    pub fn load(config_path: &Path) -> Result<Self> {
        let config_text = fs::read_to_string(config_path)
            .with_context(|| format!("failed to read {}", config_path.display()))?;
        let config_value: Value = json5::from_str(&config_text)
            .with_context(|| format!("failed to parse {}", config_path.display()))?;

        let config_base = config_path.parent().unwrap_or_else(|| Path::new("."));
        let schema = load_schema(config_base, &config_value)?;
        check_schema(&schema, &config_value)?;

        let mut config: Config =
            serde_json::from_value(config_value).context("failed to deserialize checkout config")?;
        config.logging.dir = config_base.join(&config.logging.dir);

        config.validate()?;
        Ok(config)
    }

    /// Checks what the schema cannot express: policy ranges, seed identifier
    /// formats and uniqueness.
    pub fn validate(&self) -> Result<()> {
        self.policy.validate()?;
        if self.logging.retention_days == 0 {
            bail!("logging.retention_days must be at least 1");
        }

        let mut requester_ids = BTreeSet::new();
        for requester in &self.requesters {
            validate_requester_id(&requester.id)
                .with_context(|| format!("requester seed '{}' has an unusable id", requester.id))?;
            if !requester_ids.insert(requester.id.as_str()) {
                bail!("duplicate requester id '{}'", requester.id);
            }
        }

        let mut asset_ids = BTreeSet::new();
        for asset in &self.assets {
            validate_asset_id(&asset.id)
                .with_context(|| format!("asset seed '{}' has an unusable id", asset.id))?;
            if !asset_ids.insert(asset.id.as_str()) {
                bail!("duplicate asset id '{}'", asset.id);
            }
            if !(MIN_SECURITY_LEVEL..=MAX_SECURITY_LEVEL).contains(&asset.security_level) {
                bail!(
                    "asset '{}' security_level must be within {MIN_SECURITY_LEVEL}..={MAX_SECURITY_LEVEL}, got {}",
                    asset.id,
                    asset.security_level
                );
            }
        }

        Ok(())
    }

    pub fn requester_directory(&self) -> RequesterDirectory {
        RequesterDirectory::from_requesters(self.requesters.iter().cloned())
    }

    pub fn asset_directory(&self) -> AssetDirectory {
        AssetDirectory::from_assets(self.assets.iter().cloned())
    }

    pub fn audit_sink(&self) -> Arc<dyn AuditSink> {
        match self.audit_sink {
            AuditSinkKind::Stdout => Arc::new(StdoutAuditSink),
            AuditSinkKind::Tracing => Arc::new(TracingAuditSink),
            AuditSinkKind::None => Arc::new(NoopAuditSink),
        }
    }
}

/// A `$schema` reference is read relative to the config file; without one the
/// bundled schema applies.
fn load_schema(config_base: &Path, config_value: &Value) -> Result<Value> {
    let Some(reference) = config_value.get("$schema").and_then(Value::as_str) else {
        return serde_json::from_str(BUNDLED_SCHEMA).context("bundled schema is not valid JSON");
    };
    let schema_path = config_base.join(reference);
    let schema_text = fs::read_to_string(&schema_path)
        .with_context(|| format!("failed to read schema {}", schema_path.display()))?;
    serde_json::from_str(&schema_text)
        .with_context(|| format!("failed to parse schema {}", schema_path.display()))
}

fn check_schema(schema: &Value, config_value: &Value) -> Result<()> {
    let compiled =
        JSONSchema::compile(schema).map_err(|err| anyhow!("failed to compile schema: {err}"))?;
    let problems: Vec<String> = match compiled.validate(config_value) {
        Ok(()) => return Ok(()),
        Err(errors) => errors
            .map(|error| format!("at '{}': {error}", error.instance_path))
            .collect(),
    };
    Err(anyhow!("config rejected by schema: {}", problems.join("; ")))
}
