/*
 * This file is part of imeiguard.
 *
 * Copyright (C) 2025 imeiguard contributors
 *
 * imeiguard is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * imeiguard is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with imeiguard. If not, see <https://www.gnu.org/licenses/>.
 */

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use ig_core::{Engine, TacSource, TacTable};
use ig_error::{ImeiGuardError, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

const APP_DIR: &str = "imeiguard";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SavedConfig {
    /// External TAC reference table (JSON array of {prefix, brand, model?})
    #[serde(default)]
    pub tac_table: Option<PathBuf>,
    /// Blacklisted identifier prefixes, added to the built-in fixtures
    #[serde(default)]
    pub extra_fake_prefixes: Vec<String>,
    #[serde(default)]
    pub audit_log: bool,
    #[serde(default)]
    pub audit_log_path: Option<PathBuf>,
    /// Known identifiers/serials (JSON array of strings) for duplicate checks
    #[serde(default)]
    pub inventory: Option<PathBuf>,
}

fn config_dir() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        return Path::new(&xdg).join(APP_DIR);
    }
    if let Ok(home) = env::var("HOME") {
        return Path::new(&home).join(".config").join(APP_DIR);
    }
    match dirs::config_dir() {
        Some(dir) => dir.join(APP_DIR),
        None => PathBuf::from("/etc").join(APP_DIR),
    }
}

pub fn config_path() -> PathBuf {
    config_dir().join("config.json")
}

pub fn default_audit_log_path() -> PathBuf {
    config_dir().join("audit.jsonl")
}

/// Load the config at `path`; a missing file yields defaults
pub fn load_config(path: &Path) -> Result<SavedConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "No config file, using defaults");
        return Ok(SavedConfig::default());
    }
    read_config(path).map_err(|e| {
        warn!(path = %path.display(), error = %e, "Failed to load config");
        e
    })
}

fn read_config(path: &Path) -> Result<SavedConfig> {
    let data = fs::read_to_string(path).map_err(|source| ImeiGuardError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let cfg: SavedConfig = serde_json::from_str(&data)?;
    validate_config(&cfg)?;
    Ok(cfg)
}

pub fn validate_config(cfg: &SavedConfig) -> Result<()> {
    for prefix in &cfg.extra_fake_prefixes {
        if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ImeiGuardError::invalid_config(
                "extra_fake_prefixes",
                format!("{:?} must be a non-empty string of digits", prefix),
            ));
        }
    }
    if cfg.audit_log_path.is_some() && !cfg.audit_log {
        debug!("audit_log_path set but audit_log is disabled");
    }
    Ok(())
}

impl SavedConfig {
    pub fn audit_log_path(&self) -> PathBuf {
        self.audit_log_path
            .clone()
            .unwrap_or_else(default_audit_log_path)
    }
}

/// Build the engine from config; `tac_override` wins over `tac_table`
pub fn build_engine(cfg: &SavedConfig, tac_override: Option<&Path>) -> Result<Engine> {
    let table: Arc<TacTable> = match tac_override.or(cfg.tac_table.as_deref()) {
        Some(path) => Arc::new(TacTable::load(path)?),
        None => {
            let builtin = TacTable::builtin();
            info!(
                entries = builtin.len(),
                digest = %builtin.digest(),
                "Using built-in TAC reference table"
            );
            builtin
        }
    };
    Ok(Engine::new(table).with_fake_prefixes(cfg.extra_fake_prefixes.iter().cloned()))
}
