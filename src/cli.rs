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

//! Command Line Interface
//!
//! Thin front-end over the engine. Every result is printed as pretty JSON on
//! stdout; logs go to stderr.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use ig_core::{
    classify_scan, classify_serial, normalize_identifier, validate_identifier, Engine,
    IntakeReport, TacSource, TacTable,
};
use serde::Serialize;
use serde_json::json;
use tracing::debug;

use crate::config::{build_engine, config_path, load_config, SavedConfig};
use crate::inventory::{DuplicateCheck, Inventory};
use crate::logger;

/// Process exit status when nothing was flagged
pub const EXIT_OK: i32 = 0;
/// Process exit status when a check failed or a device was flagged
pub const EXIT_FLAGGED: i32 = 2;

#[derive(Parser, Debug)]
#[command(name = "imeiguard")]
#[command(version)]
#[command(about = "imeiguard - IMEI and serial checks for phone intake")]
#[command(long_about = "imeiguard - IMEI and serial checks for phone intake

Validates scanned IMEIs and serial numbers, resolves the manufacturer from
the TAC reference table and flags devices that look fake or mismatched.

EXAMPLES:
    imeiguard scan 353890110000004
    imeiguard check 490154203237518
    imeiguard serial RF8N70ABCD --brand Samsung
    imeiguard tac 353890110000004
    imeiguard assess 353890110000004 --brand Samsung --model \"Galaxy S21\"
    imeiguard mismatch 353890110000004 --brand Apple --model \"iPhone 12\"
    imeiguard intake 353890110000004 --brand Apple --model \"iPhone 13\"
    imeiguard table

EXIT STATUS:
    0    nothing flagged
    1    configuration or reference data error
    2    check failed or device flagged

ENVIRONMENT VARIABLES:
    RUST_LOG=debug         Enable debug logging

FILES:
    ~/.config/imeiguard/config.json    Configuration
    ~/.config/imeiguard/audit.jsonl    Audit log (when enabled)")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Config file (default: ~/.config/imeiguard/config.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// TAC reference table, overriding the config
    #[arg(long, global = true)]
    pub tac_table: Option<PathBuf>,

    /// Append every verdict to the audit log
    #[arg(long, global = true)]
    pub audit_log: bool,

    /// Debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify a raw scan as IMEI, serial or unrecognized
    Scan { raw: String },

    /// Validate an IMEI's length and check digit
    Check { imei: String },

    /// Validate a serial number and guess its vendor
    Serial {
        serial: String,
        /// Brand the operator entered
        #[arg(long)]
        brand: Option<String>,
    },

    /// Resolve brand and model from an IMEI's leading digits
    Tac { imei: String },

    /// Full suspicion report for a device
    Assess {
        imei: String,
        #[command(flatten)]
        claim: Claim,
        /// Serial number captured alongside the IMEI
        #[arg(long)]
        serial: Option<String>,
    },

    /// Check whether the IMEI agrees with the claimed brand and model
    Mismatch {
        imei: String,
        #[command(flatten)]
        claim: Claim,
    },

    /// Scan-first intake: classify, assess and look for duplicates
    Intake {
        raw: String,
        #[command(flatten)]
        claim: Claim,
        #[arg(long)]
        serial: Option<String>,
    },

    /// Show the active TAC reference table's size and digest
    Table,
}

/// What the operator says the device is
#[derive(Args, Debug, Clone)]
pub struct Claim {
    #[arg(long)]
    pub brand: String,
    #[arg(long, default_value = "")]
    pub model: String,
}

#[derive(Debug, Serialize)]
pub struct IntakeOutput {
    #[serde(flatten)]
    pub intake: IntakeReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duplicate: Option<DuplicateCheck>,
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn flagged(flag: bool) -> i32 {
    if flag {
        EXIT_FLAGGED
    } else {
        EXIT_OK
    }
}

/// Run a parsed command line and return the process exit status
pub fn run(cli: &Cli) -> anyhow::Result<i32> {
    let path = cli.config.clone().unwrap_or_else(config_path);
    let cfg = load_config(&path)
        .with_context(|| format!("loading config {}", path.display()))?;
    debug!(path = %path.display(), ?cfg, "Config loaded");

    if cli.audit_log || cfg.audit_log {
        logger::init_audit_log(&cfg.audit_log_path());
    }

    let engine = build_engine(&cfg, cli.tac_table.as_deref())?;
    execute_command(&cli.command, &engine, &cfg, cli)
}

fn execute_command(
    cmd: &Commands,
    engine: &Engine,
    cfg: &SavedConfig,
    cli: &Cli,
) -> anyhow::Result<i32> {
    match cmd {
        Commands::Scan { raw } => {
            print_json(&classify_scan(raw))?;
            Ok(EXIT_OK)
        }
        Commands::Check { imei } => cmd_check(imei),
        Commands::Serial { serial, brand } => cmd_serial(serial, brand.as_deref()),
        Commands::Tac { imei } => {
            print_json(&engine.resolve_digits(&normalize_identifier(imei)))?;
            Ok(EXIT_OK)
        }
        Commands::Assess { imei, claim, serial } => {
            let report = engine.assess_device(imei, serial.as_deref(), &claim.brand, &claim.model);
            logger::log_event(
                "assess",
                json!({
                    "imei": imei,
                    "serial": serial,
                    "brand": claim.brand,
                    "model": claim.model,
                    "report": report,
                }),
            );
            print_json(&report)?;
            Ok(flagged(report.is_suspicious))
        }
        Commands::Mismatch { imei, claim } => {
            let result = engine.detect_mismatch(imei, &claim.brand, &claim.model);
            logger::log_event(
                "mismatch",
                json!({
                    "imei": imei,
                    "brand": claim.brand,
                    "model": claim.model,
                    "result": result,
                }),
            );
            print_json(&result)?;
            Ok(flagged(result.mismatch))
        }
        Commands::Intake { raw, claim, serial } => cmd_intake(engine, cfg, raw, claim, serial.as_deref()),
        Commands::Table => cmd_table(cfg, cli),
    }
}

fn cmd_check(imei: &str) -> anyhow::Result<i32> {
    match validate_identifier(imei) {
        Ok(id) => {
            print_json(&json!({ "valid": true, "imei": id }))?;
            Ok(EXIT_OK)
        }
        Err(e) => {
            print_json(&json!({ "valid": false, "error": e.to_string() }))?;
            Ok(EXIT_FLAGGED)
        }
    }
}

fn cmd_serial(serial: &str, brand: Option<&str>) -> anyhow::Result<i32> {
    match classify_serial(serial, brand) {
        Ok(guess) => {
            print_json(&guess)?;
            Ok(EXIT_OK)
        }
        Err(e) => {
            print_json(&json!({
                "valid": e.is_soft(),
                "error": e.to_string(),
                "soft": e.is_soft(),
            }))?;
            Ok(EXIT_FLAGGED)
        }
    }
}

fn cmd_intake(
    engine: &Engine,
    cfg: &SavedConfig,
    raw: &str,
    claim: &Claim,
    serial: Option<&str>,
) -> anyhow::Result<i32> {
    let intake = engine.inspect(raw, serial, &claim.brand, &claim.model);

    let duplicate = match &cfg.inventory {
        Some(path) => Some(Inventory::load(path)?.check(&intake.scan.normalized_value)),
        None => None,
    };
    let is_duplicate = duplicate.as_ref().map(|d| d.is_duplicate).unwrap_or(false);

    let output = IntakeOutput { intake, duplicate };
    logger::log_event(
        "intake",
        json!({
            "raw": raw,
            "brand": claim.brand,
            "model": claim.model,
            "result": output,
        }),
    );
    print_json(&output)?;
    Ok(flagged(output.intake.report.is_suspicious || is_duplicate))
}

fn cmd_table(cfg: &SavedConfig, cli: &Cli) -> anyhow::Result<i32> {
    let (source, table) = match cli.tac_table.as_ref().or(cfg.tac_table.as_ref()) {
        Some(path) => (path.display().to_string(), TacTable::load(path)?),
        None => ("builtin".to_string(), TacTable::builtin().as_ref().clone()),
    };
    print_json(&json!({
        "source": source,
        "entries": table.len(),
        "digest": table.digest(),
    }))?;
    Ok(EXIT_OK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_assess_with_claim() {
        let cli = Cli::try_parse_from([
            "imeiguard",
            "assess",
            "353890110000004",
            "--brand",
            "Samsung",
            "--model",
            "Galaxy S21",
            "--serial",
            "RF8N70ABCD",
        ])
        .unwrap();
        match cli.command {
            Commands::Assess { imei, claim, serial } => {
                assert_eq!(imei, "353890110000004");
                assert_eq!(claim.brand, "Samsung");
                assert_eq!(claim.model, "Galaxy S21");
                assert_eq!(serial.as_deref(), Some("RF8N70ABCD"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["imeiguard", "table", "--verbose", "--tac-table", "/tmp/t.json"])
            .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.tac_table, Some(PathBuf::from("/tmp/t.json")));
    }

    #[test]
    fn test_model_defaults_to_empty() {
        let cli = Cli::try_parse_from(["imeiguard", "mismatch", "1", "--brand", "Apple"]).unwrap();
        match cli.command {
            Commands::Mismatch { claim, .. } => assert_eq!(claim.model, ""),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_brand_is_required() {
        assert!(Cli::try_parse_from(["imeiguard", "assess", "353890110000004"]).is_err());
    }

    #[test]
    fn test_exit_status_for_checks() {
        assert_eq!(cmd_check("490154203237518").unwrap(), EXIT_OK);
        assert_eq!(cmd_check("490154203237511").unwrap(), EXIT_FLAGGED);
        assert_eq!(cmd_serial("RF8N70ABCD", Some("Samsung")).unwrap(), EXIT_OK);
        assert_eq!(cmd_serial("AAAAAAAAAA", None).unwrap(), EXIT_FLAGGED);
    }

    #[test]
    fn test_intake_exit_status_flags_duplicates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.json");
        std::fs::write(&path, r#"["3538-9011-0000-004", "RF8N70ABCD"]"#).unwrap();
        let cfg = SavedConfig {
            inventory: Some(path),
            ..Default::default()
        };
        let engine = Engine::default();
        let claim = Claim {
            brand: "Apple".to_string(),
            model: "iPhone 13".to_string(),
        };

        // Clean report, but already in stock
        assert_eq!(
            cmd_intake(&engine, &cfg, "353890110000004", &claim, None).unwrap(),
            EXIT_FLAGGED
        );
        assert_eq!(
            cmd_intake(&engine, &cfg, "490154203237518", &claim, None).unwrap(),
            EXIT_OK
        );

        let no_inventory = SavedConfig::default();
        assert_eq!(
            cmd_intake(&engine, &no_inventory, "353890110000004", &claim, None).unwrap(),
            EXIT_OK
        );
    }

    #[test]
    fn test_intake_missing_inventory_is_an_error() {
        let cfg = SavedConfig {
            inventory: Some(PathBuf::from("/nonexistent/imeiguard/inventory.json")),
            ..Default::default()
        };
        let claim = Claim {
            brand: "Apple".to_string(),
            model: String::new(),
        };
        assert!(cmd_intake(&Engine::default(), &cfg, "353890110000004", &claim, None).is_err());
    }
}
