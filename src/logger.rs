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

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use lazy_static::lazy_static;
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

const FALLBACK_AUDIT_PATH: &str = "/tmp/imeiguard_audit.jsonl";

lazy_static! {
    static ref AUDIT_FILE: Mutex<Option<File>> = Mutex::new(None);
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Install the stderr tracing subscriber. `RUST_LOG` wins when set.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn open_append(path: &Path) -> Option<File> {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    OpenOptions::new().create(true).append(true).open(path).ok()
}

/// Open the JSON-lines audit log, falling back to /tmp silently
pub fn init_audit_log(path: &Path) {
    let file = open_append(path).or_else(|| open_append(Path::new(FALLBACK_AUDIT_PATH)));
    if let Ok(mut guard) = AUDIT_FILE.lock() {
        *guard = file;
    }
}

/// Close the audit log; later events are dropped
pub fn close_audit_log() {
    if let Ok(mut guard) = AUDIT_FILE.lock() {
        *guard = None;
    }
}

pub fn is_audit_enabled() -> bool {
    AUDIT_FILE.lock().map(|g| g.is_some()).unwrap_or(false)
}

/// Append one `{ts_ms, event, data}` line if the audit log is open
pub fn log_event(event: &str, data: Value) {
    let line = json!({
        "ts_ms": now_millis(),
        "event": event,
        "data": data,
    })
    .to_string();

    if let Ok(mut guard) = AUDIT_FILE.lock() {
        if let Some(f) = guard.as_mut() {
            let _ = writeln!(f, "{}", line);
        }
    }
}
