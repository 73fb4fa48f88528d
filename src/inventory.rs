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

//! Duplicate lookup against an operator-supplied inventory list
//!
//! The engine itself is stateless; this is the shop-side "already in
//! system" check that runs next to it.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use ig_core::normalize_identifier;
use ig_error::{ImeiGuardError, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Known identifiers and serials, normalized
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    known: HashSet<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateCheck {
    pub is_duplicate: bool,
    pub warning: Option<String>,
}

fn inventory_key(value: &str) -> String {
    normalize_identifier(value).to_ascii_uppercase()
}

impl Inventory {
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            known: values
                .into_iter()
                .map(|v| inventory_key(v.as_ref()))
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    /// Load a JSON array of identifier/serial strings
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path).map_err(|source| ImeiGuardError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let values: Vec<String> = serde_json::from_str(&data)?;
        let inventory = Self::from_values(values);
        info!(path = %path.display(), devices = inventory.len(), "Loaded inventory");
        Ok(inventory)
    }

    pub fn len(&self) -> usize {
        self.known.len()
    }

    pub fn is_empty(&self) -> bool {
        self.known.is_empty()
    }

    pub fn contains(&self, value: &str) -> bool {
        self.known.contains(&inventory_key(value))
    }

    pub fn check(&self, value: &str) -> DuplicateCheck {
        let is_duplicate = self.contains(value);
        DuplicateCheck {
            is_duplicate,
            warning: is_duplicate.then(|| "Device already in system".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_ignores_separators_and_case() {
        let inventory = Inventory::from_values(["35-389011-000000-4", "rf8n70abcd", "  "]);
        assert_eq!(inventory.len(), 2);
        assert!(inventory.contains("353890110000004"));
        assert!(inventory.contains("RF8N70ABCD"));
        assert!(!inventory.contains("490154203237518"));
    }

    #[test]
    fn test_check_warning() {
        let inventory = Inventory::from_values(["353890110000004"]);
        let dup = inventory.check("3538 9011 0000 004");
        assert!(dup.is_duplicate);
        assert_eq!(dup.warning.as_deref(), Some("Device already in system"));
        assert_eq!(inventory.check("x").warning, None);
    }

    #[test]
    fn test_load_rejects_non_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.json");
        fs::write(&path, r#"{"imei": "1"}"#).unwrap();
        assert!(matches!(Inventory::load(&path), Err(ImeiGuardError::JsonParse(_))));
    }
}
