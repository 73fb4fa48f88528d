//! TAC reference table
//!
//! Rows are kept in one map per prefix length, ordered longest first, so a
//! lookup never depends on map iteration order. The table is read-only once
//! built and can be shared across threads without locking.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use ig_error::{ImeiGuardError, Result};
use lazy_static::lazy_static;
use sha2::{Digest, Sha256};
use tracing::{info, warn};

use super::builtin::BUILTIN_ROWS;
use crate::constants::tac::{FULL_LEN, MIN_PREFIX_LEN, PROBES};
use crate::data::TacEntry;

lazy_static! {
    static ref BUILTIN: Arc<TacTable> = Arc::new(TacTable::from_builtin_rows());
}

/// Any provider of TAC reference rows
#[cfg_attr(test, mockall::automock)]
pub trait TacSource: Send + Sync {
    /// Exact lookup of a 6, 7 or 8 digit prefix
    fn lookup(&self, prefix: &str) -> Option<TacEntry>;

    /// Number of rows available
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory reference table
#[derive(Debug, Clone)]
pub struct TacTable {
    /// (prefix length, rows keyed by prefix), longest first
    tiers: Vec<(usize, HashMap<String, TacEntry>)>,
}

impl Default for TacTable {
    fn default() -> Self {
        Self {
            tiers: PROBES
                .iter()
                .map(|&(len, _)| (len, HashMap::new()))
                .collect(),
        }
    }
}

/// Check one row; `index` is only used for the error message
pub fn validate_tac_entry(index: usize, entry: &TacEntry) -> Result<()> {
    let len = entry.prefix.len();
    if !(MIN_PREFIX_LEN..=FULL_LEN).contains(&len) {
        return Err(ImeiGuardError::invalid_tac_entry(
            index,
            format!(
                "prefix {:?} must be {}-{} digits",
                entry.prefix, MIN_PREFIX_LEN, FULL_LEN
            ),
        ));
    }
    if !entry.prefix.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ImeiGuardError::invalid_tac_entry(
            index,
            format!("prefix {:?} must contain digits only", entry.prefix),
        ));
    }
    if entry.brand.trim().is_empty() {
        return Err(ImeiGuardError::invalid_tac_entry(index, "brand cannot be empty"));
    }
    Ok(())
}

impl TacTable {
    /// Empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle to the compiled-in table
    pub fn builtin() -> Arc<TacTable> {
        Arc::clone(&BUILTIN)
    }

    fn from_builtin_rows() -> Self {
        let mut table = Self::new();
        for (prefix, brand, model) in BUILTIN_ROWS {
            table.put(TacEntry::new(*prefix, *brand, *model));
        }
        table
    }

    fn tier_mut(&mut self, len: usize) -> Option<&mut HashMap<String, TacEntry>> {
        self.tiers
            .iter_mut()
            .find(|(tier_len, _)| *tier_len == len)
            .map(|(_, rows)| rows)
    }

    fn put(&mut self, entry: TacEntry) -> Option<TacEntry> {
        let len = entry.prefix.len();
        self.tier_mut(len)
            .and_then(|rows| rows.insert(entry.prefix.clone(), entry))
    }

    /// Validate and insert a row, returning the row it replaced
    pub fn insert(&mut self, entry: TacEntry) -> Result<Option<TacEntry>> {
        validate_tac_entry(self.len(), &entry)?;
        Ok(self.put(entry))
    }

    /// Build a table from rows. Any invalid row fails the whole load;
    /// a repeated prefix keeps the last row.
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = TacEntry>,
    {
        let mut table = Self::new();
        for (index, entry) in entries.into_iter().enumerate() {
            if let Err(e) = validate_tac_entry(index, &entry) {
                warn!(index, error = %e, "Rejected TAC row");
                return Err(e);
            }
            if let Some(previous) = table.put(entry) {
                warn!(
                    index,
                    prefix = %previous.prefix,
                    previous_brand = %previous.brand,
                    "Duplicate TAC prefix, keeping the later row"
                );
            }
        }
        Ok(table)
    }

    /// Parse a JSON array of `{prefix, brand, model?}` rows
    pub fn from_json_str(json: &str) -> Result<Self> {
        let entries: Vec<TacEntry> = serde_json::from_str(json)?;
        Self::from_entries(entries)
    }

    /// Load a JSON reference table from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| ImeiGuardError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_json_str(&content)?;
        info!(
            path = %path.display(),
            entries = table.len(),
            digest = %table.digest(),
            "Loaded TAC reference table"
        );
        Ok(table)
    }

    /// All rows, ordered by prefix
    pub fn entries(&self) -> Vec<&TacEntry> {
        let mut rows: Vec<&TacEntry> = self
            .tiers
            .iter()
            .flat_map(|(_, rows)| rows.values())
            .collect();
        rows.sort_by(|a, b| a.prefix.cmp(&b.prefix));
        rows
    }

    /// Short SHA-256 fingerprint of the table contents
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        for entry in self.entries() {
            hasher.update(entry.prefix.as_bytes());
            hasher.update(b"\x1f");
            hasher.update(entry.brand.as_bytes());
            hasher.update(b"\x1f");
            if let Some(ref model) = entry.model {
                hasher.update(model.as_bytes());
            }
            hasher.update(b"\x1e");
        }
        let result = hasher.finalize();
        result.iter().take(8).map(|b| format!("{:02x}", b)).collect()
    }
}

impl TacSource for TacTable {
    fn lookup(&self, prefix: &str) -> Option<TacEntry> {
        self.tiers
            .iter()
            .find(|(len, _)| *len == prefix.len())
            .and_then(|(_, rows)| rows.get(prefix))
            .cloned()
    }

    fn len(&self) -> usize {
        self.tiers.iter().map(|(_, rows)| rows.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_rows_are_valid() {
        for (index, (prefix, brand, model)) in BUILTIN_ROWS.iter().enumerate() {
            let entry = TacEntry::new(*prefix, *brand, *model);
            assert!(validate_tac_entry(index, &entry).is_ok(), "row {index}");
        }
        assert_eq!(TacTable::builtin().len(), BUILTIN_ROWS.len());
    }

    #[test]
    fn test_builtin_has_fixture_row() {
        let entry = TacTable::builtin().lookup("35389011").unwrap();
        assert_eq!(entry.brand, "Apple");
        assert_eq!(entry.model.as_deref(), Some("iPhone 13"));
    }

    #[test]
    fn test_invalid_rows_rejected() {
        let short = TacTable::from_entries(vec![TacEntry::new("12345", "Acme", None)]);
        assert!(matches!(short, Err(ImeiGuardError::InvalidTacEntry { index: 0, .. })));

        let letters = TacTable::from_entries(vec![
            TacEntry::new("123456", "Acme", None),
            TacEntry::new("12345A", "Acme", None),
        ]);
        assert!(matches!(letters, Err(ImeiGuardError::InvalidTacEntry { index: 1, .. })));

        let no_brand = TacTable::from_entries(vec![TacEntry::new("123456", "  ", None)]);
        assert!(no_brand.is_err());
    }

    #[test]
    fn test_duplicate_prefix_keeps_last() {
        let table = TacTable::from_entries(vec![
            TacEntry::new("12345678", "Old", None),
            TacEntry::new("12345678", "New", Some("X1")),
        ])
        .unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.lookup("12345678").unwrap().brand, "New");
    }

    #[test]
    fn test_json_round_trip_and_digest_stability() {
        let json = r#"[
            {"prefix": "35389011", "brand": "Apple", "model": "iPhone 13"},
            {"prefix": "353890", "brand": "Apple"}
        ]"#;
        let a = TacTable::from_json_str(json).unwrap();
        let b = TacTable::from_entries(vec![
            TacEntry::new("353890", "Apple", None),
            TacEntry::new("35389011", "Apple", Some("iPhone 13")),
        ])
        .unwrap();
        assert_eq!(a.digest(), b.digest());
        assert_eq!(a.digest().len(), 16);
        assert_ne!(a.digest(), TacTable::new().digest());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"prefix": "8695000", "brand": "Xiaomi"}}]"#).unwrap();
        let table = TacTable::load(file.path()).unwrap();
        assert_eq!(table.lookup("8695000").unwrap().brand, "Xiaomi");
        assert!(table.lookup("869500").is_none());
    }

    #[test]
    fn test_load_missing_file() {
        let result = TacTable::load(Path::new("/nonexistent/imeiguard/tac.json"));
        assert!(matches!(result, Err(ImeiGuardError::FileRead { .. })));
    }

    #[test]
    fn test_insert_validates() {
        let mut table = TacTable::new();
        assert!(table.insert(TacEntry::new("1234", "Acme", None)).is_err());
        assert_eq!(table.insert(TacEntry::new("123456", "Acme", None)).unwrap(), None);
        assert!(table.insert(TacEntry::new("123456", "Other", None)).unwrap().is_some());
    }
}
