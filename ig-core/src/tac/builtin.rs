//! Compiled-in TAC reference rows
//!
//! Used when no external table is configured. Real-world accuracy is not a
//! goal; deployments should load a maintained dataset.

/// (prefix, brand, model)
pub(super) const BUILTIN_ROWS: &[(&str, &str, Option<&str>)] = &[
    // Full type allocation codes
    ("35389011", "Apple", Some("iPhone 13")),
    ("35407115", "Apple", Some("iPhone 14")),
    ("35325807", "Apple", Some("iPhone 12")),
    ("35676211", "Apple", Some("iPhone 11")),
    ("35332509", "Samsung", Some("Galaxy S21")),
    ("35260311", "Samsung", Some("Galaxy S22")),
    ("35168622", "Samsung", Some("Galaxy A54")),
    ("35846211", "Google", Some("Pixel 7")),
    ("86950004", "Xiaomi", Some("Redmi Note 11")),
    ("86814203", "Huawei", Some("P30")),
    // Model families
    ("3533250", "Samsung", None),
    ("8695000", "Xiaomi", None),
    // Allocation blocks
    ("353890", "Apple", None),
    ("352603", "Samsung", None),
    ("868142", "Huawei", None),
    ("861536", "Oppo", None),
    ("863064", "Tecno", None),
];
