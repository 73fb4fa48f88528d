//! Lexical identity comparison
//!
//! Brand agreement is a case-insensitive substring check in both directions,
//! so "Apple" agrees with "apple inc" and "Samsung Electronics" with "samsung".
//! Unrelated vendors that share a word will also agree.

/// Whether two brand names refer to the same vendor
pub fn brands_agree(resolved: &str, claimed: &str) -> bool {
    let resolved = resolved.to_lowercase();
    let claimed = claimed.to_lowercase();
    resolved.contains(&claimed) || claimed.contains(&resolved)
}

/// Whether the claimed model mentions the resolved model's last token
///
/// "iPhone 13" is satisfied by any claim containing "13".
pub fn model_agrees(resolved: &str, claimed: &str) -> bool {
    let resolved = resolved.to_lowercase();
    match resolved.split_whitespace().last() {
        Some(token) => claimed.to_lowercase().contains(token),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brands_agree_both_directions() {
        assert!(brands_agree("Apple", "apple"));
        assert!(brands_agree("Samsung", "Samsung Electronics"));
        assert!(brands_agree("Samsung Electronics", "SAMSUNG"));
        assert!(!brands_agree("Apple", "Samsung"));
    }

    #[test]
    fn test_model_agrees_on_last_token() {
        assert!(model_agrees("iPhone 13", "iphone 13 pro"));
        assert!(!model_agrees("iPhone 13", "iPhone 12"));
        assert!(model_agrees("", "anything"));
    }
}
