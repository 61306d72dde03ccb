//! Property-based tests for bootlog using proptest

use bootlog::prelude::*;
use bootlog::format_fields;
use proptest::prelude::*;

fn any_level() -> impl Strategy<Value = Level> {
    prop_oneof![
        Just(Level::Debug),
        Just(Level::Info),
        Just(Level::Warning),
        Just(Level::Error),
        Just(Level::Fatal),
    ]
}

// ============================================================================
// Level Tests
// ============================================================================

proptest! {
    /// Level names parse in any letter case
    #[test]
    fn test_level_name_any_case(level in any_level(), mask in any::<u8>()) {
        let mixed: String = level
            .as_str()
            .chars()
            .enumerate()
            .map(|(i, c)| if mask & (1 << (i % 8)) != 0 { c.to_ascii_lowercase() } else { c })
            .collect();
        let parsed: Level = mixed.parse().unwrap();
        prop_assert_eq!(parsed, level);
    }

    /// Numeric text parses to the level with that number
    #[test]
    fn test_level_numeric_text(n in 0u8..=4) {
        let parsed: Level = n.to_string().parse().unwrap();
        prop_assert_eq!(parsed as u8, n);
    }

    /// Out-of-range numbers are rejected
    #[test]
    fn test_level_numeric_out_of_range(n in any::<i64>().prop_filter("outside 0..=4", |n| !(0..=4).contains(n))) {
        prop_assert!(n.to_string().parse::<Level>().is_err());
    }

    /// Text that is neither a level name nor a number is rejected
    #[test]
    fn test_level_unknown_text(text in "[a-z]{1,12}") {
        let known = ["debug", "info", "warning", "error", "fatal"];
        prop_assume!(!known.contains(&text.as_str()));
        prop_assert!(text.parse::<Level>().is_err());
    }

    /// Level ordering follows the numeric value
    #[test]
    fn test_level_ordering(a in any_level(), b in any_level()) {
        prop_assert_eq!(a <= b, (a as u8) <= (b as u8));
        prop_assert_eq!(a.is_enabled(b), (a as u8) >= (b as u8));
    }

    /// Display, serialization, and parsing agree
    #[test]
    fn test_level_text_forms_agree(level in any_level()) {
        prop_assert_eq!(level.to_string(), level.as_str());
        let json = serde_json::to_string(&level).unwrap();
        prop_assert_eq!(json, format!("\"{}\"", level.as_str()));
        let back: Level = serde_json::from_str(&format!("{}", level as u8)).unwrap();
        prop_assert_eq!(back, level);
    }

    /// Fatal passes every minimum level
    #[test]
    fn test_fatal_always_enabled(min in any_level()) {
        prop_assert!(Level::Fatal.is_enabled(min));
    }
}

// ============================================================================
// Field Tests
// ============================================================================

proptest! {
    /// Rendered fields are sorted by key and contain every pair
    #[test]
    fn test_format_fields_sorted(entries in prop::collection::hash_map("[a-z]{1,6}", any::<i64>(), 0..10)) {
        let mut fields = Fields::new();
        for (k, v) in &entries {
            fields.insert(k.clone(), FieldValue::from(*v));
        }
        let rendered = format_fields(&fields);

        let mut keys: Vec<&String> = entries.keys().collect();
        keys.sort();
        let expected: Vec<String> = keys.iter().map(|k| format!("{}={}", k, entries[*k])).collect();
        prop_assert_eq!(rendered, expected.join(" "));
    }

    /// Any message survives a JSON write unchanged
    #[test]
    fn test_json_message_preserved(message in ".*") {
        let boot = BootstrapLogger::new();
        boot.info(message.clone());
        let record = boot.drain().pop().unwrap();
        let json: serde_json::Value = serde_json::to_value(&record).unwrap();
        if message.is_empty() {
            prop_assert!(json.get("message").is_none());
        } else {
            prop_assert_eq!(json["message"].as_str().unwrap(), message.as_str());
        }
    }
}
