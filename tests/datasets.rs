// Integration tests for the label dataset and stock configuration.
// Native-friendly: no wasm/browser APIs.

use std::collections::HashSet;

use evasive_button::{BUTTON_MESSAGES, GameConfig};

#[test]
fn button_messages_are_unique_and_non_blank() {
    let mut seen = HashSet::new();
    for m in BUTTON_MESSAGES {
        assert!(!m.trim().is_empty(), "blank message in BUTTON_MESSAGES");
        assert!(seen.insert(*m), "duplicate message '{}' in BUTTON_MESSAGES", m);
    }
    assert_eq!(BUTTON_MESSAGES.len(), 10);
}

#[test]
fn default_config_uses_the_dataset_in_order() {
    let cfg = GameConfig::default();
    let expected: Vec<String> = BUTTON_MESSAGES.iter().map(|s| s.to_string()).collect();
    assert_eq!(cfg.messages, expected);
}

#[test]
fn palettes_are_css_hex_colors() {
    let cfg = GameConfig::default();
    for c in cfg.balloons.colors.iter().chain(cfg.confetti.colors.iter()) {
        assert_eq!(c.len(), 7, "color '{}' is not #rrggbb", c);
        assert!(c.starts_with('#'));
        assert!(c[1..].chars().all(|ch| ch.is_ascii_hexdigit()), "color '{}' has non-hex digits", c);
    }
}
