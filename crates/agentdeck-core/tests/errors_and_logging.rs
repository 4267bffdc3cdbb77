#![allow(clippy::unwrap_used, clippy::expect_used)]

use agentdeck_core::logging::{self, LogFormat};
use agentdeck_core::{DeckError, DeckResult};

fn parse_number(raw: &str) -> DeckResult<u64> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    value
        .as_u64()
        .ok_or_else(|| DeckError::Config(format!("Expected a number, got {value}")))
}

#[test]
fn test_error_display() {
    assert_eq!(
        DeckError::unknown("risk", "risk-scope-creep").to_string(),
        "Unknown risk: risk-scope-creep"
    );
    assert_eq!(
        DeckError::InvalidTransition("resolved -> identified".into()).to_string(),
        "Invalid transition: resolved -> identified"
    );
    assert_eq!(
        DeckError::Runtime("stopped".into()).to_string(),
        "Runtime error: stopped"
    );
}

#[test]
fn test_question_mark_conversions() {
    assert_eq!(parse_number("42").unwrap(), 42);
    assert!(matches!(parse_number("{oops"), Err(DeckError::Json(_))));
    assert!(matches!(parse_number("\"x\""), Err(DeckError::Config(_))));

    let io: DeckError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
    assert!(io.to_string().starts_with("IO error"));
}

#[test]
fn test_logging_init_is_idempotent() {
    // Whichever call wins, a second install must report false without panicking.
    let _ = logging::init(LogFormat::Json, "warn");
    assert!(!logging::init(LogFormat::Pretty, "info"));
}

#[test]
fn test_default_log_format() {
    assert_eq!(LogFormat::default(), LogFormat::Pretty);
}
