//! Latin-1/UTF-8 mojibake repair.
//!
//! Attribute text in the wild frequently arrives double-decoded: UTF-8
//! bytes read as Latin-1, turning "Córdoba" into "CÃ³rdoba". The repair
//! re-encodes through Latin-1 and tries a UTF-8 decode; if that fails the
//! original text is kept unchanged, never an error.

use idera_common::FieldValue;

/// Undo a Latin-1 mis-decode of UTF-8 text when possible.
pub fn repair_mojibake(text: &str) -> String {
    // Only strings whose every char fits in a single Latin-1 byte can be
    // round-tripped; anything else is already genuine Unicode text.
    if !text.chars().all(|c| (c as u32) <= 0xFF) {
        return text.to_string();
    }

    let bytes: Vec<u8> = text.chars().map(|c| c as u8).collect();
    match String::from_utf8(bytes) {
        Ok(repaired) => repaired,
        Err(_) => text.to_string(),
    }
}

/// Apply mojibake repair to text values, pass everything else through.
pub fn repair_value(value: &FieldValue) -> FieldValue {
    match value {
        FieldValue::Text(s) => FieldValue::Text(repair_mojibake(s)),
        other => other.clone(),
    }
}
