//! Rust literal encoding for generated constants.

/// Byte-string literal (`b"..."`) that evaluates to exactly `bytes`.
pub fn byte_string_literal(bytes: &[u8]) -> String {
    format!("b\"{}\"", bytes.escape_ascii())
}

/// String literal for `value`.
pub fn str_literal(value: &str) -> String {
    format!("{value:?}")
}
