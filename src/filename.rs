//! # Output Filename Derivation
//!
//! Builds the default output filename from the current date and a sanitized
//! caption string when the caller doesn't supply one.

use chrono::{Local, NaiveDate};

/// Prefix for derived output filenames.
pub const FILENAME_PREFIX: &str = "QRCARD";

/// Strip a caption down to filename-safe characters.
///
/// Keeps alphanumerics, spaces, and underscores; drops everything else;
/// trims leading/trailing whitespace; replaces the remaining spaces with
/// underscores. Idempotent: sanitizing an already-sanitized string returns
/// it unchanged.
pub fn sanitize(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric() || *c == ' ' || *c == '_')
        .collect::<String>()
        .trim()
        .replace(' ', "_")
}

/// Derive an output filename from the top caption and today's date.
///
/// Produces `QRCARD_<DDMMYY>_<sanitized_caption>.png`, or
/// `QRCARD_<DDMMYY>.png` when there is no caption (or it sanitizes away
/// entirely).
pub fn derive(caption: Option<&str>) -> String {
    derive_for_date(caption, Local::now().date_naive())
}

fn derive_for_date(caption: Option<&str>, date: NaiveDate) -> String {
    let stamp = date.format("%d%m%y");
    match caption.map(sanitize).filter(|s| !s.is_empty()) {
        Some(name) => format!("{}_{}_{}.png", FILENAME_PREFIX, stamp, name),
        None => format!("{}_{}.png", FILENAME_PREFIX, stamp),
    }
}
