//! Remember-pattern detection.
//!
//! Scans free chat text for an instruction to persist a note ("remember that
//! ...", or its Persian equivalents) and extracts the note itself.

use once_cell::sync::Lazy;
use regex::Regex;

/// Patterns tried in order. Capture group 1 is the note.
static REMEMBER_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)(?:یاد بگیر|به خاطر بسپار|یادت باشه)\s+(.*)",
        r"(?i)remember that\s+(.*)",
    ]
    .iter()
    .filter_map(|p| match Regex::new(p) {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::error!("Invalid remember pattern {:?}: {}", p, e);
            None
        }
    })
    .collect()
});

/// Extract the note from `text`, if any pattern matches with a non-blank capture.
///
/// The first pattern that yields a non-blank note wins. The note is trimmed.
pub fn extract_note(text: &str) -> Option<String> {
    REMEMBER_PATTERNS.iter().find_map(|re| {
        let note = re.captures(text)?.get(1)?.as_str().trim();
        (!note.is_empty()).then(|| note.to_string())
    })
}
