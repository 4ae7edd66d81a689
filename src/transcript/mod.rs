use serde::{Deserialize, Serialize};

/// One timed unit of transcript text as returned by the caption provider.
///
/// Only `text` is read when flattening; the timing fields are carried through
/// for provider fidelity but otherwise unused.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CaptionEntry {
    /// Caption text, absent for timing-only entries
    pub text: Option<String>,

    /// Start time in seconds
    pub start: Option<f64>,

    /// Duration in seconds
    pub duration: Option<f64>,
}

impl CaptionEntry {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            start: None,
            duration: None,
        }
    }
}

/// Flatten caption entries into a single string.
///
/// Each entry contributes its `text` (empty string if absent), joined with a
/// single space in input order. No trimming or normalization is performed.
pub fn format_transcript(entries: &[CaptionEntry]) -> String {
    entries
        .iter()
        .map(|entry| entry.text.as_deref().unwrap_or(""))
        .collect::<Vec<_>>()
        .join(" ")
}
