use regex::Regex;
use std::sync::LazyLock;

/// `M:SS - "text"` or `MM:SS - "text"`. The quoted part may span lines.
static CUE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(\d{1,2}):(\d{2})\s*-\s*"([^"]+)""#).expect("cue pattern is valid")
});

/// A spoken line pinned to an offset from the start of the workout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cue {
    pub offset_seconds: u64,
    pub text: String,
}

impl Cue {
    pub fn new(offset_seconds: u64, text: impl Into<String>) -> Self {
        Self {
            offset_seconds,
            text: text.into(),
        }
    }

    pub fn offset_ms(&self) -> u64 {
        self.offset_seconds * 1000
    }
}

/// Extracts all cues from raw script text, ordered by offset.
///
/// Lines that do not match are ignored, so an empty result means
/// "nothing to say", not a parse failure. Equal offsets keep source order.
pub fn parse(script_text: &str) -> Vec<Cue> {
    let mut cues: Vec<Cue> = CUE_PATTERN
        .captures_iter(script_text)
        .filter_map(|caps| {
            let minutes: u64 = caps[1].parse().ok()?;
            let seconds: u64 = caps[2].parse().ok()?;
            let text = normalize_whitespace(&caps[3]);
            if text.is_empty() {
                return None;
            }
            Some(Cue::new(minutes * 60 + seconds, text))
        })
        .collect();

    // sort_by_key is stable
    cues.sort_by_key(|c| c.offset_seconds);
    cues
}

fn normalize_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
