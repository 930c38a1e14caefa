use super::cue::Cue;
use regex::Regex;
use std::sync::LazyLock;

/// Extra time appended after the last cue when the script carries no header.
pub const FALLBACK_BUFFER_SECS: u64 = 300;

/// Used when a script has neither a duration header nor any cue.
pub const DEFAULT_DURATION_SECS: u64 = 2400;

/// A header rule: returns the stated length in minutes if it recognises the text.
type HeaderRule = Box<dyn Fn(&str) -> Option<u64> + Send + Sync>;

fn minutes_rule(pattern: &'static str) -> HeaderRule {
    let re = Regex::new(pattern).expect("duration pattern is valid");
    Box::new(move |text: &str| re.captures(text)?.get(1)?.as_str().parse::<u64>().ok())
}

/// Tried in order; the first rule that matches wins.
static HEADER_RULES: LazyLock<Vec<HeaderRule>> = LazyLock::new(|| {
    vec![
        minutes_rule(r"(?i)Total Duration:\s*(\d+)\s*minutes"),
        minutes_rule(r"(?i)Duration:\s*(\d+)\s*minutes"),
        minutes_rule(r"(?i)(\d+)\s*minutes\s*total"),
    ]
});

/// Length of the silent bed for a script, in seconds.
///
/// `fallback_cues` are the cues parsed from the same script.
pub fn resolve(script_text: &str, fallback_cues: &[Cue]) -> u64 {
    if let Some(minutes) = HEADER_RULES.iter().find_map(|rule| rule(script_text)) {
        return minutes.saturating_mul(60);
    }

    match fallback_cues.iter().map(|c| c.offset_seconds).max() {
        Some(last) => last + FALLBACK_BUFFER_SECS,
        None => DEFAULT_DURATION_SECS,
    }
}
