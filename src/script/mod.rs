//! Workout script text: cue extraction and duration resolution.

pub mod cue;
pub mod duration;

pub use cue::{parse, Cue};
pub use duration::{resolve, DEFAULT_DURATION_SECS, FALLBACK_BUFFER_SECS};
