//! Cue voicing: the quota-latched speech generator and the timeline
//! compositor that drives it.

pub mod compositor;
pub mod generator;

use crate::audio::Clip;
use crate::error::SynthesisFailure;
use async_trait::async_trait;

pub use compositor::{compose, ComposeOptions};
pub use generator::{is_quota_error, GeneratorState, SpeechGenerator, QUOTA_MARKERS};

/// Anything that can turn cue text into a clip.
#[async_trait]
pub trait ClipSource: Send {
    async fn synthesize(&mut self, text: &str) -> Result<Clip, SynthesisFailure>;

    /// True once no further call can succeed.
    fn is_exhausted(&self) -> bool {
        false
    }
}
