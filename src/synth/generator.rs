use super::ClipSource;
use crate::audio::{decode, Clip};
use crate::error::SynthesisFailure;
use crate::services::tts::SpeechBackend;
use async_trait::async_trait;
use tracing::{debug, error, warn};

/// Substrings in a backend error that mean the account is out of credits.
/// Matched case-sensitively against the provider's error text.
pub const QUOTA_MARKERS: &[&str] = &["quota_exceeded", "exceeds your quota"];

pub fn is_quota_error(message: &str) -> bool {
    QUOTA_MARKERS.iter().any(|marker| message.contains(marker))
}

/// Voice selection plus the write-once quota latch.
#[derive(Debug, Clone)]
pub struct GeneratorState {
    pub voice_id: String,
    quota_exhausted: bool,
}

impl GeneratorState {
    pub fn new(voice_id: impl Into<String>) -> Self {
        Self {
            voice_id: voice_id.into(),
            quota_exhausted: false,
        }
    }

    pub fn quota_exhausted(&self) -> bool {
        self.quota_exhausted
    }

    /// There is no way to clear the latch.
    fn latch_quota(&mut self) {
        self.quota_exhausted = true;
    }
}

pub struct SpeechGenerator<B> {
    backend: B,
    state: GeneratorState,
    sample_rate: u32,
}

impl<B: SpeechBackend> SpeechGenerator<B> {
    pub fn new(backend: B, voice_id: impl Into<String>, sample_rate: u32) -> Self {
        Self {
            backend,
            state: GeneratorState::new(voice_id),
            sample_rate,
        }
    }

    pub fn state(&self) -> &GeneratorState {
        &self.state
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Voices one cue.
    ///
    /// Only quota exhaustion is reported as an error (always permanent).
    /// Any other backend or decode failure yields one second of silence so a
    /// single bad cue never sinks the script.
    pub async fn synthesize(&mut self, text: &str) -> Result<Clip, SynthesisFailure> {
        if self.state.quota_exhausted() {
            return Err(SynthesisFailure::permanent("quota exhausted"));
        }

        let bytes = match self.backend.synthesize(text, &self.state.voice_id).await {
            Ok(bytes) => bytes,
            Err(e) if is_quota_error(&e.message) => {
                error!("Backend quota exhausted, halting synthesis: {}", e);
                self.state.latch_quota();
                return Err(SynthesisFailure::permanent(e.message));
            }
            Err(e) => {
                warn!("Error generating speech for '{}': {}", preview(text), e);
                return Ok(Clip::fallback(self.sample_rate));
            }
        };

        match decode(&bytes, self.sample_rate) {
            Ok(clip) => {
                debug!("Decoded clip of {} ms", clip.duration_ms());
                Ok(clip)
            }
            Err(e) => {
                warn!("Could not decode speech for '{}': {}", preview(text), e);
                Ok(Clip::fallback(self.sample_rate))
            }
        }
    }
}

#[async_trait]
impl<B: SpeechBackend> ClipSource for SpeechGenerator<B> {
    async fn synthesize(&mut self, text: &str) -> Result<Clip, SynthesisFailure> {
        SpeechGenerator::synthesize(self, text).await
    }

    fn is_exhausted(&self) -> bool {
        self.state.quota_exhausted()
    }
}

pub(crate) fn preview(text: &str) -> String {
    const PREVIEW_CHARS: usize = 50;
    if text.chars().count() <= PREVIEW_CHARS {
        return text.to_string();
    }
    let mut short: String = text.chars().take(PREVIEW_CHARS).collect();
    short.push_str("...");
    short
}
