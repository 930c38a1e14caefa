pub mod client;

use crate::error::BackendError;
use async_trait::async_trait;

pub use client::ElevenLabsService;

/// Text-to-speech backend: text in, encoded audio bytes out.
#[async_trait]
pub trait SpeechBackend: Send + Sync {
    async fn synthesize(&self, text: &str, voice_id: &str) -> Result<Vec<u8>, BackendError>;
}
