#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use workout_cues::audio::Clip;
use workout_cues::error::{BackendError, SynthesisFailure};
use workout_cues::services::tts::SpeechBackend;
use workout_cues::synth::ClipSource;
use workout_cues::ComposeOptions;

pub const TEST_RATE: u32 = 1000;

type Responder = dyn Fn(usize, &str) -> Result<Vec<u8>, BackendError> + Send + Sync;

/// Backend stub: counts calls and answers via a closure of (call index, text).
pub struct StubBackend {
    pub calls: Arc<AtomicUsize>,
    pub voices: Arc<Mutex<Vec<String>>>,
    responder: Box<Responder>,
}

impl StubBackend {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(usize, &str) -> Result<Vec<u8>, BackendError> + Send + Sync + 'static,
    {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            voices: Arc::new(Mutex::new(Vec::new())),
            responder: Box::new(responder),
        }
    }

    /// Always answers with a short tone.
    pub fn tone() -> Self {
        Self::new(|_, _| Ok(pcm_tone(200, 16384)))
    }

    /// Answers with a tone except on call `index`, which fails with `message`.
    pub fn failing_on(index: usize, message: &'static str) -> Self {
        Self::new(move |i, _| {
            if i == index {
                Err(BackendError::new(message))
            } else {
                Ok(pcm_tone(200, 16384))
            }
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SpeechBackend for StubBackend {
    async fn synthesize(&self, text: &str, voice_id: &str) -> Result<Vec<u8>, BackendError> {
        let index = self.calls.fetch_add(1, Ordering::SeqCst);
        self.voices.lock().unwrap().push(voice_id.to_string());
        (self.responder)(index, text)
    }
}

/// Clip source stub returning constant-valued clips, recording requested text.
pub struct RecordingSource {
    pub texts: Vec<String>,
    pub value_for: Box<dyn Fn(&str) -> Result<f32, SynthesisFailure> + Send>,
    pub clip_len: usize,
}

impl RecordingSource {
    pub fn constant(value: f32) -> Self {
        Self {
            texts: Vec::new(),
            value_for: Box::new(move |_: &str| Ok::<f32, SynthesisFailure>(value)),
            clip_len: 100,
        }
    }
}

#[async_trait]
impl ClipSource for RecordingSource {
    async fn synthesize(&mut self, text: &str) -> Result<Clip, SynthesisFailure> {
        self.texts.push(text.to_string());
        let value = (self.value_for)(text)?;
        Ok(Clip::speech(vec![value; self.clip_len], TEST_RATE))
    }
}

/// Raw 16-bit little-endian mono PCM of a constant level.
pub fn pcm_tone(samples: usize, level: i16) -> Vec<u8> {
    std::iter::repeat(level.to_le_bytes())
        .take(samples)
        .flatten()
        .collect()
}

pub fn test_options(trailing_buffer_secs: u64) -> ComposeOptions {
    ComposeOptions {
        sample_rate: TEST_RATE,
        trailing_buffer_secs,
        pacing: std::time::Duration::ZERO,
        max_bed_secs: 4 * 60 * 60,
    }
}
