use std::path::PathBuf;
use thiserror::Error;

/// Failure reported by a synthesis backend. The message is the only channel
/// quota exhaustion is detected through.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct BackendError {
    pub message: String,
}

impl BackendError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("empty audio payload")]
    Empty,
    #[error("raw PCM payload has odd length {0}")]
    OddLength(usize),
    #[error("wav decode failed: {0}")]
    Wav(#[from] hound::Error),
    #[error("unsupported wav sample format: {bits} bits")]
    UnsupportedWav { bits: u16 },
    #[error("resampling failed: {0}")]
    Resample(String),
}

/// Raised by a clip source when a cue cannot be voiced.
/// `permanent` means no later call on the same source can succeed either.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("synthesis failed (permanent={permanent}): {message}")]
pub struct SynthesisFailure {
    pub permanent: bool,
    pub message: String,
}

impl SynthesisFailure {
    pub fn permanent(message: impl Into<String>) -> Self {
        Self { permanent: true, message: message.into() }
    }

    pub fn transient(message: impl Into<String>) -> Self {
        Self { permanent: false, message: message.into() }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComposeError {
    #[error("quota exhausted")]
    QuotaExhausted,
    #[error("interrupted")]
    Interrupted,
    #[error("duration of {seconds} s exceeds the {max} s limit")]
    DurationTooLong { seconds: u64, max: u64 },
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("wav encode failed: {0}")]
    Wav(#[from] hound::Error),
}

/// Per-file failure classification used by the batch orchestrator.
#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("script not found: {}", .0.display())]
    MissingInput(PathBuf),
    #[error("no cues found")]
    NoCues,
    #[error("quota exhausted")]
    QuotaExhausted,
    #[error("interrupted")]
    Interrupted,
    #[error("duration of {seconds} s exceeds the {max} s limit")]
    DurationTooLong { seconds: u64, max: u64 },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("export failed: {0}")]
    Export(#[from] ExportError),
}

impl From<ComposeError> for ProcessError {
    fn from(e: ComposeError) -> Self {
        match e {
            ComposeError::QuotaExhausted => ProcessError::QuotaExhausted,
            ComposeError::Interrupted => ProcessError::Interrupted,
            ComposeError::DurationTooLong { seconds, max } => {
                ProcessError::DurationTooLong { seconds, max }
            }
        }
    }
}

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("scripts directory not found: {}", .0.display())]
    MissingInput(PathBuf),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("no ElevenLabs API key configured (set elevenlabs.api_key, ELEVENLABS_API_KEY or --api-key)")]
    MissingApiKey,
}
