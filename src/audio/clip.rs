/// Length of the placeholder that stands in for a cue the backend failed to voice.
pub const SILENCE_FALLBACK_MS: u64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipKind {
    Speech,
    SilenceFallback,
}

/// Decoded mono audio for one cue.
#[derive(Debug, Clone, PartialEq)]
pub struct Clip {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
    pub kind: ClipKind,
}

impl Clip {
    pub fn speech(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
            kind: ClipKind::Speech,
        }
    }

    pub fn silence(duration_ms: u64, sample_rate: u32) -> Self {
        Self {
            samples: vec![0.0; ms_to_samples(duration_ms, sample_rate)],
            sample_rate,
            kind: ClipKind::SilenceFallback,
        }
    }

    /// The fixed one-second placeholder for a transient synthesis failure.
    pub fn fallback(sample_rate: u32) -> Self {
        Self::silence(SILENCE_FALLBACK_MS, sample_rate)
    }

    pub fn is_fallback(&self) -> bool {
        self.kind == ClipKind::SilenceFallback
    }

    pub fn duration_ms(&self) -> u64 {
        samples_to_ms(self.samples.len(), self.sample_rate)
    }
}

/// Saturates instead of overflowing for out-of-range durations.
pub fn ms_to_samples(ms: u64, sample_rate: u32) -> usize {
    let samples = ms as u128 * sample_rate as u128 / 1000;
    usize::try_from(samples).unwrap_or(usize::MAX)
}

pub fn samples_to_ms(samples: usize, sample_rate: u32) -> u64 {
    if sample_rate == 0 {
        return 0;
    }
    samples as u64 * 1000 / sample_rate as u64
}
