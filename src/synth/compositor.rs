use super::generator::preview;
use super::ClipSource;
use crate::audio::{Clip, Timeline};
use crate::config::AudioSettings;
use crate::error::ComposeError;
use crate::script::Cue;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct ComposeOptions {
    pub sample_rate: u32,
    /// Seconds of extra bed after the nominal duration so a late cue is not cut off.
    pub trailing_buffer_secs: u64,
    /// Flat wait between backend calls.
    pub pacing: Duration,
    /// Longest bed (duration plus trailing buffer) that will be allocated.
    pub max_bed_secs: u64,
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self::from(&AudioSettings::default())
    }
}

impl From<&AudioSettings> for ComposeOptions {
    fn from(settings: &AudioSettings) -> Self {
        Self {
            sample_rate: settings.sample_rate,
            trailing_buffer_secs: settings.trailing_buffer_seconds,
            pacing: settings.pacing(),
            max_bed_secs: settings.max_duration_seconds,
        }
    }
}

/// Builds the silent bed for a script and mixes each cue's clip in at its
/// offset, one synthesis call at a time in ascending offset order.
///
/// A permanent synthesis failure stops the script at once with
/// `QuotaExhausted`; later cues are not attempted. A bed longer than
/// `max_bed_secs` is refused before any synthesis.
pub async fn compose<S>(
    cues: &[Cue],
    total_duration_seconds: u64,
    source: &mut S,
    options: &ComposeOptions,
    cancel: &CancellationToken,
) -> Result<Timeline, ComposeError>
where
    S: ClipSource + ?Sized,
{
    let bed_secs = total_duration_seconds.saturating_add(options.trailing_buffer_secs);
    if bed_secs > options.max_bed_secs {
        return Err(ComposeError::DurationTooLong {
            seconds: bed_secs,
            max: options.max_bed_secs,
        });
    }
    let mut timeline = Timeline::silent(bed_secs.saturating_mul(1000), options.sample_rate);

    let mut ordered: Vec<&Cue> = cues.iter().collect();
    ordered.sort_by_key(|c| c.offset_seconds);

    info!(
        "Creating audio with {} speech segments over {} seconds",
        ordered.len(),
        total_duration_seconds
    );

    for (i, cue) in ordered.iter().enumerate() {
        if i > 0 && !options.pacing.is_zero() {
            tokio::select! {
                _ = cancel.cancelled() => return Err(ComposeError::Interrupted),
                _ = tokio::time::sleep(options.pacing) => {}
            }
        }

        info!(
            "  Processing {}/{}: {}s - {}",
            i + 1,
            ordered.len(),
            cue.offset_seconds,
            preview(&cue.text)
        );

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(ComposeError::Interrupted),
            r = source.synthesize(&cue.text) => r,
        };

        let clip = match result {
            Ok(clip) => clip,
            Err(failure) if failure.permanent => {
                warn!("Stopping at cue {}/{}: {}", i + 1, ordered.len(), failure);
                return Err(ComposeError::QuotaExhausted);
            }
            Err(failure) => {
                warn!("Cue at {}s replaced by silence: {}", cue.offset_seconds, failure);
                Clip::fallback(options.sample_rate)
            }
        };

        if !timeline.overlay(&clip, cue.offset_ms()) {
            debug!("Cue at {}s lies past the end of the timeline, skipped", cue.offset_seconds);
        }
    }

    Ok(timeline)
}
