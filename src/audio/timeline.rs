use super::clip::{ms_to_samples, samples_to_ms, Clip};
use super::decode::resample;
use crate::error::ExportError;
use hound::{SampleFormat, WavSpec, WavWriter};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Full-length mono buffer that cue clips are mixed onto.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl Timeline {
    pub fn silent(duration_ms: u64, sample_rate: u32) -> Self {
        Self {
            samples: vec![0.0; ms_to_samples(duration_ms, sample_rate)],
            sample_rate,
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn duration_ms(&self) -> u64 {
        samples_to_ms(self.samples.len(), self.sample_rate)
    }

    /// Mixes `clip` in starting at `position_ms`, truncating it at the end of
    /// the buffer. Returns false (and leaves the buffer untouched) when the
    /// position is at or past the end.
    pub fn overlay(&mut self, clip: &Clip, position_ms: u64) -> bool {
        let start = ms_to_samples(position_ms, self.sample_rate);
        if start >= self.samples.len() {
            return false;
        }

        let converted;
        let source: &[f32] = if clip.sample_rate == self.sample_rate {
            &clip.samples
        } else {
            warn!(
                "Clip at {}Hz overlaid on {}Hz timeline, converting",
                clip.sample_rate, self.sample_rate
            );
            converted = resample(&clip.samples, clip.sample_rate, self.sample_rate)
                .unwrap_or_else(|e| {
                    warn!("Clip conversion failed, dropping clip: {}", e);
                    Vec::new()
                });
            &converted
        };

        for (dst, src) in self.samples[start..].iter_mut().zip(source) {
            *dst += *src;
        }
        true
    }

    /// Writes the buffer as 16-bit PCM WAV. The file only appears at `path`
    /// once it has been written completely.
    pub fn export_wav(&self, path: &Path) -> Result<(), ExportError> {
        let part = part_path(path);

        if let Err(e) = self.write_wav(&part) {
            let _ = fs::remove_file(&part);
            return Err(e.into());
        }

        if let Err(e) = fs::rename(&part, path) {
            let _ = fs::remove_file(&part);
            return Err(e.into());
        }

        debug!("Exported {} ms to {}", self.duration_ms(), path.display());
        Ok(())
    }

    fn write_wav(&self, path: &Path) -> Result<(), hound::Error> {
        let spec = WavSpec {
            channels: 1,
            sample_rate: self.sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };

        let mut writer = WavWriter::create(path, spec)?;
        for sample in &self.samples {
            let clamped = sample.clamp(-1.0, 1.0);
            writer.write_sample((clamped * i16::MAX as f32) as i16)?;
        }
        writer.finalize()
    }
}

fn part_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".part");
    path.with_file_name(name)
}
