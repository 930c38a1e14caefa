use super::clip::Clip;
use crate::error::DecodeError;
use hound::{SampleFormat, WavReader};
use rubato::{FftFixedIn, Resampler};
use std::io::Cursor;
use tracing::debug;

const RESAMPLE_CHUNK: usize = 1024;

/// Decodes a backend payload into a mono clip at `sample_rate`.
///
/// RIFF/WAV payloads are parsed and converted; anything else is taken as raw
/// 16-bit little-endian mono PCM already at `sample_rate`.
pub fn decode(bytes: &[u8], sample_rate: u32) -> Result<Clip, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::Empty);
    }

    if bytes.starts_with(b"RIFF") {
        return decode_wav(bytes, sample_rate);
    }

    if bytes.len() % 2 != 0 {
        return Err(DecodeError::OddLength(bytes.len()));
    }

    let samples = bytes
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]) as f32 / i16::MAX as f32)
        .collect();

    Ok(Clip::speech(samples, sample_rate))
}

fn decode_wav(bytes: &[u8], sample_rate: u32) -> Result<Clip, DecodeError> {
    let mut reader = WavReader::new(Cursor::new(bytes))?;
    let spec = reader.spec();

    let interleaved: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader.samples::<f32>().collect::<Result<_, _>>()?,
        SampleFormat::Int => {
            if spec.bits_per_sample == 0 || spec.bits_per_sample > 32 {
                return Err(DecodeError::UnsupportedWav {
                    bits: spec.bits_per_sample,
                });
            }
            let scale = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<Result<_, _>>()?
        }
    };

    let channels = spec.channels.max(1) as usize;
    let mono: Vec<f32> = if channels == 1 {
        interleaved
    } else {
        interleaved
            .chunks(channels)
            .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
            .collect()
    };

    let samples = if spec.sample_rate == sample_rate {
        mono
    } else {
        debug!("Resampling clip {}Hz -> {}Hz", spec.sample_rate, sample_rate);
        resample(&mono, spec.sample_rate, sample_rate)?
    };

    Ok(Clip::speech(samples, sample_rate))
}

/// Converts mono samples between rates, trimming the resampler's delay line.
pub fn resample(input: &[f32], from: u32, to: u32) -> Result<Vec<f32>, DecodeError> {
    if from == to || input.is_empty() {
        return Ok(input.to_vec());
    }

    let mut resampler = FftFixedIn::<f32>::new(from as usize, to as usize, RESAMPLE_CHUNK, 2, 1)
        .map_err(|e| DecodeError::Resample(e.to_string()))?;

    let delay = resampler.output_delay();
    let expected = (input.len() as u64 * to as u64 / from as u64) as usize;
    let mut out = Vec::with_capacity(expected + delay);

    let mut pos = 0;
    while input.len() - pos >= resampler.input_frames_next() {
        let n = resampler.input_frames_next();
        let wave = [&input[pos..pos + n]];
        let chunk = resampler
            .process(&wave[..], None)
            .map_err(|e| DecodeError::Resample(e.to_string()))?;
        out.extend_from_slice(&chunk[0]);
        pos += n;
    }

    if pos < input.len() {
        let wave = [&input[pos..]];
        let chunk = resampler
            .process_partial(Some(&wave[..]), None)
            .map_err(|e| DecodeError::Resample(e.to_string()))?;
        out.extend_from_slice(&chunk[0]);
    }

    // Flush the delay line
    while out.len() < expected + delay {
        let chunk = resampler
            .process_partial::<&[f32]>(None, None)
            .map_err(|e| DecodeError::Resample(e.to_string()))?;
        if chunk[0].is_empty() {
            break;
        }
        out.extend_from_slice(&chunk[0]);
    }

    out.drain(..delay.min(out.len()));
    out.truncate(expected);
    Ok(out)
}
