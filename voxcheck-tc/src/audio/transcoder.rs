//! Canonical WAV transcoding
//!
//! Converts an arbitrary encoded recording into canonical uncompressed audio:
//! mono, 16-bit signed PCM, RIFF/WAVE framed, little-endian throughout. The
//! output sample rate is whatever the source declared; the scoring backend
//! resamples on its side.
//!
//! Quantization intentionally mirrors the upstream consumer bit-for-bit:
//! negative samples scale by 32768, non-negative by 32767, truncating toward
//! zero. Downmix is a plain per-frame arithmetic mean, not a perceptual
//! downmix.

use crate::audio::decoder::{AudioDecoder, SymphoniaDecoder};
use crate::audio::types::DecodedAudio;
use crate::error::{Error, Result};
use std::sync::Arc;
use tracing::debug;

/// Size of the RIFF/WAVE header emitted ahead of the sample data
pub const WAV_HEADER_LEN: usize = 44;

/// Transcodes encoded audio buffers to canonical mono 16-bit PCM WAV.
///
/// Holds no mutable state; a single instance may serve any number of
/// concurrent [`transcode`](Transcoder::transcode) calls.
pub struct Transcoder {
    decoder: Arc<dyn AudioDecoder>,
}

impl Transcoder {
    /// Create a transcoder with an injected decoding capability
    pub fn new(decoder: Arc<dyn AudioDecoder>) -> Self {
        Self { decoder }
    }

    /// Create a transcoder backed by the symphonia decoder
    pub fn with_default_decoder() -> Self {
        Self::new(Arc::new(SymphoniaDecoder::new()))
    }

    /// Convert an encoded audio buffer to a canonical WAV byte buffer.
    ///
    /// Decoding and the sample math run on the blocking thread pool; the
    /// await is the operation's single suspension point.
    ///
    /// # Errors
    /// - `Error::Decode` if the input cannot be decoded as audio
    /// - `Error::UnsupportedFormat` if decoding yields zero channels or
    ///   zero frames
    pub async fn transcode(&self, input: Vec<u8>) -> Result<Vec<u8>> {
        let decoder = Arc::clone(&self.decoder);

        tokio::task::spawn_blocking(move || {
            let decoded = decoder.decode(&input)?;
            debug!(
                input_bytes = input.len(),
                frames = decoded.frame_count(),
                channels = decoded.channel_count(),
                sample_rate = decoded.sample_rate,
                "decoded recording"
            );
            transcode_decoded(&decoded)
        })
        .await
        .map_err(|e| Error::Internal(format!("transcode task failed: {}", e)))?
    }
}

/// Downmix, quantize, and frame already-decoded audio.
pub fn transcode_decoded(decoded: &DecodedAudio) -> Result<Vec<u8>> {
    if decoded.channel_count() == 0 || decoded.frame_count() == 0 {
        return Err(Error::UnsupportedFormat(format!(
            "decoded audio has {} channels and {} frames",
            decoded.channel_count(),
            decoded.frame_count()
        )));
    }
    if decoded.sample_rate == 0 {
        return Err(Error::UnsupportedFormat(
            "decoded audio declares a sample rate of 0".to_string(),
        ));
    }

    let mono = downmix(&decoded.channels);
    let samples = quantize(&mono);
    Ok(encode_wav(&samples, decoded.sample_rate))
}

/// Average all channels into one.
///
/// Per-frame arithmetic mean across channels. A single channel passes
/// through unchanged. Channels must have equal length.
pub fn downmix(channels: &[Vec<f32>]) -> Vec<f32> {
    match channels {
        [] => Vec::new(),
        [mono] => mono.clone(),
        _ => {
            let frame_count = channels[0].len();
            let channel_count = channels.len() as f32;

            (0..frame_count)
                .map(|i| channels.iter().map(|ch| ch[i]).sum::<f32>() / channel_count)
                .collect()
        }
    }
}

/// Map one float sample to a 16-bit signed integer.
///
/// Clamps to [-1.0, 1.0], then scales negative values by 32768 and
/// non-negative values by 32767 so the full signed range is covered without
/// overflow. Truncates toward zero rather than rounding, matching the
/// existing consumers of this format.
pub fn quantize_sample(sample: f32) -> i16 {
    let s = sample.clamp(-1.0, 1.0);
    if s < 0.0 {
        (s * 32768.0) as i16
    } else {
        (s * 32767.0) as i16
    }
}

/// Quantize a mono sample sequence to 16-bit PCM
pub fn quantize(samples: &[f32]) -> Vec<i16> {
    samples.iter().copied().map(quantize_sample).collect()
}

/// Frame quantized samples as a mono 16-bit PCM RIFF/WAVE byte buffer.
///
/// All multi-byte fields are little-endian. Total length is always
/// `44 + 2 * samples.len()`.
pub fn encode_wav(samples: &[i16], sample_rate: u32) -> Vec<u8> {
    let data_size = (samples.len() * 2) as u32;

    let mut out = Vec::with_capacity(WAV_HEADER_LEN + samples.len() * 2);

    // RIFF chunk
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_size).to_le_bytes());
    out.extend_from_slice(b"WAVE");

    // fmt chunk
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // PCM
    out.extend_from_slice(&1u16.to_le_bytes()); // mono
    out.extend_from_slice(&sample_rate.to_le_bytes());
    out.extend_from_slice(&(sample_rate * 2).to_le_bytes()); // byte rate
    out.extend_from_slice(&2u16.to_le_bytes()); // block align
    out.extend_from_slice(&16u16.to_le_bytes()); // bits per sample

    // data chunk
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_size.to_le_bytes());
    for &sample in samples {
        out.extend_from_slice(&sample.to_le_bytes());
    }

    out
}
