//! Audio decoder using symphonia
//!
//! Decodes a recorded clip (MP3, FLAC, OGG/Vorbis, AAC/M4A, WAV) from an
//! in-memory byte buffer to planar f32 PCM samples.

use crate::audio::types::DecodedAudio;
use crate::error::{Error, Result};
use std::io::Cursor;
use symphonia::core::audio::{AudioBuffer, AudioBufferRef, Signal};
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::conv::FromSample;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use symphonia::core::sample::Sample;
use tracing::{debug, warn};

/// Decoding capability injected into the transcoder.
///
/// Modeled as a trait so the transcoding pipeline stays pure and testable
/// with synthetic [`DecodedAudio`] fixtures, independent of any particular
/// decoding backend.
pub trait AudioDecoder: Send + Sync {
    /// Decode an encoded audio byte buffer to raw PCM samples.
    ///
    /// # Errors
    /// - `Error::Decode` if the bytes are not a decodable audio stream
    ///   (corrupt, empty, or unrecognized container)
    fn decode(&self, bytes: &[u8]) -> Result<DecodedAudio>;
}

/// Production decoder backed by symphonia's format probe and codec registry.
#[derive(Debug, Default)]
pub struct SymphoniaDecoder;

impl SymphoniaDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl AudioDecoder for SymphoniaDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedAudio> {
        if bytes.is_empty() {
            return Err(Error::Decode("empty audio buffer".to_string()));
        }

        // The recorded clip arrives as an opaque blob with no filename, so
        // the probe must identify the container by content alone.
        let mss = MediaSourceStream::new(Box::new(Cursor::new(bytes.to_vec())), Default::default());

        let probed = symphonia::default::get_probe()
            .format(
                &Hint::new(),
                mss,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .map_err(|e| Error::Decode(format!("Failed to probe format: {}", e)))?;

        let mut format = probed.format;

        // Get the default audio track
        let track = format
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
            .ok_or_else(|| Error::Decode("No audio track found".to_string()))?;

        let track_id = track.id;
        let codec_params = &track.codec_params;

        let sample_rate = codec_params
            .sample_rate
            .ok_or_else(|| Error::Decode("Sample rate not found".to_string()))?;

        let channel_count = codec_params
            .channels
            .map(|c| c.count())
            .ok_or_else(|| Error::Decode("Channel count not found".to_string()))?;

        debug!(
            "Audio format: sample_rate={}, channels={}",
            sample_rate, channel_count
        );

        let mut decoder = symphonia::default::get_codecs()
            .make(codec_params, &DecoderOptions::default())
            .map_err(|e| Error::Decode(format!("Failed to create decoder: {}", e)))?;

        // Decode all packets into planar channel buffers
        let mut channels: Vec<Vec<f32>> = Vec::with_capacity(channel_count);

        loop {
            let packet = match format.next_packet() {
                Ok(packet) => packet,
                Err(symphonia::core::errors::Error::IoError(ref e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    // End of stream
                    break;
                }
                Err(e) => {
                    return Err(Error::Decode(format!("Error reading packet: {}", e)));
                }
            };

            // Skip packets for other tracks
            if packet.track_id() != track_id {
                continue;
            }

            match decoder.decode(&packet) {
                Ok(decoded) => extend_planar_f32(&decoded, &mut channels),
                Err(symphonia::core::errors::Error::DecodeError(e)) => {
                    // Recoverable per-packet corruption, skip the packet
                    warn!("Decode error: {}", e);
                    continue;
                }
                Err(e) => {
                    return Err(Error::Decode(format!("Fatal decode error: {}", e)));
                }
            }
        }

        let decoded = DecodedAudio::new(sample_rate, channels);

        debug!(
            "Decoded {} frames across {} channels ({:.2}s)",
            decoded.frame_count(),
            decoded.channel_count(),
            decoded.duration_seconds()
        );

        Ok(decoded)
    }
}

/// Append one decoded packet's samples to the planar channel buffers,
/// converting whatever sample format the codec produced to f32.
fn extend_planar_f32(decoded: &AudioBufferRef, channels: &mut Vec<Vec<f32>>) {
    fn extend<S>(buf: &AudioBuffer<S>, channels: &mut Vec<Vec<f32>>)
    where
        S: Sample,
        f32: FromSample<S>,
    {
        let channel_count = buf.spec().channels.count();
        if channels.len() < channel_count {
            channels.resize_with(channel_count, Vec::new);
        }

        for (ch, samples) in channels.iter_mut().enumerate().take(channel_count) {
            samples.extend(buf.chan(ch).iter().map(|&s| f32::from_sample(s)));
        }
    }

    match decoded {
        AudioBufferRef::U8(buf) => extend(buf, channels),
        AudioBufferRef::U16(buf) => extend(buf, channels),
        AudioBufferRef::U24(buf) => extend(buf, channels),
        AudioBufferRef::U32(buf) => extend(buf, channels),
        AudioBufferRef::S8(buf) => extend(buf, channels),
        AudioBufferRef::S16(buf) => extend(buf, channels),
        AudioBufferRef::S24(buf) => extend(buf, channels),
        AudioBufferRef::S32(buf) => extend(buf, channels),
        AudioBufferRef::F32(buf) => extend(buf, channels),
        AudioBufferRef::F64(buf) => extend(buf, channels),
    }
}
