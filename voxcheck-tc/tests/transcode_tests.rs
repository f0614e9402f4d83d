//! Transcoder integration tests
//!
//! Exercises the full decode → downmix → quantize → frame pipeline, both
//! with a stub decoder (synthetic fixtures, no codec involved) and with the
//! symphonia decoder fed hound-generated WAV bytes.

use std::io::Cursor;
use std::sync::Arc;

use voxcheck_tc::audio::decoder::{AudioDecoder, SymphoniaDecoder};
use voxcheck_tc::audio::types::DecodedAudio;
use voxcheck_tc::{Error, Transcoder};

/// Decoder stub that returns a fixed synthetic fixture regardless of input
struct StubDecoder {
    fixture: DecodedAudio,
}

impl AudioDecoder for StubDecoder {
    fn decode(&self, _bytes: &[u8]) -> voxcheck_tc::Result<DecodedAudio> {
        Ok(self.fixture.clone())
    }
}

fn stub_transcoder(sample_rate: u32, channels: Vec<Vec<f32>>) -> Transcoder {
    Transcoder::new(Arc::new(StubDecoder {
        fixture: DecodedAudio::new(sample_rate, channels),
    }))
}

/// Build an in-memory 16-bit PCM WAV from planar channel data
fn wav_fixture(channels: &[Vec<i16>], sample_rate: u32) -> Vec<u8> {
    let spec = hound::WavSpec {
        channels: channels.len() as u16,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    let mut writer = hound::WavWriter::new(&mut cursor, spec).expect("create WAV writer");
    let frames = channels[0].len();
    for i in 0..frames {
        for channel in channels {
            writer.write_sample(channel[i]).expect("write sample");
        }
    }
    writer.finalize().expect("finalize WAV");

    cursor.into_inner()
}

fn header_u16(wav: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes(wav[offset..offset + 2].try_into().unwrap())
}

fn header_u32(wav: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes(wav[offset..offset + 4].try_into().unwrap())
}

fn data_samples(wav: &[u8]) -> Vec<i16> {
    wav[44..]
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes(pair.try_into().unwrap()))
        .collect()
}

// =============================================================================
// Stub-decoder pipeline tests
// =============================================================================

#[tokio::test]
async fn test_header_matches_canonical_layout() {
    let transcoder = stub_transcoder(22050, vec![vec![0.0; 100]]);

    let wav = transcoder.transcode(Vec::new()).await.unwrap();

    assert_eq!(wav.len(), 44 + 200);
    assert_eq!(&wav[0..4], b"RIFF");
    assert_eq!(header_u32(&wav, 4), 36 + 200);
    assert_eq!(&wav[8..12], b"WAVE");
    assert_eq!(&wav[12..16], b"fmt ");
    assert_eq!(header_u32(&wav, 16), 16);
    assert_eq!(header_u16(&wav, 20), 1); // uncompressed PCM
    assert_eq!(header_u16(&wav, 22), 1); // mono
    assert_eq!(header_u32(&wav, 24), 22050);
    assert_eq!(header_u32(&wav, 28), 44100); // byte rate
    assert_eq!(header_u16(&wav, 32), 2); // block align
    assert_eq!(header_u16(&wav, 34), 16); // bits per sample
    assert_eq!(&wav[36..40], b"data");
    assert_eq!(header_u32(&wav, 40), 200);
}

#[tokio::test]
async fn test_output_is_mono_regardless_of_input_channels() {
    for channel_count in [1usize, 2, 6] {
        let channels = vec![vec![0.25; 10]; channel_count];
        let transcoder = stub_transcoder(44100, channels);

        let wav = transcoder.transcode(Vec::new()).await.unwrap();

        assert_eq!(header_u16(&wav, 22), 1, "{} channels in", channel_count);
        assert_eq!(header_u32(&wav, 40), 20);
    }
}

#[tokio::test]
async fn test_cancelling_stereo_downmixes_to_silence() {
    let transcoder = stub_transcoder(44100, vec![vec![0.5, -0.5], vec![-0.5, 0.5]]);

    let wav = transcoder.transcode(Vec::new()).await.unwrap();

    assert_eq!(data_samples(&wav), vec![0, 0]);
}

#[tokio::test]
async fn test_quantization_endpoints_and_clamping() {
    let transcoder = stub_transcoder(44100, vec![vec![1.0, -1.0, 0.0, 1.5, -2.0]]);

    let wav = transcoder.transcode(Vec::new()).await.unwrap();

    assert_eq!(data_samples(&wav), vec![32767, -32768, 0, 32767, -32768]);
}

#[tokio::test]
async fn test_zero_frame_decode_is_unsupported_format() {
    let transcoder = stub_transcoder(44100, vec![Vec::new(), Vec::new()]);

    let result = transcoder.transcode(Vec::new()).await;

    assert!(matches!(result, Err(Error::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_concurrent_transcodes_do_not_cross_contaminate() {
    let left = stub_transcoder(44100, vec![vec![1.0; 4]]);
    let right = stub_transcoder(48000, vec![vec![-1.0; 7]]);

    let (a, b) = tokio::join!(left.transcode(Vec::new()), right.transcode(Vec::new()));
    let (a, b) = (a.unwrap(), b.unwrap());

    assert_eq!(header_u32(&a, 24), 44100);
    assert_eq!(a.len(), 44 + 8);
    assert_eq!(data_samples(&a), vec![32767; 4]);

    assert_eq!(header_u32(&b, 24), 48000);
    assert_eq!(b.len(), 44 + 14);
    assert_eq!(data_samples(&b), vec![-32768; 7]);
}

// =============================================================================
// Symphonia decoder tests
// =============================================================================

#[test]
fn test_decode_mono_wav_fixture() {
    let bytes = wav_fixture(&[vec![0, 16384, -16384, -32768]], 44100);

    let decoded = SymphoniaDecoder::new().decode(&bytes).unwrap();

    assert_eq!(decoded.sample_rate, 44100);
    assert_eq!(decoded.channel_count(), 1);
    assert_eq!(decoded.frame_count(), 4);

    // symphonia normalizes i16 by 32768
    let expected = [0.0f32, 0.5, -0.5, -1.0];
    for (sample, want) in decoded.channels[0].iter().zip(expected) {
        assert!((sample - want).abs() < 1e-6, "got {} want {}", sample, want);
    }
}

#[test]
fn test_decode_stereo_wav_fixture() {
    let bytes = wav_fixture(&[vec![8192; 50], vec![-8192; 50]], 48000);

    let decoded = SymphoniaDecoder::new().decode(&bytes).unwrap();

    assert_eq!(decoded.sample_rate, 48000);
    assert_eq!(decoded.channel_count(), 2);
    assert_eq!(decoded.frame_count(), 50);
    assert!(decoded.channels[0].iter().all(|&s| s > 0.0));
    assert!(decoded.channels[1].iter().all(|&s| s < 0.0));
}

#[test]
fn test_empty_input_is_decode_error() {
    let result = SymphoniaDecoder::new().decode(&[]);
    assert!(matches!(result, Err(Error::Decode(_))));
}

#[test]
fn test_garbage_input_is_decode_error() {
    let garbage: Vec<u8> = (0u32..4096).map(|i| (i * 37 % 251) as u8).collect();

    let result = SymphoniaDecoder::new().decode(&garbage);
    assert!(matches!(result, Err(Error::Decode(_))));
}

#[tokio::test]
async fn test_end_to_end_wav_through_default_decoder() {
    // Stereo input with matching channels: downmix is the identity, and
    // negative i16 samples survive the i16 → f32 → i16 trip exactly
    // (both scale factors are 32768 on that side of zero).
    let bytes = wav_fixture(&[vec![-1000, -2, -32768], vec![-1000, -2, -32768]], 44100);

    let transcoder = Transcoder::with_default_decoder();
    let wav = transcoder.transcode(bytes).await.unwrap();

    assert_eq!(header_u16(&wav, 22), 1);
    assert_eq!(header_u32(&wav, 24), 44100);
    assert_eq!(data_samples(&wav), vec![-1000, -2, -32768]);

    // The output must itself be decodable
    let redecoded = SymphoniaDecoder::new().decode(&wav).unwrap();
    assert_eq!(redecoded.channel_count(), 1);
    assert_eq!(redecoded.frame_count(), 3);
}
