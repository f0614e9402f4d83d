//! # VoxCheck Transcoding Client (voxcheck-tc)
//!
//! Converts a recorded voice clip into canonical mono 16-bit PCM WAV and
//! submits it to a scoring service.
//!
//! **Pipeline:** encoded clip bytes → decode (symphonia) → downmix to mono →
//! quantize to i16 → RIFF/WAVE framing → multipart upload → risk score

pub mod audio;
pub mod error;
pub mod upload;

pub use audio::transcoder::Transcoder;
pub use error::{Error, Result};
pub use upload::ScoringClient;
