//! Audio subsystem: decoding and canonical WAV transcoding

pub mod decoder;
pub mod transcoder;
pub mod types;

pub use decoder::{AudioDecoder, SymphoniaDecoder};
pub use transcoder::Transcoder;
pub use types::DecodedAudio;
