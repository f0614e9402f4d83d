//! # VoxCheck Mock Scoring Server (voxcheck-ms)
//!
//! Stand-in for the real scoring backend during local testing: accepts a
//! voice clip upload and returns a random risk score.

pub mod api;

pub use api::create_router;
