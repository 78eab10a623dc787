//! Camera acquisition and frame sampling.
//!
//! `MediaDevices` hands out `MediaStream`s; a stream owns its tracks and stops
//! them when dropped. Samplers attach to a stream and turn its frames into
//! `PoseSample`s on demand.

mod config;
pub use config::*;

mod error;
pub use error::*;

mod media;
pub use media::*;

mod sampler;
pub use sampler::*;

mod track;
pub use track::*;

#[cfg(feature = "v4l2")]
pub mod v4l2;

#[cfg(feature = "v4l2")]
pub use v4l2::V4l2Devices;
