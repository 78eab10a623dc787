//! Frame encoding for the neuroposture workspace.
//!
//! Camera frames arrive as YUYV, RGB or MJPEG. The still-frame sampler needs
//! them as base64 JPEG text, so this crate converts between those formats.

mod error;
pub use error::*;

mod image;
pub use image::*;

mod jpeg;
pub use jpeg::*;

mod pixelformat;
pub use pixelformat::*;

mod rgb;
pub use rgb::*;
