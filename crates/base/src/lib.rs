//! Shared primitives for the neuroposture workspace.
//!
//! Logging setup, epoch-based liveness stamps, the single-slot `Latest` cell
//! that decouples producers from slower consumers, and pose sample types.

mod epoch;
pub use epoch::*;

pub mod logging;
pub use logging::{FileLogger, StdoutLogger, init_file_logger, init_stdout_logger};

mod latest;
pub use latest::*;

mod pose;
pub use pose::*;

mod vec2;
pub use vec2::*;

// Re-export log crate so downstream crates can use base::log::*
pub use log;
