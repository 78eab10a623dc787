//! Session controllers: the live posture-analysis loop and the simulated
//! wearable uplink.

mod config;
pub use config::*;

mod error;
pub use error::*;

mod live;
pub use live::*;

mod state;
pub use state::*;

pub mod wearable;
pub use wearable::WearableSimulator;
