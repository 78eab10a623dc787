mod client;
pub use client::*;

mod config;
pub use config::*;

mod error;
pub use error::*;

mod identity;
pub use identity::*;

mod scorer;
pub use scorer::*;

mod telemetry;
pub use telemetry::*;

mod wire;
pub use wire::*;
