//! View models for the dashboard, device and diet-plan screens.
//!
//! Everything here derives display data from API responses; nothing renders.

mod devices;
pub use devices::*;

pub mod diet;
pub use diet::{DietPlan, DietPlanner, Progress};

mod risk;
pub use risk::*;

mod summary;
pub use summary::*;
