/// A single body landmark in normalized image space.
///
/// `x` and `y` are in [0, 1] relative to the frame; `z` is the estimator's
/// relative depth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl From<[f32; 3]> for Landmark {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self { x, y, z }
    }
}

/// One instant's pose snapshot, consumed once by the scorer.
#[derive(Debug, Clone, PartialEq)]
pub enum PoseSample {
    /// Ordered landmark set from a pose estimator.
    Landmarks(Vec<Landmark>),
    /// Base64-encoded JPEG still frame.
    Still(String),
}

impl PoseSample {
    pub fn is_empty(&self) -> bool {
        match self {
            PoseSample::Landmarks(points) => points.is_empty(),
            PoseSample::Still(data) => data.is_empty(),
        }
    }
}
