use {std::time::Duration, video::CameraConfig};

pub const COACH_INTERVAL: Duration = Duration::from_millis(1500);
pub const POSTURE_SCAN_INTERVAL: Duration = Duration::from_millis(500);

const MIN_STILL_QUALITY: u8 = 70;
const MAX_STILL_QUALITY: u8 = 80;

/// Settings of one live session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    camera: CameraConfig,
    live_interval: Duration,
    still_quality: u8,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::posture_scan()
    }
}

impl SessionConfig {
    /// Still frames scored every 1.5 s.
    pub fn coach() -> Self {
        Self {
            camera: CameraConfig::default(),
            live_interval: COACH_INTERVAL,
            still_quality: MIN_STILL_QUALITY,
        }
    }

    /// Landmarks scored every 500 ms.
    pub fn posture_scan() -> Self {
        Self {
            camera: CameraConfig::default(),
            live_interval: POSTURE_SCAN_INTERVAL,
            still_quality: MIN_STILL_QUALITY,
        }
    }

    pub fn with_camera(mut self, camera: CameraConfig) -> Self {
        self.camera = camera;
        self
    }

    pub fn with_live_interval(mut self, interval: Duration) -> Self {
        self.live_interval = interval;
        self
    }

    /// JPEG quality of still frames, clamped to 70..=80.
    pub fn with_still_quality(mut self, quality: u8) -> Self {
        self.still_quality = quality.clamp(MIN_STILL_QUALITY, MAX_STILL_QUALITY);
        self
    }

    pub fn camera(&self) -> &CameraConfig {
        &self.camera
    }

    pub fn live_interval(&self) -> Duration {
        self.live_interval
    }

    pub fn still_quality(&self) -> u8 {
        self.still_quality
    }
}
