use {
    crate::*,
    base::{Landmark, Latest, PoseSample},
    image::Image,
    std::sync::{Arc, Mutex},
    tokio::task::JoinHandle,
};

// canvas-equivalent JPEG quality for still frames (0.7)
pub const DEFAULT_STILL_QUALITY: u8 = 70;

/// Turns a camera stream into pose samples.
///
/// A sampler is attached when the camera starts and detached when it stops.
/// `sample` is a cheap pull: it never waits on the camera or the estimator.
pub trait Sampler: Send + Sync + 'static {
    fn attach(&self, stream: &MediaStream) -> Result<(), CameraError>;

    fn detach(&self);

    /// Number of background tasks the sampler is currently running.
    fn background_tasks(&self) -> usize {
        0
    }

    /// Take a snapshot. `Ok(None)` means nothing is available yet.
    fn sample(&self) -> Result<Option<PoseSample>, CameraError>;
}

fn first_track(stream: &MediaStream) -> Result<Arc<VideoTrack>, CameraError> {
    stream
        .video_track()
        .cloned()
        .ok_or_else(|| CameraError::Stream("stream has no video track".to_string()))
}

/// Encodes the track's current frame as base64 JPEG on every call.
pub struct StillFrameSampler {
    quality: u8,
    track: Mutex<Option<Arc<VideoTrack>>>,
}

impl Default for StillFrameSampler {
    fn default() -> Self {
        Self::new(DEFAULT_STILL_QUALITY)
    }
}

impl StillFrameSampler {
    pub fn new(quality: u8) -> Self {
        Self {
            quality,
            track: Mutex::new(None),
        }
    }

    pub fn quality(&self) -> u8 {
        self.quality
    }
}

impl Sampler for StillFrameSampler {
    fn attach(&self, stream: &MediaStream) -> Result<(), CameraError> {
        let track = first_track(stream)?;
        *self.track.lock().unwrap_or_else(|e| e.into_inner()) = Some(track);
        Ok(())
    }

    fn detach(&self) {
        self.track.lock().unwrap_or_else(|e| e.into_inner()).take();
    }

    fn sample(&self) -> Result<Option<PoseSample>, CameraError> {
        let frame = match self
            .track
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
        {
            Some(track) => track.current_frame(),
            None => None,
        };
        let Some(frame) = frame else {
            return Ok(None);
        };
        let data = image::to_jpeg_base64(&frame, self.quality)?;
        if data.is_empty() {
            return Ok(None);
        }
        Ok(Some(PoseSample::Still(data)))
    }
}

/// A real-time body-pose estimator.
///
/// Returns the landmarks of the most prominent person, or an empty set when
/// nobody is in frame.
pub trait PoseEstimator: Send + 'static {
    fn estimate(&mut self, frame: &Image) -> Result<Vec<Landmark>, CameraError>;
}

/// Feeds every frame to a `PoseEstimator` and keeps only the newest result.
///
/// Detection runs on its own task at the video's frame rate, with each
/// `estimate` call on the blocking pool. Frames that arrive while the
/// estimator is busy are skipped. The live loop reads whatever is in the
/// `Latest` cell when it ticks.
pub struct LandmarkSampler<E: PoseEstimator> {
    estimator: Arc<Mutex<E>>,
    latest: Latest<Vec<Landmark>>,
    detection: Mutex<Option<JoinHandle<()>>>,
}

impl<E: PoseEstimator> LandmarkSampler<E> {
    pub fn new(estimator: E) -> Self {
        Self {
            estimator: Arc::new(Mutex::new(estimator)),
            latest: Latest::new(),
            detection: Mutex::new(None),
        }
    }

    /// The cell detection writes into.
    pub fn latest(&self) -> &Latest<Vec<Landmark>> {
        &self.latest
    }

    fn spawn_detection(&self, track: Arc<VideoTrack>) -> JoinHandle<()> {
        let estimator = Arc::clone(&self.estimator);
        let latest = self.latest.clone();
        let mut frames = track.subscribe();
        tokio::spawn(async move {
            log::debug!("pose detection started on {}", track.label());
            while frames.changed().await.is_ok() {
                let frame = frames.borrow_and_update().clone();
                let Some(frame) = frame else {
                    if !track.is_live() {
                        break;
                    }
                    continue;
                };
                // inference is CPU-bound, keep it off the async workers
                let estimator = Arc::clone(&estimator);
                let result = tokio::task::spawn_blocking(move || {
                    estimator
                        .lock()
                        .unwrap_or_else(|e| e.into_inner())
                        .estimate(&frame)
                })
                .await;
                match result {
                    Ok(Ok(points)) if !points.is_empty() => {
                        latest.set(points);
                    }
                    Ok(Ok(_)) => {}
                    Ok(Err(error)) => log::debug!("pose estimation failed: {}", error),
                    Err(error) => {
                        log::error!("pose estimator panicked: {}", error);
                        break;
                    }
                }
            }
            log::debug!("pose detection stopped on {}", track.label());
        })
    }
}

impl<E: PoseEstimator> Sampler for LandmarkSampler<E> {
    fn attach(&self, stream: &MediaStream) -> Result<(), CameraError> {
        let track = first_track(stream)?;
        let mut detection = self.detection.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(previous) = detection.take() {
            previous.abort();
        }
        self.latest.clear();
        *detection = Some(self.spawn_detection(track));
        Ok(())
    }

    fn detach(&self) {
        if let Some(task) = self
            .detection
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take()
        {
            task.abort();
        }
        self.latest.clear();
    }

    fn background_tasks(&self) -> usize {
        self.detection
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .map_or(0, |task| usize::from(!task.is_finished()))
    }

    fn sample(&self) -> Result<Option<PoseSample>, CameraError> {
        Ok(self.latest.get().map(PoseSample::Landmarks))
    }
}

impl<E: PoseEstimator> Drop for LandmarkSampler<E> {
    fn drop(&mut self) {
        self.detach();
    }
}
