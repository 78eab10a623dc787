use {
    base::Vec2,
    image::Image,
    std::sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    tokio::sync::watch,
};

pub type SharedFrame = Arc<Image>;

/// Negotiated properties of a video track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackSettings {
    pub size: Vec2<usize>,
    pub frame_rate: f32,
}

/// One live video track of a `MediaStream`.
///
/// Backends publish frames into the track; consumers read the newest frame
/// or wait for the next one. Stopping is permanent and idempotent.
pub struct VideoTrack {
    label: String,
    settings: TrackSettings,
    frames: watch::Sender<Option<SharedFrame>>,
    live: AtomicBool,
    cancel: Arc<AtomicBool>,
}

impl std::fmt::Debug for VideoTrack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoTrack")
            .field("label", &self.label)
            .field("settings", &self.settings)
            .field("live", &self.is_live())
            .finish()
    }
}

impl VideoTrack {
    pub fn new(label: impl Into<String>, settings: TrackSettings) -> Self {
        let (frames, _) = watch::channel(None);
        Self {
            label: label.into(),
            settings,
            frames,
            live: AtomicBool::new(true),
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn settings(&self) -> TrackSettings {
        self.settings
    }

    pub fn is_live(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    /// Flag a capture worker polls to know when to release the device.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    /// Publish a new frame. Returns false once the track has been stopped.
    pub fn publish(&self, frame: Image) -> bool {
        if !self.is_live() {
            return false;
        }
        self.frames.send_replace(Some(Arc::new(frame)));
        true
    }

    /// The newest published frame, if any.
    pub fn current_frame(&self) -> Option<SharedFrame> {
        self.frames.borrow().clone()
    }

    /// Receiver that wakes on every published frame and once more on stop.
    pub fn subscribe(&self) -> watch::Receiver<Option<SharedFrame>> {
        self.frames.subscribe()
    }

    /// Wait for the next published frame. Returns None once the track stops.
    pub async fn next_frame(&self) -> Option<SharedFrame> {
        let mut frames = self.frames.subscribe();
        frames.mark_unchanged();
        loop {
            if !self.is_live() {
                return None;
            }
            frames.changed().await.ok()?;
            if let Some(frame) = frames.borrow_and_update().clone() {
                return Some(frame);
            }
        }
    }

    /// Stop the track: cancel the capture worker and drop the last frame.
    pub fn stop(&self) {
        if self.live.swap(false, Ordering::AcqRel) {
            log::debug!("stopping track {}", self.label);
            self.cancel.store(true, Ordering::Release);
            self.frames.send_replace(None);
        }
    }
}
