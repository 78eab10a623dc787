use {
    crate::*,
    std::{future::Future, sync::Arc},
};

/// Host camera access.
///
/// Implementations request a video-only stream matching the constraints and
/// fail with `CameraError::AccessDenied` when permission is refused or no
/// camera is present.
pub trait MediaDevices: Send + Sync {
    fn get_user_media(
        &self,
        config: &CameraConfig,
    ) -> impl Future<Output = Result<MediaStream, CameraError>> + Send;
}

/// An open camera capture. Exclusively owned; all tracks stop on drop.
#[derive(Debug)]
pub struct MediaStream {
    tracks: Vec<Arc<VideoTrack>>,
}

impl MediaStream {
    pub fn new(tracks: Vec<Arc<VideoTrack>>) -> Self {
        Self { tracks }
    }

    pub fn tracks(&self) -> &[Arc<VideoTrack>] {
        &self.tracks
    }

    /// First video track of the stream.
    pub fn video_track(&self) -> Option<&Arc<VideoTrack>> {
        self.tracks.first()
    }

    pub fn live_track_count(&self) -> usize {
        self.tracks.iter().filter(|t| t.is_live()).count()
    }

    /// Stop every track. Safe to call any number of times.
    pub fn stop(&self) {
        for track in &self.tracks {
            track.stop();
        }
    }
}

impl Drop for MediaStream {
    fn drop(&mut self) {
        self.stop();
    }
}
