use {
    base::Vec2,
    image::{Image, PixelFormat},
    std::sync::{Arc, atomic::Ordering},
    video::{CameraConfig, CameraError, MediaDevices, MediaStream, TrackSettings, VideoTrack},
};

fn settings() -> TrackSettings {
    TrackSettings {
        size: Vec2::new(2, 2),
        frame_rate: 30.0,
    }
}

fn frame(value: u8) -> Image {
    Image::new(Vec2::new(2, 2), vec![value; 12], PixelFormat::Rgb8)
}

struct FakeDevices {
    deny: bool,
}

impl MediaDevices for FakeDevices {
    async fn get_user_media(&self, config: &CameraConfig) -> Result<MediaStream, CameraError> {
        if self.deny {
            return Err(CameraError::AccessDenied("permission denied".to_string()));
        }
        let track = Arc::new(VideoTrack::new(config.device(), settings()));
        Ok(MediaStream::new(vec![track]))
    }
}

#[tokio::test]
async fn test_get_user_media_returns_live_track() {
    let devices = FakeDevices { deny: false };
    let stream = devices
        .get_user_media(&CameraConfig::default())
        .await
        .unwrap();
    assert_eq!(stream.tracks().len(), 1);
    assert_eq!(stream.live_track_count(), 1);
    assert_eq!(stream.video_track().unwrap().label(), "/dev/video0");
}

#[tokio::test]
async fn test_get_user_media_denied() {
    let devices = FakeDevices { deny: true };
    match devices.get_user_media(&CameraConfig::default()).await {
        Err(CameraError::AccessDenied(msg)) => assert_eq!(msg, "permission denied"),
        other => panic!("expected AccessDenied, got {:?}", other),
    }
}

#[test]
fn test_access_denied_display() {
    let err = CameraError::AccessDenied("no camera".to_string());
    assert_eq!(err.to_string(), "camera access denied or unavailable: no camera");
}

#[test]
fn test_publish_and_current_frame() {
    let track = VideoTrack::new("test", settings());
    assert!(track.current_frame().is_none());
    assert!(track.publish(frame(1)));
    assert!(track.publish(frame(2)));
    assert_eq!(track.current_frame().unwrap().data[0], 2);
}

#[test]
fn test_stop_is_idempotent() {
    let track = Arc::new(VideoTrack::new("test", settings()));
    let cancel = track.cancel_flag();
    track.publish(frame(1));
    let stream = MediaStream::new(vec![Arc::clone(&track)]);

    stream.stop();
    stream.stop();

    assert_eq!(stream.live_track_count(), 0);
    assert!(cancel.load(Ordering::Acquire));
    assert!(track.current_frame().is_none());
    assert!(!track.publish(frame(3)));
    assert!(track.current_frame().is_none());
}

#[test]
fn test_drop_stops_tracks() {
    let track = Arc::new(VideoTrack::new("test", settings()));
    {
        let _stream = MediaStream::new(vec![Arc::clone(&track)]);
        assert!(track.is_live());
    }
    assert!(!track.is_live());
}

#[tokio::test]
async fn test_subscribe_wakes_on_stop() {
    let track = VideoTrack::new("test", settings());
    let mut frames = track.subscribe();
    track.stop();
    frames.changed().await.unwrap();
    assert!(frames.borrow().is_none());
}

#[tokio::test]
async fn test_next_frame_waits_for_publish() {
    let track = Arc::new(VideoTrack::new("cam", settings()));
    track.publish(frame(1));

    let waiter = tokio::spawn({
        let track = Arc::clone(&track);
        async move { track.next_frame().await }
    });
    tokio::task::yield_now().await;
    assert!(!waiter.is_finished());

    track.publish(frame(2));
    let next = waiter.await.unwrap().unwrap();
    assert_eq!(next.data[0], 2);
}

#[tokio::test]
async fn test_next_frame_ends_with_track() {
    let track = Arc::new(VideoTrack::new("cam", settings()));
    let waiter = tokio::spawn({
        let track = Arc::clone(&track);
        async move { track.next_frame().await }
    });
    tokio::task::yield_now().await;
    track.stop();
    assert!(waiter.await.unwrap().is_none());
    assert!(track.next_frame().await.is_none());
}
