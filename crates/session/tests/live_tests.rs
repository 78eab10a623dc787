use {
    base::{Landmark, PoseSample, Vec2},
    com::{AnalysisResult, ScoreError, Scorer},
    image::{Image, PixelFormat},
    session::{LiveSession, SessionConfig, SessionError, SessionMode},
    std::{
        collections::VecDeque,
        sync::{
            Arc, Mutex,
            atomic::{AtomicBool, AtomicUsize, Ordering},
        },
        time::Duration,
    },
    tokio::time::sleep,
    video::{
        CameraConfig, CameraError, MediaDevices, MediaStream, PoseEstimator, StillFrameSampler,
        TrackSettings, VideoTrack,
    },
};

fn frame() -> Image {
    Image::new(Vec2::new(8, 8), vec![128; 8 * 8 * 3], PixelFormat::Rgb8)
}

#[derive(Clone, Default)]
struct FakeCamera {
    deny: bool,
    blank: bool,
    tracks: Arc<Mutex<Vec<Arc<VideoTrack>>>>,
}

impl FakeCamera {
    fn denied() -> Self {
        Self {
            deny: true,
            ..Self::default()
        }
    }

    fn blank() -> Self {
        Self {
            blank: true,
            ..Self::default()
        }
    }

    fn track(&self) -> Arc<VideoTrack> {
        Arc::clone(self.tracks.lock().unwrap().last().unwrap())
    }

    fn live_tracks(&self) -> usize {
        self.tracks
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.is_live())
            .count()
    }
}

impl MediaDevices for FakeCamera {
    async fn get_user_media(&self, config: &CameraConfig) -> Result<MediaStream, CameraError> {
        if self.deny {
            return Err(CameraError::AccessDenied("NotAllowedError".to_string()));
        }
        let track = Arc::new(VideoTrack::new(
            config.device(),
            TrackSettings {
                size: Vec2::new(8, 8),
                frame_rate: 30.0,
            },
        ));
        if !self.blank {
            track.publish(frame());
        }
        self.tracks.lock().unwrap().push(Arc::clone(&track));
        Ok(MediaStream::new(vec![track]))
    }
}

#[derive(Clone, Default)]
struct ScriptedScorer {
    calls: Arc<AtomicUsize>,
    fail: Arc<AtomicBool>,
    delays: Arc<Mutex<VecDeque<Duration>>>,
    samples: Arc<Mutex<Vec<PoseSample>>>,
}

impl ScriptedScorer {
    fn with_delays(delays: &[u64]) -> Self {
        let scorer = Self::default();
        scorer
            .delays
            .lock()
            .unwrap()
            .extend(delays.iter().map(|ms| Duration::from_millis(*ms)));
        scorer
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Scorer for ScriptedScorer {
    async fn analyze(&self, sample: PoseSample) -> Result<AnalysisResult, ScoreError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.samples.lock().unwrap().push(sample);
        let delay = self.delays.lock().unwrap().pop_front();
        if let Some(delay) = delay {
            sleep(delay).await;
        }
        if self.fail.load(Ordering::SeqCst) {
            return Err(ScoreError::Network("service unavailable".to_string()));
        }
        Ok(AnalysisResult {
            detected: true,
            exercise: Some("standing".to_string()),
            posture_score: Some(0.8),
            feedback: vec![format!("call {}", call)],
            ..AnalysisResult::default()
        })
    }
}

struct StandingPose;

impl PoseEstimator for StandingPose {
    fn estimate(&mut self, _frame: &Image) -> Result<Vec<Landmark>, CameraError> {
        Ok((0..33)
            .map(|i| Landmark::new(0.5, i as f32 / 33.0, 0.0))
            .collect())
    }
}

type StillSession = LiveSession<FakeCamera, StillFrameSampler, ScriptedScorer>;

fn still_session(camera: &FakeCamera, scorer: &ScriptedScorer) -> StillSession {
    LiveSession::new(
        SessionConfig::posture_scan(),
        camera.clone(),
        StillFrameSampler::default(),
        scorer.clone(),
    )
}

#[tokio::test]
async fn test_failed_start_stays_idle() {
    let scorer = ScriptedScorer::default();
    let session = still_session(&FakeCamera::denied(), &scorer);

    let result = session.start_camera().await;
    assert!(matches!(
        result,
        Err(SessionError::Camera(CameraError::AccessDenied(_)))
    ));
    assert_eq!(session.mode(), SessionMode::Idle);
    assert_eq!(session.pending_timers(), 0);
    assert_eq!(session.live_track_count(), 0);
    assert!(session.state().error.unwrap().contains("NotAllowedError"));
    assert!(matches!(
        session.toggle_live(true),
        Err(SessionError::InvalidState(SessionMode::Idle))
    ));
    assert_eq!(session.pending_timers(), 0);
}

#[tokio::test]
async fn test_start_twice_is_rejected() {
    let camera = FakeCamera::default();
    let session = still_session(&camera, &ScriptedScorer::default());

    session.start_camera().await.unwrap();
    assert_eq!(session.mode(), SessionMode::CameraOn);
    assert!(session.state().error.is_none());
    assert!(matches!(
        session.start_camera().await,
        Err(SessionError::AlreadyActive)
    ));
    assert_eq!(camera.tracks.lock().unwrap().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_stop_from_live_equals_stop_from_camera_on() {
    let camera_a = FakeCamera::default();
    let camera_b = FakeCamera::default();
    let scorer = ScriptedScorer::default();
    let live = still_session(&camera_a, &scorer);
    let idle_camera = still_session(&camera_b, &scorer);

    live.start_camera().await.unwrap();
    live.toggle_live(true).unwrap();
    sleep(Duration::from_millis(1200)).await;
    assert!(live.state().result.is_some());

    idle_camera.start_camera().await.unwrap();
    idle_camera.analyze_once().await.unwrap();
    assert!(idle_camera.state().result.is_some());

    live.stop();
    idle_camera.stop();

    assert_eq!(live.state(), idle_camera.state());
    assert_eq!(live.mode(), SessionMode::Idle);
    assert!(live.state().result.is_none());
    assert!(live.state().sample.is_none());
    assert_eq!(live.pending_timers(), 0);
    assert_eq!(idle_camera.pending_timers(), 0);
    assert_eq!(camera_a.live_tracks(), 0);
    assert_eq!(camera_b.live_tracks(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_stop_twice_equals_stop_once() {
    let camera = FakeCamera::default();
    let scorer = ScriptedScorer::default();
    let session = still_session(&camera, &scorer);
    session.start_camera().await.unwrap();
    session.toggle_live(true).unwrap();
    sleep(Duration::from_millis(600)).await;

    session.stop();
    let once = session.state();
    let calls = scorer.calls();
    session.stop();

    assert_eq!(session.state(), once);
    assert_eq!(session.pending_timers(), 0);
    assert_eq!(camera.live_tracks(), 0);
    sleep(Duration::from_secs(2)).await;
    assert_eq!(scorer.calls(), calls);

    // stopping an idle session is harmless too
    still_session(&FakeCamera::default(), &scorer).stop();
}

#[tokio::test(start_paused = true)]
async fn test_live_cadence() {
    let scorer = ScriptedScorer::default();
    let session = still_session(&FakeCamera::default(), &scorer);
    session.start_camera().await.unwrap();

    session.toggle_live(true).unwrap();
    assert_eq!(session.mode(), SessionMode::LiveAnalyzing);
    sleep(Duration::from_millis(2300)).await;

    assert_eq!(scorer.calls(), 4);
    for sample in scorer.samples.lock().unwrap().iter() {
        assert!(matches!(sample, PoseSample::Still(data) if !data.is_empty()));
    }
}

#[tokio::test(start_paused = true)]
async fn test_tick_without_sample_is_noop() {
    let scorer = ScriptedScorer::default();
    let session = still_session(&FakeCamera::blank(), &scorer);
    session.start_camera().await.unwrap();
    session.toggle_live(true).unwrap();

    sleep(Duration::from_millis(1600)).await;
    assert_eq!(scorer.calls(), 0);
    assert_eq!(session.mode(), SessionMode::LiveAnalyzing);
    assert!(session.state().result.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_failure_then_success_replaces_result() {
    let scorer = ScriptedScorer::default();
    scorer.fail.store(true, Ordering::SeqCst);
    let session = still_session(&FakeCamera::default(), &scorer);
    session.start_camera().await.unwrap();
    session.toggle_live(true).unwrap();

    sleep(Duration::from_millis(600)).await;
    let failed = session.state().result.unwrap();
    assert_eq!(failed, AnalysisResult::failed());
    assert_eq!(failed.feedback, vec!["Analysis failed".to_string()]);
    assert_eq!(session.mode(), SessionMode::LiveAnalyzing);

    scorer.fail.store(false, Ordering::SeqCst);
    sleep(Duration::from_millis(500)).await;
    let result = session.state().result.unwrap();
    assert!(result.detected);
    assert_eq!(result.feedback, vec!["call 2".to_string()]);
    assert_eq!(result.exercise.as_deref(), Some("standing"));
}

#[tokio::test(start_paused = true)]
async fn test_last_completion_wins() {
    // first call resolves at 1300 ms, second at 1100 ms
    let scorer = ScriptedScorer::with_delays(&[800, 100]);
    let session = still_session(&FakeCamera::default(), &scorer);
    session.start_camera().await.unwrap();
    session.toggle_live(true).unwrap();

    sleep(Duration::from_millis(1050)).await;
    session.toggle_live(false).unwrap();
    assert_eq!(scorer.calls(), 2);

    sleep(Duration::from_millis(100)).await;
    assert_eq!(session.state().result.unwrap().feedback, vec!["call 2"]);
    sleep(Duration::from_millis(200)).await;
    assert_eq!(session.state().result.unwrap().feedback, vec!["call 1"]);
}

#[tokio::test(start_paused = true)]
async fn test_in_flight_result_discarded_after_stop() {
    let scorer = ScriptedScorer::with_delays(&[1000]);
    let camera = FakeCamera::default();
    let session = still_session(&camera, &scorer);
    session.start_camera().await.unwrap();
    session.toggle_live(true).unwrap();

    sleep(Duration::from_millis(600)).await;
    assert_eq!(scorer.calls(), 1);
    session.stop();

    sleep(Duration::from_secs(2)).await;
    let state = session.state();
    assert_eq!(state.mode, SessionMode::Idle);
    assert!(state.result.is_none());
    assert!(state.sample.is_none());
    assert_eq!(scorer.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_toggle_off_keeps_camera() {
    let camera = FakeCamera::default();
    let scorer = ScriptedScorer::default();
    let session = still_session(&camera, &scorer);
    session.start_camera().await.unwrap();
    session.toggle_live(true).unwrap();
    session.toggle_live(true).unwrap();
    assert_eq!(session.pending_timers(), 1);

    sleep(Duration::from_millis(700)).await;
    session.toggle_live(false).unwrap();
    assert_eq!(session.mode(), SessionMode::CameraOn);
    assert_eq!(session.pending_timers(), 0);
    assert_eq!(camera.live_tracks(), 1);

    let calls = scorer.calls();
    sleep(Duration::from_secs(2)).await;
    assert_eq!(scorer.calls(), calls);
}

#[tokio::test]
async fn test_analyze_once_only_with_camera_on() {
    let scorer = ScriptedScorer::default();
    let session = still_session(&FakeCamera::default(), &scorer);
    assert!(matches!(
        session.analyze_once().await,
        Err(SessionError::InvalidState(SessionMode::Idle))
    ));

    session.start_camera().await.unwrap();
    let result = session.analyze_once().await.unwrap().unwrap();
    assert_eq!(result.feedback, vec!["call 1"]);
    assert_eq!(session.mode(), SessionMode::CameraOn);
    assert_eq!(session.state().result, Some(result));
    assert!(matches!(session.state().sample, Some(PoseSample::Still(_))));

    session.toggle_live(true).unwrap();
    assert!(matches!(
        session.analyze_once().await,
        Err(SessionError::InvalidState(SessionMode::LiveAnalyzing))
    ));
}

#[tokio::test]
async fn test_drop_releases_camera() {
    let camera = FakeCamera::default();
    {
        let session = still_session(&camera, &ScriptedScorer::default());
        session.start_camera().await.unwrap();
        session.toggle_live(true).unwrap();
        assert_eq!(camera.live_tracks(), 1);
    }
    assert_eq!(camera.live_tracks(), 0);
}

#[tokio::test]
async fn test_state_changes_are_observable() {
    let session = still_session(&FakeCamera::default(), &ScriptedScorer::default());
    let mut states = session.subscribe();

    session.start_camera().await.unwrap();
    states.changed().await.unwrap();
    assert_eq!(states.borrow_and_update().mode, SessionMode::CameraOn);

    session.stop();
    states.changed().await.unwrap();
    assert_eq!(states.borrow_and_update().mode, SessionMode::Idle);
}

#[tokio::test]
async fn test_posture_scan_sends_landmarks() {
    let camera = FakeCamera::default();
    let scorer = ScriptedScorer::default();
    let session = LiveSession::posture_scan(camera.clone(), StandingPose, scorer.clone());
    assert_eq!(
        session.config().live_interval(),
        Duration::from_millis(500)
    );

    session.start_camera().await.unwrap();
    assert_eq!(session.pending_timers(), 1);
    assert!(session.analyze_once().await.unwrap().is_none());

    camera.track().publish(frame());
    for _ in 0..200 {
        if !session.sampler().latest().is_empty() {
            break;
        }
        sleep(Duration::from_millis(5)).await;
    }

    session.analyze_once().await.unwrap().unwrap();
    match &scorer.samples.lock().unwrap()[0] {
        PoseSample::Landmarks(points) => assert_eq!(points.len(), 33),
        other => panic!("expected landmarks, got {:?}", other),
    }

    session.stop();
    assert_eq!(session.pending_timers(), 0);
    assert!(session.sampler().latest().is_empty());
}

#[test]
fn test_presets() {
    let coach = SessionConfig::coach();
    assert_eq!(coach.live_interval(), Duration::from_millis(1500));
    assert_eq!(coach.still_quality(), 70);
    assert_eq!(SessionConfig::coach().with_still_quality(95).still_quality(), 80);
    assert_eq!(
        SessionConfig::default().live_interval(),
        Duration::from_millis(500)
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_stop_racing_toggle_leaves_no_timer() {
    let camera = FakeCamera::default();
    let session = Arc::new(still_session(&camera, &ScriptedScorer::default()));

    for _ in 0..200 {
        session.start_camera().await.unwrap();
        let stopper = tokio::spawn({
            let session = Arc::clone(&session);
            async move { session.stop() }
        });
        let toggler = tokio::spawn({
            let session = Arc::clone(&session);
            async move {
                let _ = session.toggle_live(true);
            }
        });
        stopper.await.unwrap();
        toggler.await.unwrap();

        assert_eq!(session.mode(), SessionMode::Idle);
        assert_eq!(session.pending_timers(), 0);
        assert_eq!(camera.live_tracks(), 0);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_stop_racing_start_never_leaks_camera() {
    let camera = FakeCamera::default();
    let session = Arc::new(still_session(&camera, &ScriptedScorer::default()));

    for _ in 0..200 {
        let starter = tokio::spawn({
            let session = Arc::clone(&session);
            async move {
                let _ = session.start_camera().await;
            }
        });
        let stopper = tokio::spawn({
            let session = Arc::clone(&session);
            async move { session.stop() }
        });
        starter.await.unwrap();
        stopper.await.unwrap();

        // stop may land before the start; otherwise nothing survives it
        if session.mode() == SessionMode::Idle {
            assert_eq!(camera.live_tracks(), 0);
            assert_eq!(session.live_track_count(), 0);
        } else {
            assert_eq!(session.mode(), SessionMode::CameraOn);
            assert_eq!(camera.live_tracks(), 1);
        }
        session.stop();
        assert_eq!(camera.live_tracks(), 0);
    }
}
