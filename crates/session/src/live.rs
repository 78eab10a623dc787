use {
    crate::*,
    base::{Epoch, PoseSample},
    com::{AnalysisResult, Scorer},
    std::{
        sync::{
            Arc, Mutex,
            atomic::{AtomicBool, Ordering},
        },
        time::Duration,
    },
    tokio::{
        sync::watch,
        task::JoinHandle,
        time::{Instant, MissedTickBehavior},
    },
    video::{LandmarkSampler, MediaDevices, MediaStream, PoseEstimator, Sampler, StillFrameSampler},
};

// state and collaborators shared with the timer and analyze tasks
struct Shared<Sa: Sampler, Sc: Scorer> {
    sampler: Arc<Sa>,
    scorer: Arc<Sc>,
    epoch: Epoch,
    state: watch::Sender<SessionState>,
}

impl<Sa: Sampler, Sc: Scorer> Shared<Sa, Sc> {
    fn mode(&self) -> SessionMode {
        self.state.borrow().mode
    }

    fn set_mode(&self, mode: SessionMode) {
        self.state.send_if_modified(|state| {
            let changed = state.mode != mode;
            state.mode = mode;
            changed
        });
    }

    /// Score one sample and publish the result unless the session stopped meanwhile.
    async fn analyze(&self, sample: PoseSample) -> AnalysisResult {
        let dispatched = self.epoch.current();
        self.state.send_if_modified(|state| {
            if !self.epoch.is_current(dispatched) {
                return false;
            }
            state.sample = Some(sample.clone());
            true
        });

        let result = match self.scorer.analyze(sample).await {
            Ok(result) => result,
            Err(err) => {
                log::warn!("analyze failed: {}", err);
                AnalysisResult::failed()
            }
        };

        let applied = self.state.send_if_modified(|state| {
            if !self.epoch.is_current(dispatched) {
                return false;
            }
            state.result = Some(result.clone());
            true
        });
        if !applied {
            log::debug!("dropping analysis from a stopped session");
        }
        result
    }

    fn take_sample(&self) -> Option<PoseSample> {
        match self.sampler.sample() {
            Ok(sample) => sample.filter(|sample| !sample.is_empty()),
            Err(err) => {
                log::warn!("sampling failed: {}", err);
                None
            }
        }
    }

    // one live tick: sample now, score on a task of its own
    fn tick(self: &Arc<Self>) {
        let Some(sample) = self.take_sample() else {
            return;
        };
        let shared = Arc::clone(self);
        tokio::spawn(async move {
            shared.analyze(sample).await;
        });
    }
}

fn spawn_live_timer<Sa: Sampler, Sc: Scorer>(
    shared: Arc<Shared<Sa, Sc>>,
    period: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            shared.tick();
        }
    })
}

/// Camera -> sampler -> scorer control loop.
///
/// At most one camera stream and one live timer exist at a time. `stop` is
/// synchronous and idempotent, and also runs when the session is dropped.
/// Analyze calls still in flight at stop resolve without touching the state.
pub struct LiveSession<D: MediaDevices, Sa: Sampler, Sc: Scorer> {
    config: SessionConfig,
    devices: D,
    shared: Arc<Shared<Sa, Sc>>,
    starting: AtomicBool,
    stream: Mutex<Option<MediaStream>>,
    // held across every mode transition, so stop cannot interleave with
    // toggle_live or the end of start_camera
    live_timer: Mutex<Option<JoinHandle<()>>>,
}

impl<D: MediaDevices, Sc: Scorer> LiveSession<D, StillFrameSampler, Sc> {
    /// Coach preset: still JPEG frames every 1.5 s.
    pub fn coach(devices: D, scorer: Sc) -> Self {
        let config = SessionConfig::coach();
        let sampler = StillFrameSampler::new(config.still_quality());
        Self::new(config, devices, sampler, scorer)
    }
}

impl<D: MediaDevices, E: PoseEstimator, Sc: Scorer> LiveSession<D, LandmarkSampler<E>, Sc> {
    /// Posture-scan preset: pose landmarks every 500 ms.
    pub fn posture_scan(devices: D, estimator: E, scorer: Sc) -> Self {
        Self::new(
            SessionConfig::posture_scan(),
            devices,
            LandmarkSampler::new(estimator),
            scorer,
        )
    }
}

impl<D: MediaDevices, Sa: Sampler, Sc: Scorer> LiveSession<D, Sa, Sc> {
    pub fn new(config: SessionConfig, devices: D, sampler: Sa, scorer: Sc) -> Self {
        let (state, _) = watch::channel(SessionState::default());
        Self {
            config,
            devices,
            shared: Arc::new(Shared {
                sampler: Arc::new(sampler),
                scorer: Arc::new(scorer),
                epoch: Epoch::new(),
                state,
            }),
            starting: AtomicBool::new(false),
            stream: Mutex::new(None),
            live_timer: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn sampler(&self) -> &Sa {
        &self.shared.sampler
    }

    pub fn mode(&self) -> SessionMode {
        self.shared.mode()
    }

    pub fn state(&self) -> SessionState {
        self.shared.state.borrow().clone()
    }

    /// Receiver that wakes on every state change.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.shared.state.subscribe()
    }

    /// Number of live timers and sampler tasks still running.
    pub fn pending_timers(&self) -> usize {
        let live = self
            .live_timer
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .map_or(0, |timer| usize::from(!timer.is_finished()));
        live + self.shared.sampler.background_tasks()
    }

    pub fn live_track_count(&self) -> usize {
        self.stream
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .map_or(0, |stream| stream.live_track_count())
    }

    /// Acquire the camera and attach the sampler.
    ///
    /// On failure the session stays `Idle` with the error recorded; there is
    /// no retry.
    pub async fn start_camera(&self) -> Result<(), SessionError> {
        if self.mode().camera_on() || self.starting.swap(true, Ordering::AcqRel) {
            return Err(SessionError::AlreadyActive);
        }
        let result = self.acquire().await;
        self.starting.store(false, Ordering::Release);
        result
    }

    async fn acquire(&self) -> Result<(), SessionError> {
        let shared = &self.shared;
        let pending = shared.epoch.stamp(());
        let stream = match self.devices.get_user_media(self.config.camera()).await {
            Ok(stream) => stream,
            Err(err) => {
                log::warn!("camera start failed: {}", err);
                let message = err.to_string();
                shared.state.send_modify(|state| {
                    state.mode = SessionMode::Idle;
                    state.error = Some(message);
                });
                return Err(err.into());
            }
        };

        let _transition = self.live_timer.lock().unwrap_or_else(|e| e.into_inner());
        if pending.into_current(&shared.epoch).is_none() {
            log::debug!("session stopped while the camera was starting");
            stream.stop();
            return Err(SessionError::InvalidState(SessionMode::Idle));
        }

        if let Err(err) = shared.sampler.attach(&stream) {
            log::warn!("sampler attach failed: {}", err);
            stream.stop();
            let message = err.to_string();
            shared.state.send_modify(|state| state.error = Some(message));
            return Err(err.into());
        }

        *self.stream.lock().unwrap_or_else(|e| e.into_inner()) = Some(stream);
        shared.state.send_modify(|state| {
            state.mode = SessionMode::CameraOn;
            state.error = None;
        });
        log::info!("camera started");
        Ok(())
    }

    /// Start or stop periodic scoring. Turning on needs the camera.
    pub fn toggle_live(&self, on: bool) -> Result<(), SessionError> {
        let mut timer = self.live_timer.lock().unwrap_or_else(|e| e.into_inner());
        match (self.mode(), on) {
            (SessionMode::CameraOn, true) => {
                if let Some(previous) = timer.take() {
                    previous.abort();
                }
                *timer = Some(spawn_live_timer(
                    Arc::clone(&self.shared),
                    self.config.live_interval(),
                ));
                self.shared.set_mode(SessionMode::LiveAnalyzing);
                log::info!("live analysis every {:?}", self.config.live_interval());
                Ok(())
            }
            (SessionMode::LiveAnalyzing, false) => {
                if let Some(previous) = timer.take() {
                    previous.abort();
                }
                self.shared.set_mode(SessionMode::CameraOn);
                log::info!("live analysis paused");
                Ok(())
            }
            (SessionMode::Idle, true) => Err(SessionError::InvalidState(SessionMode::Idle)),
            _ => Ok(()),
        }
    }

    /// One immediate sample and analyze, without changing mode.
    ///
    /// Only allowed with the camera on and live analysis off. Returns `None`
    /// when no sample is available yet.
    pub async fn analyze_once(&self) -> Result<Option<AnalysisResult>, SessionError> {
        let mode = self.mode();
        if mode != SessionMode::CameraOn {
            return Err(SessionError::InvalidState(mode));
        }
        match self.shared.take_sample() {
            Some(sample) => Ok(Some(self.shared.analyze(sample).await)),
            None => Ok(None),
        }
    }

    /// Cancel the live timer, release the camera and clear results.
    pub fn stop(&self) {
        let mut timer = self.live_timer.lock().unwrap_or_else(|e| e.into_inner());
        self.shared.epoch.advance();
        if let Some(timer) = timer.take() {
            timer.abort();
        }
        self.shared.sampler.detach();
        if let Some(stream) = self.stream.lock().unwrap_or_else(|e| e.into_inner()).take() {
            stream.stop();
            log::info!("camera stopped");
        }
        self.shared.state.send_if_modified(|state| {
            let changed =
                state.mode != SessionMode::Idle || state.result.is_some() || state.sample.is_some();
            state.mode = SessionMode::Idle;
            state.result = None;
            state.sample = None;
            changed
        });
    }
}

impl<D: MediaDevices, Sa: Sampler, Sc: Scorer> Drop for LiveSession<D, Sa, Sc> {
    fn drop(&mut self) {
        self.stop();
    }
}
