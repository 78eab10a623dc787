//! Simulated ESP32/MPU6050 wearable streaming readings to the service.

use {
    base::Epoch,
    com::{DEFAULT_DEVICE_ID, RiskReport, SensorReading, Telemetry},
    rand::Rng,
    std::{
        sync::{Arc, Mutex},
        time::Duration,
    },
    tokio::{
        sync::watch,
        task::JoinHandle,
        time::{Instant, MissedTickBehavior},
    },
};

pub const INGEST_INTERVAL: Duration = Duration::from_millis(200);
pub const RISK_DELAY: Duration = Duration::from_millis(500);

/// A plausible random reading for `device_id`.
pub fn random_reading(device_id: &str) -> SensorReading {
    let mut rng = rand::thread_rng();
    SensorReading {
        device_id: device_id.to_string(),
        accel_x: rng.gen_range(-2.0..2.0),
        accel_y: rng.gen_range(-2.0..2.0),
        accel_z: rng.gen_range(8.0..11.0),
        gyro_x: rng.gen_range(-0.5..0.5),
        gyro_y: rng.gen_range(-0.5..0.5),
        gyro_z: rng.gen_range(-0.5..0.5),
        heart_rate: Some(rng.gen_range(65.0f64..95.0).round()),
        timestamp: None,
    }
}

struct Inner<T: Telemetry> {
    telemetry: Arc<T>,
    device_id: String,
    epoch: Epoch,
    risk: watch::Sender<Option<RiskReport>>,
}

impl<T: Telemetry> Inner<T> {
    async fn refresh_risk(&self) -> Option<RiskReport> {
        let dispatched = self.epoch.current();
        let risk = match self.telemetry.fetch_risk(&self.device_id).await {
            Ok(risk) => Some(risk),
            Err(err) => {
                log::debug!("risk fetch failed for {}: {}", self.device_id, err);
                None
            }
        };
        self.risk.send_if_modified(|current| {
            if !self.epoch.is_current(dispatched) {
                return false;
            }
            *current = risk.clone();
            true
        });
        risk
    }
}

/// Posts a random reading every 200 ms and keeps the device's risk report.
pub struct WearableSimulator<T: Telemetry> {
    inner: Arc<Inner<T>>,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl<T: Telemetry> WearableSimulator<T> {
    pub fn new(telemetry: Arc<T>) -> Self {
        Self::for_device(telemetry, DEFAULT_DEVICE_ID)
    }

    pub fn for_device(telemetry: Arc<T>, device_id: impl Into<String>) -> Self {
        let (risk, _) = watch::channel(None);
        Self {
            inner: Arc::new(Inner {
                telemetry,
                device_id: device_id.into(),
                epoch: Epoch::new(),
                risk,
            }),
            tasks: Mutex::new(Vec::new()),
        }
    }

    pub fn device_id(&self) -> &str {
        &self.inner.device_id
    }

    pub fn is_running(&self) -> bool {
        !self
            .tasks
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .is_empty()
    }

    pub fn risk(&self) -> Option<RiskReport> {
        self.inner.risk.borrow().clone()
    }

    pub fn subscribe_risk(&self) -> watch::Receiver<Option<RiskReport>> {
        self.inner.risk.subscribe()
    }

    /// Start streaming. Does nothing when already running.
    pub fn start(&self) {
        let mut tasks = self.tasks.lock().unwrap_or_else(|e| e.into_inner());
        if !tasks.is_empty() {
            return;
        }
        log::info!("simulating wearable {}", self.inner.device_id);

        let inner = Arc::clone(&self.inner);
        tasks.push(tokio::spawn(async move {
            let mut ticker =
                tokio::time::interval_at(Instant::now() + INGEST_INTERVAL, INGEST_INTERVAL);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let reading = random_reading(&inner.device_id);
                let telemetry = Arc::clone(&inner.telemetry);
                // fire-and-forget, failures are only logged
                tokio::spawn(async move {
                    if let Err(err) = telemetry.send_reading(reading).await {
                        log::debug!("ingest failed: {}", err);
                    }
                });
            }
        }));

        let inner = Arc::clone(&self.inner);
        tasks.push(tokio::spawn(async move {
            tokio::time::sleep(RISK_DELAY).await;
            inner.refresh_risk().await;
        }));
    }

    /// Fetch the device's risk now. `None` when the fetch fails.
    pub async fn refresh_risk(&self) -> Option<RiskReport> {
        self.inner.refresh_risk().await
    }

    /// Stop streaming and forget the risk report.
    pub fn stop(&self) {
        self.inner.epoch.advance();
        for task in self
            .tasks
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .drain(..)
        {
            task.abort();
        }
        self.inner.risk.send_if_modified(|risk| risk.take().is_some());
    }
}

impl<T: Telemetry> Drop for WearableSimulator<T> {
    fn drop(&mut self) {
        self.stop();
    }
}
