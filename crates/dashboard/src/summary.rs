use {
    crate::*,
    com::{ApiClient, DEFAULT_DEVICE_ID, Device, Exercise},
};

/// Everything the dashboard shows, loaded in one go.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub online: bool,
    pub devices: Vec<Device>,
    /// Device the risk panel describes.
    pub risk_device: String,
    pub risk: Option<RiskPanel>,
}

impl DashboardSummary {
    /// Query health, devices and risk. Failures degrade instead of erroring:
    /// offline, no devices, no risk panel.
    pub async fn load(api: &ApiClient) -> Self {
        let (health, devices) = tokio::join!(api.health(), api.list_devices());

        let online = match health {
            Ok(health) => health.is_healthy(),
            Err(err) => {
                log::debug!("health check failed: {}", err);
                false
            }
        };
        let devices = devices.unwrap_or_else(|err| {
            log::debug!("device list failed: {}", err);
            Vec::new()
        });

        let risk_device = devices
            .first()
            .map_or_else(|| DEFAULT_DEVICE_ID.to_string(), |d| d.id.clone());
        let risk = match api.risk(&risk_device).await {
            Ok(report) => Some(RiskPanel::from(&report)),
            Err(err) => {
                log::debug!("risk fetch failed for {}: {}", risk_device, err);
                None
            }
        };

        Self {
            online,
            devices,
            risk_device,
            risk,
        }
    }

    pub fn connected_count(&self) -> usize {
        self.devices.iter().filter(|d| d.connected).count()
    }

    /// `(connected, total)` with the total shown as at least one.
    pub fn device_ratio(&self) -> (usize, usize) {
        (self.connected_count(), self.devices.len().max(1))
    }
}

/// Exercise catalog for the coach picker. Empty when the service fails.
pub async fn load_exercises(api: &ApiClient) -> Vec<Exercise> {
    api.list_exercises().await.unwrap_or_else(|err| {
        log::debug!("exercise list failed: {}", err);
        Vec::new()
    })
}
