use {
    com::{ApiClient, Device, RequestError},
    std::time::{SystemTime, UNIX_EPOCH},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceKind {
    #[default]
    Esp32,
    Mpu6050,
    HeartRate,
}

impl DeviceKind {
    pub const ALL: [DeviceKind; 3] = [DeviceKind::Esp32, DeviceKind::Mpu6050, DeviceKind::HeartRate];

    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceKind::Esp32 => "esp32",
            DeviceKind::Mpu6050 => "mpu6050",
            DeviceKind::HeartRate => "heart_rate",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DeviceKind::Esp32 => "ESP32",
            DeviceKind::Mpu6050 => "MPU6050 Sensor",
            DeviceKind::HeartRate => "Heart Rate Monitor",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }
}

/// The add-device form as typed by the user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviceForm {
    pub id: String,
    pub name: String,
    pub kind: DeviceKind,
}

fn slug(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

impl DeviceForm {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: DeviceKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
        }
    }

    /// Device to register, with an id stamped from the current time if needed.
    pub fn normalize(&self) -> Device {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        self.normalize_at(millis)
    }

    /// Id from the form, else a slug of the name, else `device-<millis>`.
    pub fn normalize_at(&self, millis: u128) -> Device {
        let mut id = self.id.trim().to_string();
        if id.is_empty() {
            id = slug(&self.name);
        }
        if id.is_empty() {
            id = format!("device-{}", millis);
        }
        let name = match self.name.trim() {
            "" => id.clone(),
            name => name.to_string(),
        };
        Device {
            id,
            name,
            kind: self.kind.as_str().to_string(),
            connected: false,
            last_seen: None,
        }
    }

    pub async fn register(&self, api: &ApiClient) -> Result<Device, RequestError> {
        let device = self.normalize();
        log::info!("registering device {}", device.id);
        api.register_device(&device).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug() {
        assert_eq!(slug("  Left Knee\tSensor "), "left-knee-sensor");
        assert_eq!(slug("   "), "");
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!(DeviceKind::parse("heart_rate"), Some(DeviceKind::HeartRate));
        assert_eq!(DeviceKind::parse("lidar"), None);
    }
}
