use {
    base::Landmark,
    serde::{Deserialize, Serialize},
};

pub const DEFAULT_DEVICE_ID: &str = "esp32-demo-1";
pub const DEFAULT_HISTORY_LIMIT: usize = 50;
pub const ANALYSIS_FAILED: &str = "Analysis failed";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl Health {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub name: String,
}

/// Per-user client settings. Unset fields are left out when patching.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_device: Option<String>,
}

impl UserSettings {
    /// Settings used when the service has none to offer.
    pub fn fallback() -> Self {
        Self {
            api_url: Some(crate::DEFAULT_API_URL.to_string()),
            default_device: Some(DEFAULT_DEVICE_ID.to_string()),
        }
    }

    /// `self` with every field set in `patch` replaced.
    pub fn merged(&self, patch: &UserSettings) -> Self {
        Self {
            api_url: patch.api_url.clone().or_else(|| self.api_url.clone()),
            default_device: patch
                .default_device
                .clone()
                .or_else(|| self.default_device.clone()),
        }
    }
}

/// User document as returned by `/users/login` and `/users/me`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height_cm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bmi: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_injuries: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<UserSettings>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height_cm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bmi: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_injuries: Option<Vec<String>>,
}

impl ProfileUpdate {
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: String,
    pub name: String,
    /// `esp32`, `mpu6050` or `heart_rate`.
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub connected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_seen: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub ok: bool,
}

/// One ESP32/MPU6050 sample.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub device_id: String,
    pub accel_x: f64,
    pub accel_y: f64,
    pub accel_z: f64,
    pub gyro_x: f64,
    pub gyro_y: f64,
    pub gyro_z: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngestAck {
    #[serde(default)]
    pub received: bool,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    /// `danger`, `warning` or `info`.
    #[serde(rename = "type")]
    pub kind: String,
    pub msg: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskReport {
    #[serde(default)]
    pub risk_level: String,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub alerts: Vec<Alert>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub knee_stress: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fatigue_index: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stride_imbalance: Option<f64>,
}

/// Stored reading as returned by `/iot/{id}/history`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(default)]
    pub accel: [f64; 3],
    #[serde(default)]
    pub gyro: [f64; 3],
    #[serde(default)]
    pub heart_rate: Option<f64>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Outcome of one posture analysis. Replaces the previous one wholesale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default)]
    pub detected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exercise: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub injury_risk: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posture_score: Option<f64>,
    #[serde(default)]
    pub feedback: Vec<String>,
    #[serde(default)]
    pub corrections: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub knee_angle: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnalysisResult {
    /// Result shown after a failed analyze call.
    pub fn failed() -> Self {
        Self {
            detected: false,
            feedback: vec![ANALYSIS_FAILED.to_string()],
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LandmarkPoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub visibility: f32,
}

impl From<&Landmark> for LandmarkPoint {
    fn from(landmark: &Landmark) -> Self {
        Self {
            x: landmark.x,
            y: landmark.y,
            z: landmark.z,
            visibility: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandmarkPayload {
    pub landmarks: Vec<LandmarkPoint>,
}

impl LandmarkPayload {
    /// Every landmark in input order, marked fully visible.
    pub fn from_landmarks(landmarks: &[Landmark]) -> Self {
        Self {
            landmarks: landmarks.iter().map(LandmarkPoint::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImagePayload {
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct ExerciseList {
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landmark_payload_order_and_visibility() {
        let points = [
            Landmark::new(0.1, 0.2, 0.3),
            Landmark::new(0.4, 0.5, 0.6),
            Landmark::new(0.7, 0.8, 0.9),
        ];
        let payload = LandmarkPayload::from_landmarks(&points);
        assert_eq!(payload.landmarks.len(), 3);
        for (point, landmark) in payload.landmarks.iter().zip(points.iter()) {
            assert_eq!(point.x, landmark.x);
            assert_eq!(point.y, landmark.y);
            assert_eq!(point.z, landmark.z);
            assert_eq!(point.visibility, 1.0);
        }
    }

    #[test]
    fn test_failed_result() {
        let result = AnalysisResult::failed();
        assert!(!result.detected);
        assert_eq!(result.feedback, vec!["Analysis failed".to_string()]);
        assert!(result.injury_risk.is_none());
    }

    #[test]
    fn test_alert_type_field() {
        let alert: Alert =
            serde_json::from_str(r#"{"type":"danger","msg":"High knee stress detected"}"#).unwrap();
        assert_eq!(alert.kind, "danger");
    }

    #[test]
    fn test_settings_merge() {
        let merged = UserSettings::fallback().merged(&UserSettings {
            api_url: None,
            default_device: Some("band-2".to_string()),
        });
        assert_eq!(merged.api_url.as_deref(), Some("http://localhost:8000"));
        assert_eq!(merged.default_device.as_deref(), Some("band-2"));
    }

    #[test]
    fn test_risk_without_metrics() {
        let report: RiskReport =
            serde_json::from_str(r#"{"risk_level": "low", "score": 0.1, "alerts": []}"#).unwrap();
        assert_eq!(report.risk_level, "low");
        assert!(report.knee_stress.is_none());
        assert!(report.fatigue_index.is_none());
        assert!(report.stride_imbalance.is_none());
    }

    #[test]
    fn test_sparse_analysis_result() {
        let result: AnalysisResult =
            serde_json::from_str(r#"{"detected": false, "error": "Invalid image"}"#).unwrap();
        assert!(!result.detected);
        assert!(result.feedback.is_empty());
        assert_eq!(result.error.as_deref(), Some("Invalid image"));
    }
}
