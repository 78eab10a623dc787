use com::{Alert, RiskReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskTone {
    High,
    Medium,
    Low,
}

impl RiskTone {
    /// Unknown levels read as low.
    pub fn from_level(level: &str) -> Self {
        match level {
            "high" => RiskTone::High,
            "medium" => RiskTone::Medium,
            _ => RiskTone::Low,
        }
    }

    pub fn class(&self) -> &'static str {
        match self {
            RiskTone::High => "risk-high",
            RiskTone::Medium => "risk-medium",
            RiskTone::Low => "risk-low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertTone {
    Danger,
    Warning,
    Info,
}

impl AlertTone {
    pub fn from_kind(kind: &str) -> Self {
        match kind {
            "danger" => AlertTone::Danger,
            "warning" => AlertTone::Warning,
            _ => AlertTone::Info,
        }
    }

    pub fn class(&self) -> &'static str {
        match self {
            AlertTone::Danger => "alert-danger",
            AlertTone::Warning => "alert-warning",
            AlertTone::Info => "alert-info",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TonedAlert {
    pub tone: AlertTone,
    pub msg: String,
}

impl From<&Alert> for TonedAlert {
    fn from(alert: &Alert) -> Self {
        Self {
            tone: AlertTone::from_kind(&alert.kind),
            msg: alert.msg.clone(),
        }
    }
}

/// Risk indicator, alerts and recommendations for one device.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskPanel {
    pub level: String,
    pub tone: RiskTone,
    /// Score as a whole percentage.
    pub score_percent: u32,
    pub alerts: Vec<TonedAlert>,
    pub recommendations: Vec<String>,
    /// Biomechanics metrics, absent when the service did not report them.
    pub knee_stress: Option<f64>,
    pub fatigue_index: Option<f64>,
    pub stride_imbalance: Option<f64>,
}

impl RiskPanel {
    pub fn class(&self) -> &'static str {
        self.tone.class()
    }

    pub fn has_alerts(&self) -> bool {
        !self.alerts.is_empty()
    }
}

impl From<&RiskReport> for RiskPanel {
    fn from(report: &RiskReport) -> Self {
        Self {
            level: report.risk_level.clone(),
            tone: RiskTone::from_level(&report.risk_level),
            score_percent: (report.score.clamp(0.0, 1.0) * 100.0).round() as u32,
            alerts: report.alerts.iter().map(TonedAlert::from).collect(),
            recommendations: report.recommendations.clone(),
            knee_stress: report.knee_stress,
            fatigue_index: report.fatigue_index,
            stride_imbalance: report.stride_imbalance,
        }
    }
}
