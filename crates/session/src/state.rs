use {base::PoseSample, com::AnalysisResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionMode {
    #[default]
    Idle,
    CameraOn,
    /// Camera on and the live timer running.
    LiveAnalyzing,
}

impl SessionMode {
    pub fn camera_on(&self) -> bool {
        !matches!(self, SessionMode::Idle)
    }
}

/// Observable state of a live session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub mode: SessionMode,
    /// Latest analysis. Each new result replaces the previous one.
    pub result: Option<AnalysisResult>,
    /// Last sample sent for scoring.
    pub sample: Option<PoseSample>,
    /// Why the camera could not be started.
    pub error: Option<String>,
}
