use {crate::SessionMode, std::fmt, video::CameraError};

#[derive(Debug)]
pub enum SessionError {
    Camera(CameraError),
    AlreadyActive,
    InvalidState(SessionMode),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Camera(err) => write!(f, "{err}"),
            SessionError::AlreadyActive => write!(f, "camera already active"),
            SessionError::InvalidState(mode) => write!(f, "not allowed while {:?}", mode),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<CameraError> for SessionError {
    fn from(err: CameraError) -> Self {
        SessionError::Camera(err)
    }
}
