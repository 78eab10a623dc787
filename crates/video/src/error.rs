use std::fmt;

#[derive(Debug)]
pub enum CameraError {
    /// Permission denied or no usable camera. Not retried.
    AccessDenied(String),
    Device(String),
    Stream(String),
    Encode(image::ImageError),
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraError::AccessDenied(msg) => {
                write!(f, "camera access denied or unavailable: {msg}")
            }
            CameraError::Device(msg) => write!(f, "device error: {msg}"),
            CameraError::Stream(msg) => write!(f, "stream error: {msg}"),
            CameraError::Encode(err) => write!(f, "encode error: {err}"),
        }
    }
}

impl std::error::Error for CameraError {}

impl From<std::io::Error> for CameraError {
    fn from(err: std::io::Error) -> Self {
        CameraError::Device(err.to_string())
    }
}

impl From<image::ImageError> for CameraError {
    fn from(err: image::ImageError) -> Self {
        CameraError::Encode(err)
    }
}
