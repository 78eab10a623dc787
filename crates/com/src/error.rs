use std::fmt;

/// Failure of a single HTTP call.
#[derive(Debug)]
pub enum RequestError {
    Transport(String),
    /// Non-2xx response. The body text is the error message.
    Status {
        status: u16,
        body: String,
    },
    Decode(String),
    InvalidUrl(String),
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::Transport(msg) => write!(f, "transport error: {msg}"),
            RequestError::Status { status, body } => {
                if body.is_empty() {
                    write!(f, "HTTP {status}")
                } else {
                    write!(f, "{body}")
                }
            }
            RequestError::Decode(msg) => write!(f, "decode error: {msg}"),
            RequestError::InvalidUrl(msg) => write!(f, "invalid url: {msg}"),
        }
    }
}

impl std::error::Error for RequestError {}

impl From<reqwest::Error> for RequestError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RequestError::Decode(err.to_string())
        } else if err.is_builder() {
            RequestError::InvalidUrl(err.to_string())
        } else {
            RequestError::Transport(err.to_string())
        }
    }
}

/// Failure of one analyze call. Never retried.
#[derive(Debug)]
pub enum ScoreError {
    Network(String),
}

impl fmt::Display for ScoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreError::Network(detail) => write!(f, "network error: {detail}"),
        }
    }
}

impl std::error::Error for ScoreError {}

impl From<RequestError> for ScoreError {
    fn from(err: RequestError) -> Self {
        ScoreError::Network(err.to_string())
    }
}

#[derive(Debug)]
pub enum AuthError {
    Timeout,
    Request(RequestError),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::Timeout => write!(f, "login timed out"),
            AuthError::Request(err) => write!(f, "login failed: {err}"),
        }
    }
}

impl std::error::Error for AuthError {}

impl From<RequestError> for AuthError {
    fn from(err: RequestError) -> Self {
        AuthError::Request(err)
    }
}
