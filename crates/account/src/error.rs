use {com::RequestError, std::fmt};

#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Serde(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(err) => write!(f, "io error: {err}"),
            StoreError::Serde(err) => write!(f, "corrupt user record: {err}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serde(err)
    }
}

#[derive(Debug)]
pub enum AccountError {
    SignedOut,
    Store(StoreError),
    Request(RequestError),
}

impl fmt::Display for AccountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountError::SignedOut => write!(f, "not signed in"),
            AccountError::Store(err) => write!(f, "{err}"),
            AccountError::Request(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for AccountError {}

impl From<StoreError> for AccountError {
    fn from(err: StoreError) -> Self {
        AccountError::Store(err)
    }
}

impl From<RequestError> for AccountError {
    fn from(err: RequestError) -> Self {
        AccountError::Request(err)
    }
}
