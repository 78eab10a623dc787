use {
    crate::*,
    com::UserSettings,
    serde::{Deserialize, Serialize},
    std::{
        io::ErrorKind,
        path::{Path, PathBuf},
    },
};

pub const HOME_ENV: &str = "NEUROPOSTURE_HOME";
pub const USER_FILE: &str = "neuroposture_user.json";

/// The signed-in user as kept on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub email: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<UserSettings>,
}

/// JSON file holding at most one `UserRecord`.
#[derive(Debug, Clone)]
pub struct UserStore {
    path: PathBuf,
}

impl UserStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$NEUROPOSTURE_HOME/neuroposture_user.json`, else under `~/.neuroposture`.
    pub fn default_path() -> PathBuf {
        let dir = match std::env::var_os(HOME_ENV) {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => std::env::var_os("HOME")
                .map(PathBuf::from)
                .unwrap_or_default()
                .join(".neuroposture"),
        };
        dir.join(USER_FILE)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The stored record, or `None` when nothing was saved.
    pub fn load(&self) -> Result<Option<UserRecord>, StoreError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        Ok(Some(serde_json::from_str(&text)?))
    }

    pub fn save(&self, record: &UserRecord) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(record)?)?;
        Ok(())
    }

    /// Remove the stored record. Clearing an empty store is fine.
    pub fn clear(&self) -> Result<(), StoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
