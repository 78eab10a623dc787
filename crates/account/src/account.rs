use {
    crate::*,
    com::{ApiClient, IdentityProvider, ProfileUpdate, UserSettings},
    std::sync::Mutex,
};

/// The signed-in user, mirrored to a `UserStore` on every change.
pub struct Account {
    store: UserStore,
    user: Mutex<Option<UserRecord>>,
}

impl Account {
    /// Restore whatever user the store holds. A corrupt file counts as signed out.
    pub fn open(store: UserStore) -> Result<Self, StoreError> {
        let user = match store.load() {
            Ok(user) => user,
            Err(StoreError::Serde(err)) => {
                log::warn!("ignoring corrupt user record {}: {}", store.path().display(), err);
                None
            }
            Err(err) => return Err(err),
        };
        Ok(Self {
            store,
            user: Mutex::new(user),
        })
    }

    pub fn store(&self) -> &UserStore {
        &self.store
    }

    pub fn user(&self) -> Option<UserRecord> {
        self.user.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.lock().unwrap_or_else(|e| e.into_inner()).is_some()
    }

    /// Replace the user and persist it. `None` signs out.
    pub fn set_user(&self, user: Option<UserRecord>) -> Result<(), StoreError> {
        match &user {
            Some(record) => self.store.save(record)?,
            None => self.store.clear()?,
        }
        *self.user.lock().unwrap_or_else(|e| e.into_inner()) = user;
        Ok(())
    }

    /// Sign in. Any email is accepted.
    ///
    /// When the service does not answer (or answers with an error) the user
    /// is signed in locally with the derived name and default settings.
    pub async fn login(
        &self,
        api: &ApiClient,
        email: &str,
        display_name: &str,
    ) -> Result<UserRecord, StoreError> {
        let email = email.trim();
        let name = resolve_display_name(email, display_name);

        let record = match api.login(email, &name).await {
            Ok(profile) => UserRecord {
                email: profile.email.unwrap_or_else(|| email.to_string()),
                name: non_empty_or_default(profile.name.unwrap_or(name)),
                id: profile.id.filter(|id| !id.is_empty()),
                settings: Some(profile.settings.unwrap_or_else(UserSettings::fallback)),
            },
            Err(err) => {
                log::warn!("login failed, continuing offline: {}", err);
                UserRecord {
                    email: email.to_string(),
                    name,
                    id: None,
                    settings: Some(UserSettings::fallback()),
                }
            }
        };

        self.set_user(Some(record.clone()))?;
        log::info!("signed in as {}", record.email);
        Ok(record)
    }

    pub fn logout(&self) -> Result<(), StoreError> {
        self.set_user(None)
    }

    /// Refresh name and email from `/users/me`. Local values stay on failure.
    pub async fn sync_profile(&self, api: &ApiClient) -> Result<Option<UserRecord>, StoreError> {
        let Some(mut record) = self.user() else {
            return Ok(None);
        };
        match api.profile().await {
            Ok(profile) => {
                if let Some(name) = profile.name {
                    record.name = name;
                }
                if let Some(email) = profile.email {
                    record.email = email;
                }
                self.set_user(Some(record.clone()))?;
            }
            Err(err) => log::debug!("profile refresh failed: {}", err),
        }
        Ok(Some(record))
    }

    pub async fn rename(&self, api: &ApiClient, name: &str) -> Result<UserRecord, AccountError> {
        let Some(mut record) = self.user() else {
            return Err(AccountError::SignedOut);
        };
        let profile = api.update_profile(&ProfileUpdate::rename(name.trim())).await?;
        record.name = profile.name.unwrap_or_else(|| name.trim().to_string());
        self.set_user(Some(record.clone()))?;
        Ok(record)
    }

    /// Patch the user's settings and keep the service's answer locally.
    pub async fn update_settings(
        &self,
        api: &ApiClient,
        patch: &UserSettings,
    ) -> Result<UserSettings, AccountError> {
        let Some(mut record) = self.user() else {
            return Err(AccountError::SignedOut);
        };
        let settings = api.update_settings(patch).await?;
        record.settings = Some(settings.clone());
        self.set_user(Some(record))?;
        Ok(settings)
    }
}

impl IdentityProvider for Account {
    fn email(&self) -> Option<String> {
        self.user
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .map(|user| user.email.clone())
    }
}
