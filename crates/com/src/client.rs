use {
    crate::*,
    base::Landmark,
    reqwest::{Method, RequestBuilder},
    serde::de::DeserializeOwned,
    std::sync::Arc,
};

/// Typed client for the NeuroPosture HTTP API.
///
/// Cheap to clone; clones share the connection pool and identity.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
    identity: Arc<dyn IdentityProvider>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.config.base_url())
            .finish()
    }
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Result<Self, RequestError> {
        reqwest::Url::parse(config.base_url())
            .map_err(|e| RequestError::InvalidUrl(format!("{}: {}", config.base_url(), e)))?;
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self {
            http,
            config,
            identity: Arc::new(Anonymous),
        })
    }

    /// Use `identity` for the `X-User-Email` header of authenticated calls.
    pub fn with_identity(mut self, identity: Arc<dyn IdentityProvider>) -> Self {
        self.identity = identity;
        self
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, self.config.url(path))
    }

    // ids are user-typed, so each one goes in as a single encoded segment
    fn device_url(&self, segments: &[&str]) -> Result<reqwest::Url, RequestError> {
        let invalid = || RequestError::InvalidUrl(self.config.base_url().to_string());
        let mut url = reqwest::Url::parse(self.config.base_url()).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn authed(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.request(method, path);
        match self.identity.email() {
            Some(email) => builder.header(IDENTITY_HEADER, email),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, RequestError> {
        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::debug!("request failed with {}: {}", status, body);
            return Err(RequestError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json::<T>().await?)
    }

    pub async fn health(&self) -> Result<Health, RequestError> {
        self.send(self.request(Method::GET, "/health")).await
    }

    /// Find-or-create the user. Gives up after the login timeout.
    pub async fn login(&self, email: &str, name: &str) -> Result<Profile, AuthError> {
        let request = LoginRequest {
            email: email.to_string(),
            name: name.to_string(),
        };
        let call = self.send(self.request(Method::POST, "/users/login").json(&request));
        match tokio::time::timeout(self.config.login_timeout(), call).await {
            Ok(result) => Ok(result?),
            Err(_) => {
                log::warn!("login timed out after {:?}", self.config.login_timeout());
                Err(AuthError::Timeout)
            }
        }
    }

    pub async fn profile(&self) -> Result<Profile, RequestError> {
        self.send(self.authed(Method::GET, "/users/me")).await
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<Profile, RequestError> {
        self.send(self.authed(Method::PATCH, "/users/me").json(update))
            .await
    }

    pub async fn settings(&self) -> Result<UserSettings, RequestError> {
        self.send(self.authed(Method::GET, "/users/me/settings"))
            .await
    }

    pub async fn update_settings(&self, patch: &UserSettings) -> Result<UserSettings, RequestError> {
        self.send(self.authed(Method::PATCH, "/users/me/settings").json(patch))
            .await
    }

    pub async fn list_devices(&self) -> Result<Vec<Device>, RequestError> {
        self.send(self.request(Method::GET, "/devices")).await
    }

    pub async fn register_device(&self, device: &Device) -> Result<Device, RequestError> {
        self.send(self.request(Method::POST, "/devices/register").json(device))
            .await
    }

    pub async fn connect_device(&self, id: &str) -> Result<Ack, RequestError> {
        let url = self.device_url(&["devices", id, "connect"])?;
        self.send(self.http.post(url)).await
    }

    pub async fn disconnect_device(&self, id: &str) -> Result<Ack, RequestError> {
        let url = self.device_url(&["devices", id, "disconnect"])?;
        self.send(self.http.post(url)).await
    }

    pub async fn ingest(&self, reading: &SensorReading) -> Result<IngestAck, RequestError> {
        self.send(self.request(Method::POST, "/iot/ingest").json(reading))
            .await
    }

    pub async fn risk(&self, device_id: &str) -> Result<RiskReport, RequestError> {
        let url = self.device_url(&["iot", device_id, "risk"])?;
        self.send(self.http.get(url)).await
    }

    /// Recent readings of a device, newest last. `None` asks for the last 50.
    pub async fn history(
        &self,
        device_id: &str,
        limit: Option<usize>,
    ) -> Result<Vec<HistoryEntry>, RequestError> {
        let limit = limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
        let mut url = self.device_url(&["iot", device_id, "history"])?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string());
        self.send(self.http.get(url)).await
    }

    /// Score one base64 JPEG frame.
    pub async fn analyze_image(&self, image: &str) -> Result<AnalysisResult, RequestError> {
        let payload = ImagePayload {
            image: image.to_string(),
        };
        self.send(
            self.request(Method::POST, "/posture/analyze/base64")
                .json(&payload),
        )
        .await
    }

    /// Score one landmark set.
    pub async fn analyze_landmarks(
        &self,
        landmarks: &[Landmark],
    ) -> Result<AnalysisResult, RequestError> {
        let payload = LandmarkPayload::from_landmarks(landmarks);
        self.send(
            self.request(Method::POST, "/posture/analyze/landmarks")
                .json(&payload),
        )
        .await
    }

    pub async fn list_exercises(&self) -> Result<Vec<Exercise>, RequestError> {
        let list: ExerciseList = self
            .send(self.request(Method::GET, "/coach/exercises"))
            .await?;
        Ok(list.exercises)
    }
}
