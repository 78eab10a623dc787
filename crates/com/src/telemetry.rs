use {crate::*, std::future::Future};

/// Wearable sensor uplink.
pub trait Telemetry: Send + Sync + 'static {
    fn send_reading(
        &self,
        reading: SensorReading,
    ) -> impl Future<Output = Result<(), RequestError>> + Send;

    fn fetch_risk(
        &self,
        device_id: &str,
    ) -> impl Future<Output = Result<RiskReport, RequestError>> + Send;
}

impl Telemetry for ApiClient {
    async fn send_reading(&self, reading: SensorReading) -> Result<(), RequestError> {
        self.ingest(&reading).await.map(|_| ())
    }

    async fn fetch_risk(&self, device_id: &str) -> Result<RiskReport, RequestError> {
        self.risk(device_id).await
    }
}
