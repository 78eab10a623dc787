use {crate::*, base::PoseSample, std::future::Future};

/// Remote posture scoring.
///
/// One call per sample, no retry. The future is `Send` so controllers can
/// dispatch every call on its own task.
pub trait Scorer: Send + Sync + 'static {
    fn analyze(
        &self,
        sample: PoseSample,
    ) -> impl Future<Output = Result<AnalysisResult, ScoreError>> + Send;
}

impl Scorer for ApiClient {
    async fn analyze(&self, sample: PoseSample) -> Result<AnalysisResult, ScoreError> {
        let result = match sample {
            PoseSample::Landmarks(points) => self.analyze_landmarks(&points).await,
            PoseSample::Still(image) => self.analyze_image(&image).await,
        };
        result.map_err(|err| match err {
            RequestError::Status { body, .. } if !body.is_empty() => ScoreError::Network(body),
            other => ScoreError::from(other),
        })
    }
}
