use {
    account::{Account, UserStore},
    com::{ApiClient, ApiConfig},
    session::{LiveSession, SessionConfig},
    std::{env, sync::Arc},
    video::{CameraConfig, StillFrameSampler, V4l2Devices},
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    base::init_stdout_logger();

    let device = env::var("NEUROPOSTURE_DEVICE").unwrap_or_else(|_| "/dev/video0".to_string());
    let config = ApiConfig::from_env();
    log::info!("analysis service at {}", config.base_url());

    let account = Arc::new(Account::open(UserStore::new(UserStore::default_path()))?);
    let api = ApiClient::new(config)?.with_identity(account.clone());
    if !account.is_signed_in() {
        let email = env::var("NEUROPOSTURE_EMAIL").unwrap_or_else(|_| "guest@example.com".to_string());
        account.login(&api, &email, "").await?;
    }
    if let Some(user) = account.user() {
        log::info!("signed in as {} <{}>", user.name, user.email);
    }

    let session_config = SessionConfig::coach().with_camera(CameraConfig::default().with_device(device));
    let sampler = StillFrameSampler::new(session_config.still_quality());
    let session = LiveSession::new(session_config, V4l2Devices::new(), sampler, api);

    session.start_camera().await?;
    session.toggle_live(true)?;
    log::info!("live coaching started, Ctrl-C to stop");

    let mut states = session.subscribe();
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = states.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = states.borrow_and_update().clone();
                if let Some(result) = state.result {
                    log::info!(
                        "{} score={:?} risk={:?}: {}",
                        result.exercise.as_deref().unwrap_or("unknown"),
                        result.posture_score,
                        result.injury_risk,
                        result.feedback.join(" / ")
                    );
                    for correction in &result.corrections {
                        log::info!("  correction: {}", correction);
                    }
                }
            }
        }
    }

    session.stop();
    log::info!("camera released");
    Ok(())
}
