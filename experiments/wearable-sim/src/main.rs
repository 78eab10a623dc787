use {
    com::{ApiClient, ApiConfig, DEFAULT_DEVICE_ID},
    dashboard::{DashboardSummary, DeviceKind, RiskPanel},
    session::WearableSimulator,
    std::{env, sync::Arc, time::Duration},
};

const RISK_REFRESH: Duration = Duration::from_secs(5);

fn metric(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{:.2}", v))
}

fn report(panel: &RiskPanel) {
    log::info!(
        "risk {} ({}%) knee={} fatigue={} imbalance={}",
        panel.level,
        panel.score_percent,
        metric(panel.knee_stress),
        metric(panel.fatigue_index),
        metric(panel.stride_imbalance)
    );
    for alert in &panel.alerts {
        log::info!("  [{}] {}", alert.tone.class(), alert.msg);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    base::init_stdout_logger();

    let device = env::var("NEUROPOSTURE_DEVICE").unwrap_or_else(|_| DEFAULT_DEVICE_ID.to_string());
    let api = Arc::new(ApiClient::new(ApiConfig::from_env())?);

    let summary = DashboardSummary::load(&api).await;
    let (connected, total) = summary.device_ratio();
    log::info!(
        "service {}, devices connected {}/{}",
        if summary.online { "online" } else { "offline" },
        connected,
        total
    );
    for device in &summary.devices {
        let kind = DeviceKind::parse(&device.kind).map_or(device.kind.as_str(), |kind| kind.label());
        log::info!(
            "  {} ({}, {}){}",
            device.name,
            device.id,
            kind,
            if device.connected { " connected" } else { "" }
        );
    }

    let simulator = WearableSimulator::for_device(Arc::clone(&api), device);
    simulator.start();
    log::info!("streaming {}, Ctrl-C to stop", simulator.device_id());

    let mut refresh = tokio::time::interval(RISK_REFRESH);
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            _ = refresh.tick() => {
                match simulator.refresh_risk().await {
                    Some(risk) => report(&RiskPanel::from(&risk)),
                    None => log::warn!("no risk report for {}", simulator.device_id()),
                }
            }
        }
    }

    simulator.stop();
    Ok(())
}
