use video::{CameraConfig, FacingMode};

#[test]
fn test_config_defaults() {
    let config = CameraConfig::default();

    assert_eq!(config.device(), "/dev/video0");
    assert_eq!(config.width(), 640);
    assert_eq!(config.height(), 480);
    assert_eq!(config.fps(), 30);
    assert_eq!(config.facing(), FacingMode::User);
    assert_eq!(config.buffer_count(), 4);
    assert!(!config.audio());
}

#[test]
fn test_config_builder() {
    let config = CameraConfig::default()
        .with_device("/dev/video1")
        .with_width(1920)
        .with_height(1080)
        .with_fps(60)
        .with_facing(FacingMode::Environment)
        .with_buffer_count(8);

    assert_eq!(config.device(), "/dev/video1");
    assert_eq!(config.width(), 1920);
    assert_eq!(config.height(), 1080);
    assert_eq!(config.fps(), 60);
    assert_eq!(config.facing(), FacingMode::Environment);
    assert_eq!(config.buffer_count(), 8);
    assert!(!config.audio());
}
