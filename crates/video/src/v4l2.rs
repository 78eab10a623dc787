use {
    crate::*,
    base::Vec2,
    image::{Image, PixelFormat},
    std::sync::{Arc, atomic::Ordering},
    tokio::sync::oneshot,
    v4l::{
        Device, Format, FourCC, buffer::Type, io::mmap::Stream as MmapStream,
        io::traits::CaptureStream, video::Capture,
    },
};

/// `MediaDevices` backed by a V4L2 capture device.
///
/// Every stream gets its own blocking worker that owns the device. The worker
/// exits and closes the device as soon as the track is stopped.
#[derive(Debug, Default, Clone)]
pub struct V4l2Devices;

impl V4l2Devices {
    pub fn new() -> Self {
        Self
    }
}

struct Opened {
    device: Device,
    size: Vec2<usize>,
    format: PixelFormat,
    frame_rate: f32,
}

fn requested(config: &CameraConfig, format: PixelFormat) -> Format {
    Format::new(
        config.width(),
        config.height(),
        FourCC::new(&format.as_fourcc().to_le_bytes()),
    )
}

fn open_device(config: &CameraConfig) -> Result<Opened, CameraError> {
    let device = Device::with_path(config.device())
        .map_err(|e| CameraError::AccessDenied(format!("{}: {}", config.device(), e)))?;

    // prefer MJPEG so still frames pass through without re-encoding
    let mut actual = Capture::set_format(&device, &requested(config, PixelFormat::Jpeg))?;
    if PixelFormat::from_fourcc(u32::from_le_bytes(actual.fourcc.repr)) != Some(PixelFormat::Jpeg) {
        actual = Capture::set_format(&device, &requested(config, PixelFormat::Yuyv))?;
    }
    let fourcc = u32::from_le_bytes(actual.fourcc.repr);
    let format = PixelFormat::from_fourcc(fourcc).ok_or_else(|| {
        CameraError::Device(format!(
            "unsupported pixel format: {}",
            image::fourcc_to_string(fourcc)
        ))
    })?;

    let params = Capture::set_params(
        &device,
        &v4l::video::capture::Parameters::with_fps(config.fps()),
    )?;
    let frame_rate = params.interval.denominator as f32 / params.interval.numerator.max(1) as f32;

    Ok(Opened {
        device,
        size: Vec2::new(actual.width as usize, actual.height as usize),
        format,
        frame_rate,
    })
}

fn run_capture(opened: Opened, track: Arc<VideoTrack>, buffer_count: u32) {
    let cancel = track.cancel_flag();
    let mut stream = match MmapStream::with_buffers(&opened.device, Type::VideoCapture, buffer_count)
    {
        Ok(stream) => stream,
        Err(error) => {
            log::error!("v4l2: failed to start streaming: {}", error);
            track.stop();
            return;
        }
    };

    log::info!("v4l2: capture loop started on {}", track.label());
    while !cancel.load(Ordering::Acquire) {
        match CaptureStream::next(&mut stream) {
            Ok((data, _metadata)) => {
                let frame = Image::new(opened.size, data.to_vec(), opened.format);
                if !track.publish(frame) {
                    break;
                }
            }
            Err(error) => {
                log::error!("v4l2: capture failed: {}", error);
                track.stop();
                break;
            }
        }
    }
    // dropping the stream and device releases the camera
    log::info!("v4l2: capture loop stopped on {}", track.label());
}

impl MediaDevices for V4l2Devices {
    async fn get_user_media(&self, config: &CameraConfig) -> Result<MediaStream, CameraError> {
        let config = config.clone();
        let (init_tx, init_rx) = oneshot::channel::<Result<Arc<VideoTrack>, CameraError>>();

        // open and capture on the same worker thread
        tokio::task::spawn_blocking(move || {
            let opened = match open_device(&config) {
                Ok(opened) => opened,
                Err(error) => {
                    let _ = init_tx.send(Err(error));
                    return;
                }
            };
            let track = Arc::new(VideoTrack::new(
                config.device(),
                TrackSettings {
                    size: opened.size,
                    frame_rate: opened.frame_rate,
                },
            ));
            if init_tx.send(Ok(Arc::clone(&track))).is_err() {
                return;
            }
            run_capture(opened, track, config.buffer_count());
        });

        let track = init_rx
            .await
            .map_err(|_| CameraError::Device("capture worker died during init".to_string()))??;
        Ok(MediaStream::new(vec![track]))
    }
}
