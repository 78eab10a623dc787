use {
    crate::*,
    base::Vec2,
    base64::{Engine, engine::general_purpose::STANDARD},
    crates_image::ImageEncoder,
};

pub fn rgb_to_jpeg(size: Vec2<usize>, data: &[u8], quality: u8) -> Result<Vec<u8>, ImageError> {
    // the encoder panics on any other length
    if data.len() != size.area() * 3 {
        return Err(ImageError::Encode(format!(
            "RGB buffer for {}x{} must be {} bytes, got {}",
            size.x,
            size.y,
            size.area() * 3,
            data.len()
        )));
    }
    let mut buffer = Vec::new();
    let encoder = crates_image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, quality);
    encoder
        .write_image(
            data,
            size.x as u32,
            size.y as u32,
            crates_image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| ImageError::Encode(e.to_string()))?;
    Ok(buffer)
}

/// Encode a frame as JPEG. MJPEG frames are passed through untouched.
pub fn to_jpeg(image: &Image, quality: u8) -> Result<Vec<u8>, ImageError> {
    match image.format {
        PixelFormat::Jpeg => {
            image.validate()?;
            Ok(image.data.clone())
        }
        _ => {
            let rgb = to_rgb(image)?;
            rgb_to_jpeg(rgb.size, &rgb.data, quality)
        }
    }
}

/// Encode a frame as JPEG and return it as standard base64 text.
pub fn to_jpeg_base64(image: &Image, quality: u8) -> Result<String, ImageError> {
    Ok(STANDARD.encode(to_jpeg(image, quality)?))
}
