use {crate::*, base::Vec2};

pub fn yuyv_to_rgb(size: Vec2<usize>, data: &[u8]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(size.area() * 3);

    // YUYV packs two pixels into [Y0, U, Y1, V]
    for chunk in data[..(size.area() * 2).min(data.len())].chunks_exact(4) {
        let (r0, g0, b0) = yuv_to_rgb(chunk[0], chunk[1], chunk[3]);
        let (r1, g1, b1) = yuv_to_rgb(chunk[2], chunk[1], chunk[3]);
        rgb.extend_from_slice(&[r0, g0, b0, r1, g1, b1]);
    }

    rgb
}

pub fn jpeg_to_rgb(image: &Image) -> Result<Image, ImageError> {
    let decoded = crates_image::load_from_memory_with_format(
        &image.data,
        crates_image::ImageFormat::Jpeg,
    )?
    .to_rgb8();
    let size = Vec2::new(decoded.width() as usize, decoded.height() as usize);
    Ok(Image::new(size, decoded.into_raw(), PixelFormat::Rgb8))
}

/// Convert any supported frame to packed RGB.
pub fn to_rgb(image: &Image) -> Result<Image, ImageError> {
    image.validate()?;
    match image.format {
        // drop trailing padding past the last pixel
        PixelFormat::Rgb8 => Ok(Image::new(
            image.size,
            image.data[..image.size.area() * 3].to_vec(),
            PixelFormat::Rgb8,
        )),
        PixelFormat::Yuyv => Ok(Image::new(
            image.size,
            yuyv_to_rgb(image.size, &image.data),
            PixelFormat::Rgb8,
        )),
        PixelFormat::Jpeg => jpeg_to_rgb(image),
    }
}
