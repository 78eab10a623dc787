use {crate::*, base::Vec2};

/// A captured frame in one of the supported pixel formats.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub size: Vec2<usize>,
    pub data: Vec<u8>,
    pub format: PixelFormat,
}

impl Image {
    pub fn new(size: Vec2<usize>, data: Vec<u8>, format: PixelFormat) -> Self {
        Self { size, data, format }
    }

    /// Check that the buffer is large enough for the declared size.
    ///
    /// JPEG data is compressed, so only a non-empty buffer is required.
    pub fn validate(&self) -> Result<(), ImageError> {
        let expected = match self.format.bytes_per_pixel() {
            Some(bpp) => self.size.area() * bpp,
            None => 1,
        };
        if self.data.len() < expected {
            return Err(ImageError::Decode(format!(
                "{:?} frame of {}x{} needs {} bytes, got {}",
                self.format,
                self.size.x,
                self.size.y,
                expected,
                self.data.len()
            )));
        }
        Ok(())
    }
}
