use image::{ColorType, DynamicImage, GenericImageView, ImageFormat};

use crate::geometry::{ImageRect, PixelSize};

use super::tools::RotateDirection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Luma,
    LumaAlpha,
    Rgb,
    Rgba,
    Other,
}

impl ColorMode {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Luma => "L",
            Self::LumaAlpha => "LA",
            Self::Rgb => "RGB",
            Self::Rgba => "RGBA",
            Self::Other => "other",
        }
    }

    fn from_color_type(color: ColorType) -> Self {
        match color {
            ColorType::L8 | ColorType::L16 => Self::Luma,
            ColorType::La8 | ColorType::La16 => Self::LumaAlpha,
            ColorType::Rgb8 | ColorType::Rgb16 | ColorType::Rgb32F => Self::Rgb,
            ColorType::Rgba8 | ColorType::Rgba16 | ColorType::Rgba32F => Self::Rgba,
            _ => Self::Other,
        }
    }
}

/// Decoded pixel buffer plus the format it was read from.
///
/// Cloning deep-copies the pixels, which is what history snapshots rely on.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    pixels: DynamicImage,
    format: Option<ImageFormat>,
}

impl RasterImage {
    pub const fn new(pixels: DynamicImage, format: Option<ImageFormat>) -> Self {
        Self { pixels, format }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn size(&self) -> PixelSize {
        let (width, height) = self.pixels.dimensions();
        PixelSize::new(width, height)
    }

    pub fn color_mode(&self) -> ColorMode {
        ColorMode::from_color_type(self.pixels.color())
    }

    pub const fn format(&self) -> Option<ImageFormat> {
        self.format
    }

    pub const fn pixels(&self) -> &DynamicImage {
        &self.pixels
    }

    /// Keeps the format hint while swapping the buffer.
    pub fn with_pixels(&self, pixels: DynamicImage) -> Self {
        Self::new(pixels, self.format)
    }

    /// Quarter turn; the canvas swaps width and height so no pixels are lost.
    pub fn rotated(&self, direction: RotateDirection) -> Self {
        let pixels = match direction {
            RotateDirection::Right => self.pixels.rotate90(),
            RotateDirection::Left => self.pixels.rotate270(),
        };
        self.with_pixels(pixels)
    }

    pub fn cropped(&self, rect: ImageRect) -> Self {
        self.with_pixels(
            self.pixels
                .crop_imm(rect.x, rect.y, rect.width, rect.height),
        )
    }
}
