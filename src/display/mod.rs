//! Presentation seam between the session and whatever draws the image.

use image::{imageops, Rgba, RgbaImage};

use crate::editor::{DocumentProperties, RasterImage};
use crate::geometry::{PixelSize, ViewportGeometry};

pub const VIEWPORT_BACKGROUND: Rgba<u8> = Rgba([242, 242, 242, 255]);

/// Everything needed to draw one state of the document.
#[derive(Debug, Clone, Copy)]
pub struct DisplayFrame<'a> {
    pub image: &'a RasterImage,
    pub geometry: ViewportGeometry,
    pub properties: &'a DocumentProperties,
}

pub trait DisplayAdapter {
    /// Current drawable area in pixels. May be zero before the surface is laid out.
    fn viewport_size(&self) -> PixelSize;
    fn present(&mut self, frame: DisplayFrame<'_>);
    fn clear(&mut self);
}

/// Renders into an in-memory RGBA frame the size of the viewport.
#[derive(Debug, Clone)]
pub struct OffscreenDisplay {
    viewport: PixelSize,
    frame: Option<RgbaImage>,
    properties: Option<DocumentProperties>,
}

impl OffscreenDisplay {
    pub const fn new(viewport: PixelSize) -> Self {
        Self {
            viewport,
            frame: None,
            properties: None,
        }
    }

    pub const fn frame(&self) -> Option<&RgbaImage> {
        self.frame.as_ref()
    }

    pub const fn properties(&self) -> Option<&DocumentProperties> {
        self.properties.as_ref()
    }
}

impl DisplayAdapter for OffscreenDisplay {
    fn viewport_size(&self) -> PixelSize {
        self.viewport
    }

    fn present(&mut self, frame: DisplayFrame<'_>) {
        self.frame = Some(render_letterboxed(frame.image, &frame.geometry));
        self.properties = Some(frame.properties.clone());
    }

    fn clear(&mut self) {
        self.frame = None;
        self.properties = None;
    }
}

/// Scales `image` to the fitted size and centers it on a background-filled viewport.
pub fn render_letterboxed(image: &RasterImage, geometry: &ViewportGeometry) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(
        geometry.viewport.width,
        geometry.viewport.height,
        VIEWPORT_BACKGROUND,
    );
    let scaled = imageops::resize(
        &image.pixels().to_rgba8(),
        geometry.scaled.width,
        geometry.scaled.height,
        imageops::FilterType::Triangle,
    );
    imageops::overlay(
        &mut canvas,
        &scaled,
        i64::from(geometry.offset.x),
        i64::from(geometry.offset.y),
    );
    canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::ColorMode;
    use image::{DynamicImage, Rgb, RgbImage};

    fn red(width: u32, height: u32) -> RasterImage {
        RasterImage::new(
            DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([255, 0, 0]))),
            None,
        )
    }

    fn properties() -> DocumentProperties {
        DocumentProperties {
            file_name: "red.png".to_string(),
            width: 100,
            height: 50,
            mode: ColorMode::Rgb,
        }
    }

    #[test]
    fn render_letterboxed_fills_bars_with_background() {
        let image = red(100, 50);
        let geometry = ViewportGeometry::fit(image.size(), PixelSize::new(40, 40))
            .expect("geometry should fit");

        let frame = render_letterboxed(&image, &geometry);

        assert_eq!(frame.dimensions(), (40, 40));
        assert_eq!(*frame.get_pixel(20, 2), VIEWPORT_BACKGROUND);
        let inside = frame.get_pixel(20, 20);
        assert!(inside[0] > 250 && inside[1] < 5 && inside[3] == 255, "{inside:?}");
        assert_eq!(*frame.get_pixel(20, 37), VIEWPORT_BACKGROUND);
    }

    #[test]
    fn offscreen_display_keeps_last_frame_until_cleared() {
        let image = red(100, 50);
        let props = properties();
        let mut display = OffscreenDisplay::new(PixelSize::new(60, 30));
        let geometry = ViewportGeometry::fit(image.size(), display.viewport_size())
            .expect("geometry should fit");

        display.present(DisplayFrame {
            image: &image,
            geometry,
            properties: &props,
        });
        assert_eq!(display.frame().map(RgbaImage::dimensions), Some((60, 30)));
        assert_eq!(display.properties(), Some(&props));

        display.clear();
        assert!(display.frame().is_none());
        assert!(display.properties().is_none());
    }
}
