use image::{DynamicImage, Pixel, Rgba, RgbaImage};

use crate::editor::RasterImage;
use crate::geometry::ImageRect;

/// Half-transparent black laid over everything outside the crop selection.
pub const CROP_MASK_COLOR: Rgba<u8> = Rgba([0, 0, 0, 0x80]);

/// Top, left, right and bottom bands around `selection`. Bands never overlap
/// each other or the selection, so every masked pixel is darkened exactly once.
pub fn mask_bands(width: u32, height: u32, selection: ImageRect) -> [ImageRect; 4] {
    let top = selection.y.min(height);
    let bottom = selection.bottom().min(height);
    let left = selection.x.min(width);
    let right = selection.right().min(width);
    let band_height = bottom.saturating_sub(top);

    [
        ImageRect::new(0, 0, width, top),
        ImageRect::new(0, top, left, band_height),
        ImageRect::new(right, top, width.saturating_sub(right), band_height),
        ImageRect::new(0, bottom, width, height.saturating_sub(bottom)),
    ]
}

/// Returns an RGBA working copy of `image` with the area outside `selection` dimmed.
pub fn dim_outside_selection(image: &RasterImage, selection: ImageRect) -> RasterImage {
    let mut canvas = image.pixels().to_rgba8();
    let (width, height) = canvas.dimensions();
    for band in mask_bands(width, height, selection) {
        darken_band(&mut canvas, band);
    }
    image.with_pixels(DynamicImage::ImageRgba8(canvas))
}

fn darken_band(canvas: &mut RgbaImage, band: ImageRect) {
    for y in band.y..band.bottom() {
        for x in band.x..band.right() {
            let pixel = canvas.get_pixel_mut(x, y);
            let alpha = pixel[3];
            pixel.blend(&CROP_MASK_COLOR);
            // Blending composites coverage too; the preview keeps the source alpha.
            pixel[3] = alpha;
        }
    }
}
