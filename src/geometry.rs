//! Pixel primitives and the aspect-fit mapping between image space and viewport space.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error("viewport has no area: {width}x{height}")]
    InvalidViewport { width: u32, height: u32 },
    #[error("image has no area: {width}x{height}")]
    EmptyImage { width: u32, height: u32 },
}

pub type GeometryResult<T> = std::result::Result<T, GeometryError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ToolPoint {
    pub x: i32,
    pub y: i32,
}

impl ToolPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

impl PixelSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub const fn is_landscape(self) -> bool {
        self.width > self.height
    }
}

/// Axis-aligned rectangle in image pixels; `x + width` is the exclusive right edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImageRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl ImageRect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn right(self) -> u32 {
        self.x.saturating_add(self.width)
    }

    pub const fn bottom(self) -> u32 {
        self.y.saturating_add(self.height)
    }

    pub const fn has_area(self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub const fn fits_within(self, size: PixelSize) -> bool {
        self.has_area() && self.right() <= size.width && self.bottom() <= size.height
    }
}

/// Letterboxed placement of an image inside a viewport, recomputed on every render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportGeometry {
    pub viewport: PixelSize,
    pub image: PixelSize,
    pub frame_ratio: f64,
    pub image_ratio: f64,
    pub scaled: PixelSize,
    pub offset: ToolPoint,
    /// Image pixels per displayed pixel.
    pub scale_ratio: f64,
}

impl ViewportGeometry {
    pub fn fit(image: PixelSize, viewport: PixelSize) -> GeometryResult<Self> {
        if viewport.is_empty() {
            return Err(GeometryError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        if image.is_empty() {
            return Err(GeometryError::EmptyImage {
                width: image.width,
                height: image.height,
            });
        }

        let frame_ratio = f64::from(viewport.width) / f64::from(viewport.height);
        let image_ratio = f64::from(image.width) / f64::from(image.height);
        let scaled = if frame_ratio > image_ratio {
            // bars left and right
            PixelSize::new(
                truncate_to_pixels(f64::from(viewport.height) * image_ratio),
                viewport.height,
            )
        } else {
            PixelSize::new(
                viewport.width,
                truncate_to_pixels(f64::from(viewport.width) / image_ratio),
            )
        };
        let scale_ratio = f64::from(image.width) / f64::from(scaled.width);
        let offset = ToolPoint::new(
            centered_offset(viewport.width, scaled.width),
            centered_offset(viewport.height, scaled.height),
        );

        Ok(Self {
            viewport,
            image,
            frame_ratio,
            image_ratio,
            scaled,
            offset,
            scale_ratio,
        })
    }

    /// Maps a viewport pixel to image space, clamping to the displayed image first.
    ///
    /// A point on the far edge of the displayed image maps to the image's
    /// width/height, which is the exclusive end coordinate of a selection.
    pub fn viewport_to_image(&self, point: ToolPoint) -> ToolPoint {
        let left = self.offset.x;
        let top = self.offset.y;
        let right = left.saturating_add(i32::try_from(self.scaled.width).unwrap_or(i32::MAX));
        let bottom = top.saturating_add(i32::try_from(self.scaled.height).unwrap_or(i32::MAX));
        let x = point.x.clamp(left, right) - left;
        let y = point.y.clamp(top, bottom) - top;
        ToolPoint::new(
            (f64::from(x) * self.scale_ratio) as i32,
            (f64::from(y) * self.scale_ratio) as i32,
        )
    }
}

fn truncate_to_pixels(value: f64) -> u32 {
    (value as u32).max(1)
}

fn centered_offset(outer: u32, inner: u32) -> i32 {
    (f64::from(outer) / 2.0 - f64::from(inner) / 2.0) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_letterboxes_left_and_right_for_narrow_images() {
        let geometry = ViewportGeometry::fit(PixelSize::new(500, 1000), PixelSize::new(1000, 500))
            .expect("geometry should fit");

        assert_eq!(geometry.scaled, PixelSize::new(250, 500));
        assert_eq!(geometry.offset, ToolPoint::new(375, 0));
        assert_eq!(geometry.scale_ratio, 2.0);
    }

    #[test]
    fn fit_letterboxes_top_and_bottom_for_wide_images() {
        let geometry = ViewportGeometry::fit(PixelSize::new(1000, 500), PixelSize::new(800, 800))
            .expect("geometry should fit");

        assert_eq!(geometry.scaled, PixelSize::new(800, 400));
        assert_eq!(geometry.offset, ToolPoint::new(0, 200));
        assert_eq!(geometry.scale_ratio, 1.25);
    }

    #[test]
    fn fit_truncates_scaled_size_and_offset() {
        let geometry = ViewportGeometry::fit(PixelSize::new(3, 1), PixelSize::new(10, 10))
            .expect("geometry should fit");

        assert_eq!(geometry.scaled, PixelSize::new(10, 3));
        assert_eq!(geometry.offset, ToolPoint::new(0, 3));
        assert!((geometry.scale_ratio - 0.3).abs() < 1e-9);
    }

    #[test]
    fn fit_keeps_scale_ratio_positive_for_extreme_aspect() {
        let geometry = ViewportGeometry::fit(PixelSize::new(1, 10_000), PixelSize::new(100, 10))
            .expect("geometry should fit");

        assert_eq!(geometry.scaled.width, 1);
        assert!(geometry.scale_ratio > 0.0);
    }

    #[test]
    fn fit_rejects_zero_sized_viewport() {
        let err = ViewportGeometry::fit(PixelSize::new(10, 10), PixelSize::new(0, 300))
            .expect_err("zero width viewport should fail");
        assert_eq!(
            err,
            GeometryError::InvalidViewport {
                width: 0,
                height: 300
            }
        );

        let err = ViewportGeometry::fit(PixelSize::new(10, 10), PixelSize::new(300, 0))
            .expect_err("zero height viewport should fail");
        assert!(matches!(err, GeometryError::InvalidViewport { .. }));
    }

    #[test]
    fn fit_rejects_empty_image() {
        let err = ViewportGeometry::fit(PixelSize::new(0, 10), PixelSize::new(100, 100))
            .expect_err("empty image should fail");
        assert!(matches!(err, GeometryError::EmptyImage { .. }));
    }

    #[test]
    fn fit_stays_inside_viewport_and_only_offsets_letterboxed_axis() {
        let images = [(1000, 500), (500, 1000), (640, 480), (1, 1), (4000, 3), (7, 9000)];
        let viewports = [(1146, 600), (600, 1146), (1, 1), (333, 777), (800, 800)];

        for (iw, ih) in images {
            for (vw, vh) in viewports {
                let geometry = ViewportGeometry::fit(PixelSize::new(iw, ih), PixelSize::new(vw, vh))
                    .expect("geometry should fit");
                let right = geometry.offset.x + geometry.scaled.width as i32;
                let bottom = geometry.offset.y + geometry.scaled.height as i32;
                assert!(geometry.offset.x >= 0 && geometry.offset.y >= 0);
                assert!(right <= vw as i32, "{iw}x{ih} in {vw}x{vh} overflows width");
                assert!(bottom <= vh as i32, "{iw}x{ih} in {vw}x{vh} overflows height");
                if geometry.frame_ratio > geometry.image_ratio {
                    assert_eq!(geometry.offset.y, 0);
                    assert_eq!(geometry.scaled.height, vh);
                } else {
                    assert_eq!(geometry.offset.x, 0);
                    assert_eq!(geometry.scaled.width, vw);
                }
            }
        }
    }

    #[test]
    fn viewport_to_image_clamps_then_scales() {
        let geometry = ViewportGeometry::fit(PixelSize::new(500, 1000), PixelSize::new(1000, 500))
            .expect("geometry should fit");

        assert_eq!(
            geometry.viewport_to_image(ToolPoint::new(0, 0)),
            ToolPoint::new(0, 0)
        );
        assert_eq!(
            geometry.viewport_to_image(ToolPoint::new(500, 250)),
            ToolPoint::new(250, 500)
        );
        assert_eq!(
            geometry.viewport_to_image(ToolPoint::new(2000, 900)),
            ToolPoint::new(500, 1000)
        );
        assert_eq!(
            geometry.viewport_to_image(ToolPoint::new(-40, -40)),
            ToolPoint::new(0, 0)
        );
    }

    #[test]
    fn viewport_to_image_truncates_fractional_pixels() {
        let geometry = ViewportGeometry::fit(PixelSize::new(3, 1), PixelSize::new(10, 10))
            .expect("geometry should fit");

        assert_eq!(
            geometry.viewport_to_image(ToolPoint::new(5, 5)),
            ToolPoint::new(1, 0)
        );
    }

    #[test]
    fn image_rect_fits_within_checks_all_edges() {
        let size = PixelSize::new(100, 50);
        assert!(ImageRect::new(0, 0, 100, 50).fits_within(size));
        assert!(!ImageRect::new(1, 0, 100, 50).fits_within(size));
        assert!(!ImageRect::new(0, 1, 100, 50).fits_within(size));
        assert!(!ImageRect::new(10, 10, 0, 5).fits_within(size));
    }
}
