use crate::editor::RasterImage;
use crate::geometry::{ImageRect, PixelSize, ToolPoint};

use super::mask::dim_outside_selection;
use super::ToolError;

/// Two-corner crop driven by pointer press and release.
///
/// Corners arrive already mapped to image space. The press stores the pristine
/// image; the release either crops it or reports an empty selection.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerCropSession {
    ratio: f64,
    anchor: Option<ToolPoint>,
    original: Option<RasterImage>,
}

impl PointerCropSession {
    pub const fn new(ratio: f64) -> Self {
        Self {
            ratio,
            anchor: None,
            original: None,
        }
    }

    pub const fn anchor(&self) -> Option<ToolPoint> {
        self.anchor
    }

    pub const fn is_anchored(&self) -> bool {
        self.anchor.is_some()
    }

    /// Anchors the first corner and returns the preview with everything above
    /// and left of it dimmed.
    pub fn press(&mut self, anchor: ToolPoint, original: RasterImage) -> Result<RasterImage, ToolError> {
        if self.anchor.is_some() {
            return Err(ToolError::AlreadyAnchored);
        }
        let size = original.size();
        let x = clamp_to_axis(anchor.x, size.width);
        let y = clamp_to_axis(anchor.y, size.height);
        let preview = dim_outside_selection(
            &original,
            ImageRect::new(x, y, size.width - x, size.height - y),
        );
        self.anchor = Some(ToolPoint::new(x as i32, y as i32));
        self.original = Some(original);
        Ok(preview)
    }

    /// Closes the selection at `end`. `Ok(None)` means the selection had no area.
    pub fn release(self, end: ToolPoint) -> Result<Option<(ImageRect, RasterImage)>, ToolError> {
        let (Some(anchor), Some(original)) = (self.anchor, self.original) else {
            return Err(ToolError::MissingAnchor);
        };
        Ok(pointer_selection(anchor, end, self.ratio, original.size())
            .map(|selection| (selection, original.cropped(selection))))
    }

    /// Gives back the pristine image when the crop is abandoned mid-drag.
    pub fn into_original(self) -> Option<RasterImage> {
        self.original
    }
}

/// Selection spanned by two corners with the shorter side extended to `ratio`.
///
/// Returns `None` when the drag went up or left of the anchor or collapsed to
/// zero area. The rectangle is trimmed to the image, keeping the ratio.
pub fn pointer_selection(
    start: ToolPoint,
    end: ToolPoint,
    ratio: f64,
    bounds: PixelSize,
) -> Option<ImageRect> {
    let mut width = i64::from(end.x) - i64::from(start.x);
    let mut height = i64::from(end.y) - i64::from(start.y);
    if width > height {
        height = (width as f64 / ratio) as i64;
    } else {
        width = (height as f64 * ratio) as i64;
    }
    if width <= 0 || height <= 0 {
        return None;
    }

    let x = u32::try_from(start.x).ok()?;
    let y = u32::try_from(start.y).ok()?;
    let available_width = i64::from(bounds.width.checked_sub(x)?);
    let available_height = i64::from(bounds.height.checked_sub(y)?);
    if width > available_width {
        width = available_width;
        height = (width as f64 / ratio) as i64;
    }
    if height > available_height {
        height = available_height;
        width = (height as f64 * ratio) as i64;
    }

    let selection = ImageRect::new(
        x,
        y,
        u32::try_from(width).ok()?,
        u32::try_from(height).ok()?,
    );
    selection.fits_within(bounds).then_some(selection)
}

fn clamp_to_axis(value: i32, extent: u32) -> u32 {
    u32::try_from(value).unwrap_or(0).min(extent)
}
