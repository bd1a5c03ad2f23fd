use crate::editor::RasterImage;
use crate::geometry::{ImageRect, PixelSize};

use super::mask::dim_outside_selection;

pub const DEFAULT_CROP_RATIO: f64 = 1.0;
pub const CROP_STEP_DIVISOR: u32 = 20;

/// Crop configuration. `ratio` is width over height: above 1 is wider, below 1 is taller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropOptions {
    pub ratio: f64,
    pub step: Option<u32>,
}

impl Default for CropOptions {
    fn default() -> Self {
        Self {
            ratio: DEFAULT_CROP_RATIO,
            step: None,
        }
    }
}

impl CropOptions {
    pub fn new(ratio: Option<f64>, step: Option<u32>) -> Self {
        let ratio = match ratio {
            Some(ratio) if ratio.is_finite() && ratio > 0.0 => ratio,
            Some(ratio) => {
                tracing::warn!(ratio, "ignoring invalid crop ratio; using 1:1");
                DEFAULT_CROP_RATIO
            }
            None => DEFAULT_CROP_RATIO,
        };
        Self {
            ratio,
            step: step.filter(|step| *step > 0),
        }
    }

    pub fn step_for(&self, image_width: u32) -> u32 {
        self.step
            .unwrap_or(image_width / CROP_STEP_DIVISOR)
            .max(1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropAction {
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    Grow,
    Shrink,
}

impl CropAction {
    pub const ALL: [CropAction; 6] = [
        Self::MoveLeft,
        Self::MoveRight,
        Self::MoveUp,
        Self::MoveDown,
        Self::Grow,
        Self::Shrink,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::MoveLeft => "crop-move-left",
            Self::MoveRight => "crop-move-right",
            Self::MoveUp => "crop-move-up",
            Self::MoveDown => "crop-move-down",
            Self::Grow => "crop-grow",
            Self::Shrink => "crop-shrink",
        }
    }
}

fn height_for_width(width: u32, ratio: f64) -> u32 {
    (f64::from(width) / ratio) as u32
}

fn width_for_height(height: u32, ratio: f64) -> u32 {
    (f64::from(height) * ratio) as u32
}

/// Largest centered selection with the given ratio.
///
/// Landscape images start from the full height and are centered horizontally;
/// portrait and square images start from the full width and are centered vertically.
pub fn initial_selection(size: PixelSize, ratio: f64) -> ImageRect {
    let (mut width, mut height) = if size.is_landscape() {
        (width_for_height(size.height, ratio), size.height)
    } else {
        (size.width, height_for_width(size.width, ratio))
    };
    if width > size.width {
        width = size.width;
        height = height_for_width(width, ratio);
    }
    if height > size.height {
        height = size.height;
        width = width_for_height(height, ratio);
    }
    let width = width.clamp(1, size.width.max(1));
    let height = height.clamp(1, size.height.max(1));

    ImageRect::new(
        size.width / 2 - width / 2,
        size.height / 2 - height / 2,
        width,
        height,
    )
}

/// Keyboard-driven crop in progress.
///
/// `original` is the image as it was when the tool started; the dimmed preview
/// is always rebuilt from it so the mask never darkens twice.
#[derive(Debug, Clone, PartialEq)]
pub struct CropSession {
    selection: ImageRect,
    ratio: f64,
    step: u32,
    original: RasterImage,
}

impl CropSession {
    pub fn begin(original: RasterImage, options: CropOptions) -> Self {
        let size = original.size();
        Self {
            selection: initial_selection(size, options.ratio),
            ratio: options.ratio,
            step: options.step_for(size.width),
            original,
        }
    }

    pub const fn selection(&self) -> ImageRect {
        self.selection
    }

    pub const fn step(&self) -> u32 {
        self.step
    }

    pub const fn original(&self) -> &RasterImage {
        &self.original
    }

    /// Applies one adjustment. Returns `false` when the action was rejected or
    /// already at its limit, leaving the selection unchanged.
    pub fn apply(&mut self, action: CropAction) -> bool {
        let before = self.selection;
        let bounds = self.original.size();
        let step = self.step;
        let selection = &mut self.selection;

        match action {
            CropAction::MoveLeft => selection.x = selection.x.saturating_sub(step),
            CropAction::MoveUp => selection.y = selection.y.saturating_sub(step),
            CropAction::MoveRight => {
                selection.x = if selection.right().saturating_add(step) < bounds.width {
                    selection.x + step
                } else {
                    bounds.width - selection.width
                };
            }
            CropAction::MoveDown => {
                selection.y = if selection.bottom().saturating_add(step) < bounds.height {
                    selection.y + step
                } else {
                    bounds.height - selection.height
                };
            }
            CropAction::Grow => {
                let width = selection.width.saturating_add(step);
                let height = height_for_width(width, self.ratio);
                if width >= bounds.width || height >= bounds.height || height == 0 {
                    tracing::debug!(?selection, "crop grow rejected at image bounds");
                    return false;
                }
                selection.width = width;
                selection.height = height;
                selection.x = selection.x.min(bounds.width - width);
                selection.y = selection.y.min(bounds.height - height);
            }
            CropAction::Shrink => {
                let width = selection.width.saturating_sub(step);
                let height = height_for_width(width, self.ratio);
                let floor = step.saturating_mul(2);
                if width <= floor || height <= floor {
                    tracing::debug!(?selection, "crop shrink rejected at minimum size");
                    return false;
                }
                selection.width = width;
                selection.height = height;
            }
        }

        *selection != before
    }

    /// Dimmed preview of the original with the current selection left clear.
    pub fn working_image(&self) -> RasterImage {
        dim_outside_selection(&self.original, self.selection)
    }

    pub fn commit(self) -> RasterImage {
        self.original.cropped(self.selection)
    }

    pub fn into_original(self) -> RasterImage {
        self.original
    }
}
