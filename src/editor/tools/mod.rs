mod crop;
mod mask;
mod pointer;
mod rotate;

use thiserror::Error;

pub use crop::{
    initial_selection, CropAction, CropOptions, CropSession, CROP_STEP_DIVISOR,
    DEFAULT_CROP_RATIO,
};
pub use mask::{dim_outside_selection, mask_bands, CROP_MASK_COLOR};
pub use pointer::{pointer_selection, PointerCropSession};
pub use rotate::RotateDirection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    Crop,
    RotateLeft,
    RotateRight,
    Resize,
    Text,
    Pen,
    Line,
    Rectangle,
    Ellipse,
    Erase,
    Foreground,
    Background,
}

impl ToolKind {
    pub const ALL: [ToolKind; 12] = [
        Self::Crop,
        Self::RotateLeft,
        Self::RotateRight,
        Self::Resize,
        Self::Text,
        Self::Pen,
        Self::Line,
        Self::Rectangle,
        Self::Ellipse,
        Self::Erase,
        Self::Foreground,
        Self::Background,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Crop => "crop",
            Self::RotateLeft => "rotate-left",
            Self::RotateRight => "rotate-right",
            Self::Resize => "resize",
            Self::Text => "text",
            Self::Pen => "pen",
            Self::Line => "line",
            Self::Rectangle => "rectangle",
            Self::Ellipse => "ellipse",
            Self::Erase => "erase",
            Self::Foreground => "foreground",
            Self::Background => "background",
        }
    }

    pub const fn is_implemented(self) -> bool {
        matches!(self, Self::Crop | Self::RotateLeft | Self::RotateRight)
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.label() == label)
    }
}

/// Transient state of whichever tool currently owns the document.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ActiveTool {
    #[default]
    Idle,
    Crop(CropSession),
    PointerCrop(PointerCropSession),
}

impl ActiveTool {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Crop(_) => "crop",
            Self::PointerCrop(_) => "pointer crop",
        }
    }

    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
    #[error("{active} tool is still active")]
    ToolBusy { active: &'static str },
    #[error("crop tool is not active")]
    CropNotActive,
    #[error("pointer crop has no anchor point yet")]
    MissingAnchor,
    #[error("pointer crop is already anchored")]
    AlreadyAnchored,
    #[error("{tool} is not yet implemented")]
    NotImplemented { tool: &'static str },
}
