use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use crate::editor::{CropAction, ToolKind};
use crate::geometry::ToolPoint;

/// One discrete user request. Every input source funnels into this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Open a file; `None` asks the prompt for a path.
    Open(Option<PathBuf>),
    Save,
    SaveAs,
    Delete,
    Next,
    Previous,
    Undo,
    Revert,
    RotateLeft,
    RotateRight,
    CropActivate,
    Crop(CropAction),
    CropCommit,
    CropCancel,
    PointerCropActivate,
    /// Viewport coordinates.
    PointerPress(ToolPoint),
    /// Viewport coordinates.
    PointerRelease(ToolPoint),
    Tool(ToolKind),
    About,
}

impl Intent {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Open(_) => "open",
            Self::Save => "save",
            Self::SaveAs => "save-as",
            Self::Delete => "delete",
            Self::Next => "next",
            Self::Previous => "previous",
            Self::Undo => "undo",
            Self::Revert => "revert",
            Self::RotateLeft => "rotate-left",
            Self::RotateRight => "rotate-right",
            Self::CropActivate => "crop-activate",
            Self::Crop(action) => action.label(),
            Self::CropCommit => "crop-commit",
            Self::CropCancel => "crop-cancel",
            Self::PointerCropActivate => "pointer-crop",
            Self::PointerPress(_) => "pointer-press",
            Self::PointerRelease(_) => "pointer-release",
            Self::Tool(tool) => tool.label(),
            Self::About => "about",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntentParseError {
    #[error("unknown intent `{0}`")]
    Unknown(String),
    #[error("intent `{name}` expects {expected}, got `{value}`")]
    InvalidArgument {
        name: String,
        expected: &'static str,
        value: String,
    },
}

impl FromStr for Intent {
    type Err = IntentParseError;

    /// Parses `name` or `name=value`, e.g. `crop-grow`, `open=photo.jpg`,
    /// `pointer-press=120,40` or `tool=pen`.
    fn from_str(s: &str) -> Result<Self, IntentParseError> {
        let (name, value) = match s.split_once('=') {
            Some((name, value)) => (name.trim(), Some(value.trim())),
            None => (s.trim(), None),
        };

        let intent = match (name, value) {
            ("open", None) => Self::Open(None),
            ("open", Some(path)) => Self::Open((!path.is_empty()).then(|| PathBuf::from(path))),
            ("save", None) => Self::Save,
            ("save-as", None) => Self::SaveAs,
            ("delete", None) => Self::Delete,
            ("next", None) => Self::Next,
            ("previous", None) => Self::Previous,
            ("undo", None) => Self::Undo,
            ("revert", None) => Self::Revert,
            ("rotate-left", None) => Self::RotateLeft,
            ("rotate-right", None) => Self::RotateRight,
            ("crop" | "crop-activate", None) => Self::CropActivate,
            ("crop-commit", None) => Self::CropCommit,
            ("crop-cancel", None) => Self::CropCancel,
            ("pointer-crop", None) => Self::PointerCropActivate,
            ("pointer-press", Some(point)) => Self::PointerPress(parse_point(name, point)?),
            ("pointer-release", Some(point)) => Self::PointerRelease(parse_point(name, point)?),
            ("tool", Some(tool)) => Self::Tool(ToolKind::from_label(tool).ok_or_else(|| {
                IntentParseError::InvalidArgument {
                    name: name.to_string(),
                    expected: "a tool name",
                    value: tool.to_string(),
                }
            })?),
            ("about", None) => Self::About,
            (name, None) => CropAction::ALL
                .into_iter()
                .find(|action| action.label() == name)
                .map(Self::Crop)
                .ok_or_else(|| IntentParseError::Unknown(s.to_string()))?,
            _ => return Err(IntentParseError::Unknown(s.to_string())),
        };
        Ok(intent)
    }
}

fn parse_point(name: &str, value: &str) -> Result<ToolPoint, IntentParseError> {
    let invalid = || IntentParseError::InvalidArgument {
        name: name.to_string(),
        expected: "X,Y",
        value: value.to_string(),
    };
    let (x, y) = value.split_once(',').ok_or_else(invalid)?;
    let x = x.trim().parse().map_err(|_| invalid())?;
    let y = y.trim().parse().map_err(|_| invalid())?;
    Ok(ToolPoint::new(x, y))
}
