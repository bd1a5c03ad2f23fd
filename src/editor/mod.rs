//! Open document model, undo history and the destructive image transforms.

mod document;
mod engine;
mod history;
mod raster;
pub mod tools;

pub use document::{Document, DocumentProperties};
pub use engine::TransformEngine;
pub use history::{HistoryError, HistoryStack};
pub use raster::{ColorMode, RasterImage};
pub use tools::{ActiveTool, CropAction, CropOptions, RotateDirection, ToolError, ToolKind};
