use crate::geometry::{ImageRect, ToolPoint, ViewportGeometry};

use super::document::Document;
use super::tools::{
    ActiveTool, CropAction, CropOptions, CropSession, PointerCropSession, RotateDirection,
    ToolError,
};

/// Destructive edits on a borrowed [`Document`].
///
/// Every edit snapshots before it mutates, so one undo reverses it. The engine
/// holds no image state of its own; crop progress lives in the document's tool.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TransformEngine {
    crop_options: CropOptions,
}

impl TransformEngine {
    pub const fn new(crop_options: CropOptions) -> Self {
        Self { crop_options }
    }

    pub const fn crop_options(&self) -> CropOptions {
        self.crop_options
    }

    pub fn rotate(&self, document: &mut Document, direction: RotateDirection) -> Result<(), ToolError> {
        ensure_idle(document)?;
        document.snapshot();
        let rotated = document.image().rotated(direction);
        document.replace_image(rotated);
        document.mark_dirty();
        tracing::debug!(direction = direction.label(), size = ?document.image().size(), "rotated image");
        Ok(())
    }

    pub fn start_crop(&self, document: &mut Document) -> Result<ImageRect, ToolError> {
        ensure_idle(document)?;
        document.snapshot();
        document.mark_dirty();
        let session = CropSession::begin(document.image().clone(), self.crop_options);
        let selection = session.selection();
        document.replace_image(session.working_image());
        document.set_tool(ActiveTool::Crop(session));
        tracing::debug!(?selection, ratio = self.crop_options.ratio, "crop started");
        Ok(selection)
    }

    /// Returns whether the selection moved or resized.
    pub fn adjust_crop(&self, document: &mut Document, action: CropAction) -> Result<bool, ToolError> {
        let ActiveTool::Crop(session) = document.tool_mut() else {
            return Err(ToolError::CropNotActive);
        };
        if !session.apply(action) {
            return Ok(false);
        }
        let working = session.working_image();
        document.replace_image(working);
        Ok(true)
    }

    pub fn commit_crop(&self, document: &mut Document) -> Result<ImageRect, ToolError> {
        let session = match document.take_tool() {
            ActiveTool::Crop(session) => session,
            other => {
                document.set_tool(other);
                return Err(ToolError::CropNotActive);
            }
        };
        let selection = session.selection();
        document.replace_image(session.commit());
        tracing::debug!(?selection, "crop committed");
        Ok(selection)
    }

    /// Puts back the pristine image and drops the snapshot taken when the crop began.
    pub fn cancel_crop(&self, document: &mut Document) -> Result<(), ToolError> {
        match document.take_tool() {
            ActiveTool::Crop(session) => {
                document.replace_image(session.into_original());
                discard_crop_snapshot(document);
            }
            ActiveTool::PointerCrop(session) => {
                if let Some(original) = session.into_original() {
                    document.replace_image(original);
                    discard_crop_snapshot(document);
                }
            }
            ActiveTool::Idle => return Err(ToolError::CropNotActive),
        }
        tracing::debug!("crop cancelled");
        Ok(())
    }

    /// Arms the two-corner pointer crop; nothing changes until the first press.
    pub fn begin_pointer_crop(&self, document: &mut Document) -> Result<(), ToolError> {
        ensure_idle(document)?;
        document.set_tool(ActiveTool::PointerCrop(PointerCropSession::new(
            self.crop_options.ratio,
        )));
        Ok(())
    }

    /// Anchors the first corner from a viewport position. Returns it in image space.
    pub fn pointer_press(
        &self,
        document: &mut Document,
        geometry: &ViewportGeometry,
        point: ToolPoint,
    ) -> Result<ToolPoint, ToolError> {
        match document.tool() {
            ActiveTool::PointerCrop(session) if session.is_anchored() => {
                return Err(ToolError::AlreadyAnchored)
            }
            ActiveTool::PointerCrop(_) => {}
            _ => return Err(ToolError::CropNotActive),
        }

        let anchor = geometry.viewport_to_image(point);
        let original = document.image().clone();
        let ActiveTool::PointerCrop(session) = document.tool_mut() else {
            return Err(ToolError::CropNotActive);
        };
        let preview = session.press(anchor, original)?;
        let anchor = session.anchor().unwrap_or(anchor);
        document.snapshot();
        document.mark_dirty();
        document.replace_image(preview);
        tracing::debug!(?point, ?anchor, "pointer crop anchored");
        Ok(anchor)
    }

    /// Closes the pointer crop. An empty selection is undone and reported as `None`.
    pub fn pointer_release(
        &self,
        document: &mut Document,
        geometry: &ViewportGeometry,
        point: ToolPoint,
    ) -> Result<Option<ImageRect>, ToolError> {
        let session = match document.take_tool() {
            ActiveTool::PointerCrop(session) if session.is_anchored() => session,
            ActiveTool::PointerCrop(session) => {
                document.set_tool(ActiveTool::PointerCrop(session));
                return Err(ToolError::MissingAnchor);
            }
            other => {
                document.set_tool(other);
                return Err(ToolError::CropNotActive);
            }
        };

        let end = geometry.viewport_to_image(point);
        match session.release(end)? {
            Some((selection, cropped)) => {
                document.replace_image(cropped);
                tracing::debug!(?selection, "pointer crop committed");
                Ok(Some(selection))
            }
            None => {
                tracing::debug!(?end, "zero area selected; aborting pointer crop");
                if let Err(err) = document.undo() {
                    tracing::debug!(%err, "nothing to undo after pointer crop");
                }
                Ok(None)
            }
        }
    }
}

fn ensure_idle(document: &Document) -> Result<(), ToolError> {
    match document.tool() {
        ActiveTool::Idle => Ok(()),
        active => Err(ToolError::ToolBusy {
            active: active.label(),
        }),
    }
}

fn discard_crop_snapshot(document: &mut Document) {
    if let Err(err) = document.discard_snapshot() {
        tracing::debug!(%err, "crop began without a snapshot");
    }
}
