use std::path::{Path, PathBuf};

use super::history::{HistoryError, HistoryStack};
use super::raster::{ColorMode, RasterImage};
use super::tools::ActiveTool;

/// Descriptive fields shown next to the image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentProperties {
    pub file_name: String,
    pub width: u32,
    pub height: u32,
    pub mode: ColorMode,
}

/// The one open image plus its undo history and active tool.
#[derive(Debug, Clone)]
pub struct Document {
    path: PathBuf,
    image: RasterImage,
    dirty: bool,
    history: HistoryStack,
    tool: ActiveTool,
}

impl Document {
    pub fn open(path: PathBuf, image: RasterImage, history_limit: Option<usize>) -> Self {
        Self {
            path,
            image,
            dirty: false,
            history: HistoryStack::with_limit(history_limit),
            tool: ActiveTool::Idle,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn set_path(&mut self, path: PathBuf) {
        self.path = path;
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub const fn image(&self) -> &RasterImage {
        &self.image
    }

    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    pub const fn history(&self) -> &HistoryStack {
        &self.history
    }

    pub const fn tool(&self) -> &ActiveTool {
        &self.tool
    }

    pub fn tool_mut(&mut self) -> &mut ActiveTool {
        &mut self.tool
    }

    pub fn set_tool(&mut self, tool: ActiveTool) {
        self.tool = tool;
    }

    pub fn take_tool(&mut self) -> ActiveTool {
        std::mem::take(&mut self.tool)
    }

    pub fn replace_image(&mut self, image: RasterImage) {
        self.image = image;
    }

    /// Pushes a deep copy of the current image onto the undo history.
    pub fn snapshot(&mut self) {
        self.history.push(&self.image);
    }

    /// Restores the newest snapshot. Dirty clears only once history is back at
    /// the opened image; a history that dropped snapshots never gets there.
    pub fn undo(&mut self) -> Result<(), HistoryError> {
        let previous = self.history.pop()?;
        self.image = previous;
        if self.history.is_at_origin() {
            self.dirty = false;
        }
        Ok(())
    }

    /// Drops the newest snapshot without installing it.
    pub fn discard_snapshot(&mut self) -> Result<(), HistoryError> {
        self.history.pop()?;
        if self.history.is_at_origin() {
            self.dirty = false;
        }
        Ok(())
    }

    /// Undoes until the history is exhausted; returns how many steps ran.
    pub fn revert_all(&mut self) -> usize {
        let mut steps = 0;
        while self.undo().is_ok() {
            steps += 1;
        }
        steps
    }

    pub fn properties(&self) -> DocumentProperties {
        DocumentProperties {
            file_name: self.file_name(),
            width: self.image.width(),
            height: self.image.height(),
            mode: self.image.color_mode(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, GrayImage, Luma};

    fn solid(width: u32, height: u32, value: u8) -> RasterImage {
        RasterImage::new(
            DynamicImage::ImageLuma8(GrayImage::from_pixel(width, height, Luma([value]))),
            None,
        )
    }

    fn document() -> Document {
        Document::open(PathBuf::from("/pictures/cat.png"), solid(4, 2, 10), None)
    }

    #[test]
    fn open_starts_clean_with_empty_history() {
        let document = document();
        assert!(!document.is_dirty());
        assert!(document.history().is_empty());
        assert!(document.tool().is_idle());
        assert_eq!(document.file_name(), "cat.png");
    }

    #[test]
    fn undo_restores_snapshot_and_clears_dirty_when_history_empties() {
        let mut document = document();
        document.snapshot();
        document.replace_image(solid(2, 4, 20));
        document.mark_dirty();
        document.snapshot();
        document.replace_image(solid(2, 2, 30));

        assert_eq!(document.undo(), Ok(()));
        assert_eq!(document.image(), &solid(2, 4, 20));
        assert!(document.is_dirty());

        assert_eq!(document.undo(), Ok(()));
        assert_eq!(document.image(), &solid(4, 2, 10));
        assert!(!document.is_dirty());
    }

    #[test]
    fn undo_on_empty_history_leaves_document_unchanged() {
        let mut document = document();
        assert_eq!(document.undo(), Err(HistoryError::EmptyHistory));
        assert_eq!(document.image(), &solid(4, 2, 10));
        assert!(!document.is_dirty());
    }

    #[test]
    fn revert_all_returns_to_opened_pixels() {
        let mut document = document();
        for value in [11, 12, 13] {
            document.snapshot();
            document.replace_image(solid(3, 3, value));
            document.mark_dirty();
        }

        assert_eq!(document.revert_all(), 3);
        assert_eq!(document.image(), &solid(4, 2, 10));
        assert!(!document.is_dirty());
        assert_eq!(document.revert_all(), 0);
    }

    #[test]
    fn undo_past_a_dropped_snapshot_stays_dirty() {
        let mut document = Document::open(PathBuf::from("cat.png"), solid(4, 2, 10), Some(1));
        for value in [11, 12] {
            document.snapshot();
            document.replace_image(solid(3, 3, value));
            document.mark_dirty();
        }

        assert_eq!(document.undo(), Ok(()));
        assert_eq!(document.image(), &solid(3, 3, 11));
        assert!(document.history().is_empty());
        assert!(document.is_dirty());
        assert_eq!(document.undo(), Err(HistoryError::EmptyHistory));
        assert!(document.is_dirty());
    }

    #[test]
    fn discard_snapshot_keeps_current_image() {
        let mut document = document();
        document.snapshot();
        document.mark_dirty();

        assert_eq!(document.discard_snapshot(), Ok(()));
        assert_eq!(document.image(), &solid(4, 2, 10));
        assert!(!document.is_dirty());
    }

    #[test]
    fn properties_describe_current_image() {
        let mut document = document();
        document.replace_image(solid(7, 5, 0));

        let properties = document.properties();
        assert_eq!(properties.file_name, "cat.png");
        assert_eq!((properties.width, properties.height), (7, 5));
        assert_eq!(properties.mode, ColorMode::Luma);
    }
}
