use thiserror::Error;

use super::RasterImage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HistoryError {
    #[error("undo history is empty")]
    EmptyHistory,
}

/// Snapshot-based undo stack.
///
/// Without a limit the stack grows by one full image copy per destructive edit
/// for as long as the document stays open. A limit drops the oldest snapshots
/// first, which means `revert_all` can no longer reach the opened pixels.
#[derive(Debug, Clone, Default)]
pub struct HistoryStack {
    snapshots: Vec<RasterImage>,
    limit: Option<usize>,
    truncated: bool,
}

impl HistoryStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            snapshots: Vec::new(),
            limit: limit.map(|limit| limit.max(1)),
            truncated: false,
        }
    }

    pub const fn limit(&self) -> Option<usize> {
        self.limit
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Whether the limit ever dropped a snapshot. Once it has, an empty stack
    /// no longer means the image matches the one that was opened.
    pub const fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Emptied without ever dropping a snapshot, so the bottom of the stack was
    /// the image as opened.
    pub fn is_at_origin(&self) -> bool {
        self.snapshots.is_empty() && !self.is_truncated()
    }

    pub fn push(&mut self, image: &RasterImage) {
        self.snapshots.push(image.clone());
        if let Some(limit) = self.limit {
            let overflow = self.snapshots.len().saturating_sub(limit);
            if overflow > 0 {
                self.snapshots.drain(..overflow);
                self.truncated = true;
                tracing::debug!(limit, dropped = overflow, "undo history limit reached");
            }
        }
    }

    pub fn pop(&mut self) -> Result<RasterImage, HistoryError> {
        self.snapshots.pop().ok_or(HistoryError::EmptyHistory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Luma, GrayImage};

    fn solid(value: u8) -> RasterImage {
        RasterImage::new(
            DynamicImage::ImageLuma8(GrayImage::from_pixel(2, 2, Luma([value]))),
            None,
        )
    }

    #[test]
    fn pop_returns_snapshots_in_lifo_order() {
        let mut history = HistoryStack::new();
        history.push(&solid(1));
        history.push(&solid(2));

        assert_eq!(history.pop(), Ok(solid(2)));
        assert_eq!(history.pop(), Ok(solid(1)));
        assert_eq!(history.pop(), Err(HistoryError::EmptyHistory));
    }

    #[test]
    fn push_stores_an_owned_copy() {
        let mut history = HistoryStack::new();
        let mut live = solid(10);
        history.push(&live);

        live = solid(99);

        assert_ne!(live, solid(10));
        assert_eq!(history.pop(), Ok(solid(10)));
    }

    #[test]
    fn unbounded_history_keeps_every_snapshot() {
        let mut history = HistoryStack::new();
        for value in 0..64 {
            history.push(&solid(value));
        }
        assert_eq!(history.len(), 64);
        assert_eq!(history.limit(), None);
    }

    #[test]
    fn limited_history_drops_oldest_snapshots() {
        let mut history = HistoryStack::with_limit(Some(2));
        history.push(&solid(1));
        history.push(&solid(2));
        history.push(&solid(3));

        assert_eq!(history.len(), 2);
        assert_eq!(history.pop(), Ok(solid(3)));
        assert_eq!(history.pop(), Ok(solid(2)));
        assert!(history.is_empty());
        assert!(history.is_truncated());
        assert!(!history.is_at_origin());
    }

    #[test]
    fn draining_an_untruncated_history_returns_to_origin() {
        let mut history = HistoryStack::with_limit(Some(2));
        history.push(&solid(1));
        history.push(&solid(2));
        assert!(!history.is_at_origin());

        history.pop().expect("two snapshots");
        history.pop().expect("one snapshot");

        assert!(!history.is_truncated());
        assert!(history.is_at_origin());
    }

    #[test]
    fn zero_limit_is_raised_to_one() {
        let history = HistoryStack::with_limit(Some(0));
        assert_eq!(history.limit(), Some(1));
    }
}
