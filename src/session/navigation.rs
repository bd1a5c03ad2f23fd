use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDirection {
    Next,
    Previous,
}

/// Supported image files of one folder in sorted order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderListing {
    folder: PathBuf,
    entries: Vec<String>,
}

impl FolderListing {
    pub fn new(folder: PathBuf, mut entries: Vec<String>) -> Self {
        entries.sort();
        Self { folder, entries }
    }

    /// Neighbor of `name`, wrapping at both ends. `None` when `name` is not listed.
    pub fn neighbor(&self, name: &str, direction: NavigationDirection) -> Option<&str> {
        let index = self.entries.iter().position(|entry| entry == name)?;
        let len = self.entries.len();
        let target = match direction {
            NavigationDirection::Next => (index + 1) % len,
            NavigationDirection::Previous => (index + len - 1) % len,
        };
        self.entries.get(target).map(String::as_str)
    }

    pub fn path_of(&self, name: &str) -> PathBuf {
        self.folder.join(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing() -> FolderListing {
        FolderListing::new(
            PathBuf::from("/photos"),
            vec!["b.png".to_string(), "a.jpg".to_string(), "c.jpg".to_string()],
        )
    }

    #[test]
    fn entries_are_sorted() {
        let listing = listing();
        assert_eq!(listing.neighbor("a.jpg", NavigationDirection::Next), Some("b.png"));
        assert_eq!(listing.neighbor("b.png", NavigationDirection::Next), Some("c.jpg"));
    }

    #[test]
    fn neighbor_wraps_in_both_directions() {
        let listing = listing();
        assert_eq!(listing.neighbor("a.jpg", NavigationDirection::Next), Some("b.png"));
        assert_eq!(
            listing.neighbor("a.jpg", NavigationDirection::Previous),
            Some("c.jpg")
        );
        assert_eq!(listing.neighbor("c.jpg", NavigationDirection::Next), Some("a.jpg"));
    }

    #[test]
    fn neighbor_of_single_entry_is_itself() {
        let listing = FolderListing::new(PathBuf::from("/photos"), vec!["only.png".to_string()]);
        assert_eq!(
            listing.neighbor("only.png", NavigationDirection::Previous),
            Some("only.png")
        );
    }

    #[test]
    fn neighbor_of_unlisted_file_is_none() {
        assert_eq!(listing().neighbor("z.png", NavigationDirection::Next), None);
        let empty = FolderListing::new(PathBuf::from("/photos"), Vec::new());
        assert_eq!(empty.neighbor("a.jpg", NavigationDirection::Next), None);
    }

    #[test]
    fn path_of_joins_folder() {
        assert_eq!(listing().path_of("b.png"), PathBuf::from("/photos/b.png"));
    }
}
