use std::path::{Path, PathBuf};

/// Product details handed to the about dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AboutInfo {
    pub name: &'static str,
    pub tagline: &'static str,
    pub version: &'static str,
}

impl AboutInfo {
    pub const fn current() -> Self {
        Self {
            name: "lightedit",
            tagline: "Quick and simple image edits without a full photo suite.",
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

/// User-facing questions and notices raised while handling an intent.
pub trait SessionPrompt {
    /// `None` cancels the open.
    fn ask_open_path(&mut self, initial_folder: &Path) -> Option<PathBuf>;
    /// `None` cancels the save.
    fn ask_save_path(&mut self, initial_folder: &Path) -> Option<PathBuf>;
    fn confirm_save_changes(&mut self, file_name: &str) -> bool;
    fn confirm_delete(&mut self, file_name: &str) -> bool;
    fn show_error(&mut self, title: &str, message: &str);
    fn show_about(&mut self, about: &AboutInfo);
}

/// Non-interactive answers for scripted runs.
#[derive(Debug, Clone, Default)]
pub struct BatchPrompt {
    assume_yes: bool,
    save_as: Option<PathBuf>,
}

impl BatchPrompt {
    pub fn new(assume_yes: bool, save_as: Option<PathBuf>) -> Self {
        Self {
            assume_yes,
            save_as,
        }
    }
}

impl SessionPrompt for BatchPrompt {
    fn ask_open_path(&mut self, initial_folder: &Path) -> Option<PathBuf> {
        tracing::info!(folder = %initial_folder.display(), "no file picker in batch mode; open cancelled");
        None
    }

    fn ask_save_path(&mut self, _initial_folder: &Path) -> Option<PathBuf> {
        self.save_as.clone()
    }

    fn confirm_save_changes(&mut self, file_name: &str) -> bool {
        tracing::info!(file_name, answer = self.assume_yes, "save changes?");
        self.assume_yes
    }

    fn confirm_delete(&mut self, file_name: &str) -> bool {
        tracing::info!(file_name, answer = self.assume_yes, "delete file?");
        self.assume_yes
    }

    fn show_error(&mut self, title: &str, message: &str) {
        tracing::error!(title, "{message}");
    }

    fn show_about(&mut self, about: &AboutInfo) {
        tracing::info!(version = about.version, "{}: {}", about.name, about.tagline);
    }
}
