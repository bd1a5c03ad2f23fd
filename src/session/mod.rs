//! Single-document session: routes intents to the engine, storage and display.

mod intent;
mod navigation;
mod prompt;

use std::path::{Path, PathBuf};

use crate::config::{Settings, SettingsStore};
use crate::display::{DisplayAdapter, DisplayFrame};
use crate::editor::{
    CropAction, Document, RotateDirection, ToolError, ToolKind, TransformEngine,
};
use crate::error::{AppError, AppResult};
use crate::geometry::{ToolPoint, ViewportGeometry};
use crate::state::{SessionEvent, SessionState, StateError, StateMachine};
use crate::storage::{output_path, ImageStore, OutputFormat};

pub use intent::{Intent, IntentParseError};
pub use navigation::{FolderListing, NavigationDirection};
pub use prompt::{AboutInfo, BatchPrompt, SessionPrompt};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentOutcome {
    Applied,
    /// Not valid right now; nothing changed.
    Ignored,
    /// Reported to the user through the prompt.
    Failed(String),
}

pub struct Session<S, P, D> {
    store: S,
    prompt: P,
    display: D,
    settings_store: SettingsStore,
    settings: Settings,
    engine: TransformEngine,
    machine: StateMachine,
    document: Option<Document>,
    geometry: Option<ViewportGeometry>,
}

impl<S, P, D> Session<S, P, D>
where
    S: ImageStore,
    P: SessionPrompt,
    D: DisplayAdapter,
{
    pub fn new(store: S, prompt: P, display: D, settings_store: SettingsStore) -> Self {
        let settings = settings_store.load();
        Self {
            store,
            prompt,
            display,
            engine: TransformEngine::new(settings.crop_options()),
            settings_store,
            settings,
            machine: StateMachine::new(),
            document: None,
            geometry: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.machine.state()
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    /// Geometry of the last successful render, used to map pointer input.
    pub fn geometry(&self) -> Option<&ViewportGeometry> {
        self.geometry.as_ref()
    }

    /// Reopens the most recent file when it still exists.
    pub fn start(&mut self) -> IntentOutcome {
        match self.settings.most_recent.clone() {
            Some(path) if self.store.is_file(&path) => self.handle(Intent::Open(Some(path))),
            Some(path) => {
                tracing::info!(path = %path.display(), "most recent file is gone");
                IntentOutcome::Ignored
            }
            None => IntentOutcome::Ignored,
        }
    }

    pub fn handle(&mut self, intent: Intent) -> IntentOutcome {
        let label = intent.label();
        tracing::debug!(intent = label, state = ?self.machine.state(), "handle intent");
        match self.dispatch(intent) {
            Ok(true) => IntentOutcome::Applied,
            Ok(false) => IntentOutcome::Ignored,
            Err(err) if err.is_user_visible() => {
                tracing::warn!(intent = label, %err, "intent failed");
                let message = err.to_string();
                self.prompt.show_error(err.title(), &message);
                IntentOutcome::Failed(message)
            }
            Err(err) => {
                tracing::debug!(intent = label, %err, "intent ignored");
                IntentOutcome::Ignored
            }
        }
    }

    fn dispatch(&mut self, intent: Intent) -> AppResult<bool> {
        match intent {
            Intent::Open(path) => self.open(path),
            Intent::Save => self.save(),
            Intent::SaveAs => self.save_as(),
            Intent::Delete => self.delete(),
            Intent::Next => self.navigate(NavigationDirection::Next),
            Intent::Previous => self.navigate(NavigationDirection::Previous),
            Intent::Undo => self.undo(),
            Intent::Revert => self.revert(),
            Intent::RotateLeft => self.rotate(RotateDirection::Left),
            Intent::RotateRight => self.rotate(RotateDirection::Right),
            Intent::CropActivate => self.start_crop(),
            Intent::Crop(action) => self.adjust_crop(action),
            Intent::CropCommit => self.commit_crop(),
            Intent::CropCancel => self.cancel_crop(),
            Intent::PointerCropActivate => self.begin_pointer_crop(),
            Intent::PointerPress(point) => self.pointer_press(point),
            Intent::PointerRelease(point) => self.pointer_release(point),
            Intent::Tool(tool) => self.use_tool(tool),
            Intent::About => {
                self.prompt.show_about(&AboutInfo::current());
                Ok(true)
            }
        }
    }

    fn open(&mut self, path: Option<PathBuf>) -> AppResult<bool> {
        if !self.machine.can_transition(SessionEvent::OpenDocument) {
            return Err(self.unavailable("open"));
        }
        let path = match path.filter(|path| !path.as_os_str().is_empty()) {
            Some(path) => path,
            None => match self.prompt.ask_open_path(&self.settings.default_folder) {
                Some(path) => path,
                None => return Ok(false),
            },
        };
        if !self.store.is_file(&path) {
            tracing::info!(path = %path.display(), "not a file; open skipped");
            return Ok(false);
        }

        let image = self.store.load(&path)?;
        self.remember_location(&path);
        self.document = Some(Document::open(path, image, self.settings.history_limit));
        self.machine.transition(SessionEvent::OpenDocument)?;
        self.render();
        Ok(true)
    }

    fn save(&mut self) -> AppResult<bool> {
        self.require_document("save")?;
        let document = self.document.as_mut().ok_or(AppError::NoDocumentOpen)?;
        if !document.is_dirty() {
            return Ok(false);
        }
        let (target, format) = output_path(document.path(), self.settings.convert_all_to())?;
        self.store.save(document.image(), &target, format)?;
        document.mark_clean();
        Ok(true)
    }

    fn save_as(&mut self) -> AppResult<bool> {
        self.require_document("save-as")?;
        let Some(target) = self.prompt.ask_save_path(&self.settings.default_folder) else {
            return Ok(false);
        };
        let format = OutputFormat::for_path(&target)?;
        let document = self.document.as_mut().ok_or(AppError::NoDocumentOpen)?;
        self.store.save(document.image(), &target, format)?;
        document.set_path(target.clone());
        document.mark_clean();
        self.remember_location(&target);
        self.render();
        Ok(true)
    }

    fn delete(&mut self) -> AppResult<bool> {
        self.require_document("delete")?;
        let document = self.document.as_ref().ok_or(AppError::NoDocumentOpen)?;
        if !self.prompt.confirm_delete(&document.file_name()) {
            return Ok(false);
        }
        self.store.remove(document.path())?;

        self.settings.most_recent = None;
        self.persist_settings();
        self.document = None;
        self.geometry = None;
        self.machine.transition(SessionEvent::CloseDocument)?;
        self.display.clear();
        Ok(true)
    }

    fn navigate(&mut self, direction: NavigationDirection) -> AppResult<bool> {
        if self.machine.state().is_cropping() {
            return Err(self.unavailable("navigate"));
        }
        let unsaved = self
            .document
            .as_ref()
            .filter(|document| document.is_dirty())
            .map(Document::file_name);
        if let Some(file_name) = unsaved {
            if self.prompt.confirm_save_changes(&file_name) {
                self.save()?;
            }
        }

        let folder = self.settings.default_folder.clone();
        let listing = FolderListing::new(folder.clone(), self.store.list_images(&folder)?);
        let current = self
            .document
            .as_ref()
            .map(Document::file_name)
            .unwrap_or_default();
        match listing.neighbor(&current, direction) {
            Some(name) => {
                tracing::info!(file = name, ?direction, "navigating");
                let path = listing.path_of(name);
                self.open(Some(path))
            }
            None => self.open(None),
        }
    }

    fn undo(&mut self) -> AppResult<bool> {
        self.machine.require_viewing("undo")?;
        let document = self.document.as_mut().ok_or(AppError::NoDocumentOpen)?;
        document.undo()?;
        self.render();
        Ok(true)
    }

    fn revert(&mut self) -> AppResult<bool> {
        self.machine.require_viewing("revert")?;
        let document = self.document.as_mut().ok_or(AppError::NoDocumentOpen)?;
        let steps = document.revert_all();
        tracing::debug!(steps, "reverted to opened image");
        if steps == 0 {
            return Ok(false);
        }
        self.render();
        Ok(true)
    }

    fn rotate(&mut self, direction: RotateDirection) -> AppResult<bool> {
        self.machine.require_viewing("rotate")?;
        let document = self.document.as_mut().ok_or(AppError::NoDocumentOpen)?;
        self.engine.rotate(document, direction)?;
        self.render();
        Ok(true)
    }

    fn start_crop(&mut self) -> AppResult<bool> {
        self.machine.require_viewing("crop")?;
        let document = self.document.as_mut().ok_or(AppError::NoDocumentOpen)?;
        self.engine.start_crop(document)?;
        self.machine.transition(SessionEvent::StartCrop)?;
        self.render();
        Ok(true)
    }

    fn adjust_crop(&mut self, action: CropAction) -> AppResult<bool> {
        self.require_cropping(action.label())?;
        let document = self.document.as_mut().ok_or(AppError::NoDocumentOpen)?;
        let changed = self.engine.adjust_crop(document, action)?;
        if changed {
            self.render();
        }
        Ok(changed)
    }

    fn commit_crop(&mut self) -> AppResult<bool> {
        self.require_cropping("crop-commit")?;
        let document = self.document.as_mut().ok_or(AppError::NoDocumentOpen)?;
        self.engine.commit_crop(document)?;
        self.machine.transition(SessionEvent::FinishCrop)?;
        self.render();
        Ok(true)
    }

    fn cancel_crop(&mut self) -> AppResult<bool> {
        if !self.machine.state().is_cropping() {
            return Ok(false);
        }
        let document = self.document.as_mut().ok_or(AppError::NoDocumentOpen)?;
        self.engine.cancel_crop(document)?;
        self.machine.transition(SessionEvent::FinishCrop)?;
        self.render();
        Ok(true)
    }

    fn begin_pointer_crop(&mut self) -> AppResult<bool> {
        self.machine.require_viewing("pointer-crop")?;
        let document = self.document.as_mut().ok_or(AppError::NoDocumentOpen)?;
        self.engine.begin_pointer_crop(document)?;
        self.machine.transition(SessionEvent::StartPointerCrop)?;
        Ok(true)
    }

    fn pointer_press(&mut self, point: ToolPoint) -> AppResult<bool> {
        self.require_pointer_cropping("pointer-press")?;
        let Some(geometry) = self.geometry else {
            return Ok(false);
        };
        let document = self.document.as_mut().ok_or(AppError::NoDocumentOpen)?;
        self.engine.pointer_press(document, &geometry, point)?;
        self.render();
        Ok(true)
    }

    fn pointer_release(&mut self, point: ToolPoint) -> AppResult<bool> {
        self.require_pointer_cropping("pointer-release")?;
        let Some(geometry) = self.geometry else {
            return Ok(false);
        };
        let document = self.document.as_mut().ok_or(AppError::NoDocumentOpen)?;
        let selection = self.engine.pointer_release(document, &geometry, point)?;
        self.machine.transition(SessionEvent::FinishCrop)?;
        self.render();
        Ok(selection.is_some())
    }

    fn use_tool(&mut self, tool: ToolKind) -> AppResult<bool> {
        match tool {
            ToolKind::Crop => self.start_crop(),
            ToolKind::RotateLeft => self.rotate(RotateDirection::Left),
            ToolKind::RotateRight => self.rotate(RotateDirection::Right),
            planned => Err(ToolError::NotImplemented {
                tool: planned.label(),
            }
            .into()),
        }
    }

    fn require_document(&self, action: &'static str) -> AppResult<()> {
        match self.machine.state() {
            SessionState::Empty => Err(AppError::NoDocumentOpen),
            SessionState::Viewing => Ok(()),
            SessionState::Cropping | SessionState::PointerCropping => {
                Err(self.unavailable(action))
            }
        }
    }

    fn require_cropping(&self, action: &'static str) -> AppResult<()> {
        if self.machine.state() == SessionState::Cropping {
            Ok(())
        } else {
            Err(self.unavailable(action))
        }
    }

    fn require_pointer_cropping(&self, action: &'static str) -> AppResult<()> {
        if self.machine.state() == SessionState::PointerCropping {
            Ok(())
        } else {
            Err(self.unavailable(action))
        }
    }

    fn unavailable(&self, action: &'static str) -> AppError {
        StateError::ActionUnavailable {
            state: self.machine.state(),
            action,
        }
        .into()
    }

    fn remember_location(&mut self, path: &Path) {
        if let Some(folder) = path.parent().filter(|folder| !folder.as_os_str().is_empty()) {
            self.settings.default_folder = folder.to_path_buf();
        }
        self.settings.most_recent = Some(path.to_path_buf());
        self.persist_settings();
    }

    fn persist_settings(&self) {
        if let Err(err) = self.settings_store.save(&self.settings) {
            tracing::warn!(%err, "failed to persist settings");
        }
    }

    /// Recomputes the fit against the current viewport and presents the image.
    fn render(&mut self) {
        let Some(document) = self.document.as_ref() else {
            self.geometry = None;
            self.display.clear();
            return;
        };
        match ViewportGeometry::fit(document.image().size(), self.display.viewport_size()) {
            Ok(geometry) => {
                let properties = document.properties();
                self.display.present(DisplayFrame {
                    image: document.image(),
                    geometry,
                    properties: &properties,
                });
                self.geometry = Some(geometry);
            }
            Err(err) => {
                tracing::debug!(%err, "render skipped");
                self.geometry = None;
            }
        }
    }
}
