use crate::config::SettingsError;
use crate::editor::{HistoryError, ToolError};
use crate::geometry::GeometryError;
use crate::state::StateError;
use crate::storage::StorageError;
use thiserror::Error;

pub type AppResult<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    State(#[from] StateError),
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error(transparent)]
    Tool(#[from] ToolError),
    #[error(transparent)]
    History(#[from] HistoryError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("no file is open")]
    NoDocumentOpen,
}

impl AppError {
    /// Errors the user is told about. Everything else is an ignored intent.
    pub fn is_user_visible(&self) -> bool {
        match self {
            Self::Storage(_) | Self::NoDocumentOpen => true,
            Self::Tool(ToolError::NotImplemented { .. }) => true,
            _ => false,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Storage(StorageError::Open { .. } | StorageError::Decode { .. }) => {
                "Unable to open"
            }
            Self::Storage(StorageError::Remove { .. }) => "Unable to delete",
            Self::Storage(StorageError::ReadDir { .. }) => "Unable to list folder",
            Self::Storage(_) => "Unable to save",
            Self::NoDocumentOpen => "No file open",
            Self::Tool(ToolError::NotImplemented { .. }) => "Not available",
            _ => "Error",
        }
    }
}
