pub mod config;
pub mod display;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod session;
pub mod state;
pub mod storage;
pub use error::{AppError, AppResult};
