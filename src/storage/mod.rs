use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageError, ImageFormat, ImageReader};
use thiserror::Error;

use crate::editor::RasterImage;

pub const SUPPORTED_IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("cannot read {path}: {source}")]
    Open { path: PathBuf, source: io::Error },
    #[error("cannot decode {path}: {source}")]
    Decode { path: PathBuf, source: ImageError },
    #[error("cannot encode {path}: {source}")]
    Encode { path: PathBuf, source: ImageError },
    #[error("cannot remove {path}: {source}")]
    Remove { path: PathBuf, source: io::Error },
    #[error("cannot list {path}: {source}")]
    ReadDir { path: PathBuf, source: io::Error },
    #[error("unsupported output format: {extension:?}")]
    UnsupportedOutputFormat { extension: String },
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Jpeg,
    Png,
}

impl OutputFormat {
    pub fn from_extension(extension: &str) -> StorageResult<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "png" => Ok(Self::Png),
            _ => Err(StorageError::UnsupportedOutputFormat {
                extension: extension.to_string(),
            }),
        }
    }

    pub fn for_path(path: &Path) -> StorageResult<Self> {
        let extension = path
            .extension()
            .and_then(|extension| extension.to_str())
            .unwrap_or_default();
        Self::from_extension(extension)
    }

    pub const fn image_format(self) -> ImageFormat {
        match self {
            Self::Jpeg => ImageFormat::Jpeg,
            Self::Png => ImageFormat::Png,
        }
    }
}

/// Where a save lands and how it is encoded. With `convert_all_to` set the
/// extension is swapped first, so `shot.png` may be written as `shot.jpg`.
pub fn output_path(path: &Path, convert_all_to: Option<&str>) -> StorageResult<(PathBuf, OutputFormat)> {
    match convert_all_to.filter(|extension| !extension.is_empty()) {
        Some(extension) => {
            let extension = extension.trim_start_matches('.');
            let format = OutputFormat::from_extension(extension)?;
            Ok((path.with_extension(extension), format))
        }
        None => Ok((path.to_path_buf(), OutputFormat::for_path(path)?)),
    }
}

pub fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| {
            SUPPORTED_IMAGE_EXTENSIONS
                .iter()
                .any(|supported| extension.eq_ignore_ascii_case(supported))
        })
}

/// Blocking file access for the session. Nothing here times out.
pub trait ImageStore {
    fn load(&self, path: &Path) -> StorageResult<RasterImage>;
    fn save(&self, image: &RasterImage, path: &Path, format: OutputFormat) -> StorageResult<()>;
    fn remove(&self, path: &Path) -> StorageResult<()>;
    /// File names in `folder` with a supported extension, unsorted.
    fn list_images(&self, folder: &Path) -> StorageResult<Vec<String>>;
    fn is_file(&self, path: &Path) -> bool;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FsImageStore;

impl ImageStore for FsImageStore {
    fn load(&self, path: &Path) -> StorageResult<RasterImage> {
        let open_error = |source| StorageError::Open {
            path: path.to_path_buf(),
            source,
        };
        let reader = ImageReader::open(path)
            .map_err(open_error)?
            .with_guessed_format()
            .map_err(open_error)?;
        let format = reader.format();
        let pixels = reader.decode().map_err(|source| StorageError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), ?format, width = pixels.width(), height = pixels.height(), "decoded image");
        Ok(RasterImage::new(pixels, format))
    }

    fn save(&self, image: &RasterImage, path: &Path, format: OutputFormat) -> StorageResult<()> {
        let encoded = match (format, image.pixels()) {
            (OutputFormat::Jpeg, DynamicImage::ImageRgb8(_) | DynamicImage::ImageLuma8(_)) => None,
            (OutputFormat::Jpeg, pixels) => Some(DynamicImage::ImageRgb8(pixels.to_rgb8())),
            (OutputFormat::Png, _) => None,
        };
        encoded
            .as_ref()
            .unwrap_or(image.pixels())
            .save_with_format(path, format.image_format())
            .map_err(|source| StorageError::Encode {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::info!(path = %path.display(), ?format, "saved image");
        Ok(())
    }

    fn remove(&self, path: &Path) -> StorageResult<()> {
        fs::remove_file(path).map_err(|source| StorageError::Remove {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), "removed image");
        Ok(())
    }

    fn list_images(&self, folder: &Path) -> StorageResult<Vec<String>> {
        let read_dir_error = |source| StorageError::ReadDir {
            path: folder.to_path_buf(),
            source,
        };
        let mut names = Vec::new();
        for entry in fs::read_dir(folder).map_err(read_dir_error)? {
            let path = entry.map_err(read_dir_error)?.path();
            if !path.is_file() || !has_supported_extension(&path) {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
                names.push(name.to_string());
            }
        }
        Ok(names)
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }
}
