use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::editor::CropOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConfigPathError {
    MissingHomeDirectory,
}

const APP_DIR: &str = "lightedit";
const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings file {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("cannot read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot write settings file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Persisted editor preferences from `settings.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Folder browsed by next/previous; updated to the parent of every opened file.
    pub default_folder: PathBuf,
    pub most_recent: Option<PathBuf>,
    /// Width over height for the crop selection.
    pub crop_ratio: Option<f64>,
    /// Crop move/resize step in pixels; defaults to a twentieth of the image width.
    pub crop_step: Option<u32>,
    /// Extension every save is converted to, e.g. `"jpg"`.
    pub convert_all_to: Option<String>,
    /// Maximum undo snapshots kept per document. Unbounded when unset.
    pub history_limit: Option<usize>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_folder: PathBuf::from("."),
            most_recent: None,
            crop_ratio: None,
            crop_step: None,
            convert_all_to: None,
            history_limit: None,
        }
    }
}

impl Settings {
    pub fn crop_options(&self) -> CropOptions {
        CropOptions::new(self.crop_ratio, self.crop_step)
    }

    pub fn convert_all_to(&self) -> Option<&str> {
        self.convert_all_to.as_deref()
    }
}

/// Location of `settings.json`. A disabled store never touches the disk.
#[derive(Debug, Clone, Default)]
pub struct SettingsStore {
    path: Option<PathBuf>,
}

impl SettingsStore {
    pub fn at(path: PathBuf) -> Self {
        Self { path: Some(path) }
    }

    pub const fn disabled() -> Self {
        Self { path: None }
    }

    pub fn from_env() -> Self {
        let (xdg_config_home, home) = config_env_dirs();
        match app_config_path(APP_DIR, SETTINGS_FILE, xdg_config_home.as_deref(), home.as_deref()) {
            Ok(path) => Self::at(path),
            Err(err) => {
                tracing::warn!(?err, "no config directory; settings will not persist");
                Self::disabled()
            }
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Missing files yield defaults; unreadable or corrupt ones are errors.
    pub fn try_load(&self) -> Result<Settings, SettingsError> {
        let Some(path) = self.path.as_ref() else {
            return Ok(Settings::default());
        };
        if !path.exists() {
            return Ok(Settings::default());
        }
        let contents = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| SettingsError::Corrupt {
            path: path.clone(),
            source,
        })
    }

    pub fn load(&self) -> Settings {
        self.try_load().unwrap_or_else(|err| {
            tracing::warn!(%err, "resetting settings to defaults");
            Settings::default()
        })
    }

    pub fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        let Some(path) = self.path.as_ref() else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| SettingsError::Write {
                path: path.clone(),
                source,
            })?;
        }
        let contents = serde_json::to_string_pretty(settings)?;
        std::fs::write(path, contents).map_err(|source| SettingsError::Write {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "settings saved");
        Ok(())
    }
}

pub(crate) fn config_env_dirs() -> (Option<PathBuf>, Option<PathBuf>) {
    (
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

pub(crate) fn app_config_path(
    app_dir: &str,
    file_name: &str,
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    let mut path = config_root(xdg_config_home, home)?;
    path.push(app_dir);
    path.push(file_name);
    Ok(path)
}

fn config_root(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    if let Some(xdg) = xdg_config_home.filter(|path| !path.as_os_str().is_empty()) {
        return Ok(xdg.to_path_buf());
    }

    let home = home.ok_or(ConfigPathError::MissingHomeDirectory)?;
    Ok(home.join(".config"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_config_path_prefers_xdg_config_home() {
        let path = app_config_path(
            "lightedit",
            "settings.json",
            Some(Path::new("/tmp/config-root")),
            Some(Path::new("/tmp/home")),
        )
        .expect("path should resolve");

        assert_eq!(
            path,
            PathBuf::from("/tmp/config-root/lightedit/settings.json")
        );
    }

    #[test]
    fn app_config_path_falls_back_to_home_dot_config() {
        let path = app_config_path(
            "lightedit",
            "settings.json",
            Some(Path::new("")),
            Some(Path::new("/tmp/home")),
        )
        .expect("path should resolve");

        assert_eq!(
            path,
            PathBuf::from("/tmp/home/.config/lightedit/settings.json")
        );
    }

    #[test]
    fn app_config_path_errors_when_home_missing_and_xdg_unset() {
        let error = app_config_path("lightedit", "settings.json", None, None).unwrap_err();
        assert_eq!(error, ConfigPathError::MissingHomeDirectory);
    }

    #[test]
    fn missing_settings_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = SettingsStore::at(dir.path().join("settings.json"));

        let settings = store.try_load().expect("missing file is not an error");
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.default_folder, PathBuf::from("."));
    }

    #[test]
    fn save_then_load_persists_every_field() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = SettingsStore::at(dir.path().join("nested/settings.json"));
        let settings = Settings {
            default_folder: PathBuf::from("/photos"),
            most_recent: Some(PathBuf::from("/photos/a.jpg")),
            crop_ratio: Some(1.5),
            crop_step: Some(12),
            convert_all_to: Some("png".to_string()),
            history_limit: Some(8),
        };

        store.save(&settings).expect("settings save");
        assert_eq!(store.load(), settings);
    }

    #[test]
    fn partial_settings_fill_in_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "crop_ratio": 2.0 }"#).expect("write settings");

        let settings = SettingsStore::at(path).load();
        assert_eq!(settings.crop_ratio, Some(2.0));
        assert_eq!(settings.default_folder, PathBuf::from("."));
        assert_eq!(settings.crop_options().ratio, 2.0);
    }

    #[test]
    fn corrupt_settings_are_reported_then_reset() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").expect("write settings");
        let store = SettingsStore::at(path);

        assert!(matches!(
            store.try_load(),
            Err(SettingsError::Corrupt { .. })
        ));
        assert_eq!(store.load(), Settings::default());
    }

    #[test]
    fn disabled_store_never_touches_disk() {
        let store = SettingsStore::disabled();
        assert!(store.path().is_none());
        assert_eq!(store.load(), Settings::default());
        store
            .save(&Settings::default())
            .expect("disabled save is a no-op");
    }
}
