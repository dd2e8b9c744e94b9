use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;

use crate::models::settings::LayoutSettings;

const SETTINGS_FILE: &str = "layout.toml";

pub struct SettingsService;

impl SettingsService {
    /// Location of `layout.toml` in the platform config directory, falling back
    /// to the current directory when no home directory can be resolved.
    pub fn default_path() -> PathBuf {
        if let Some(dirs) = ProjectDirs::from("com", "RustCalendar", "CalendarLayout") {
            dirs.config_dir().join(SETTINGS_FILE)
        } else {
            log::warn!("Unable to resolve project directory; using current dir for layout settings");
            PathBuf::from(SETTINGS_FILE)
        }
    }

    /// Load and validate settings from `path`. A missing file yields defaults.
    pub fn load(path: &Path) -> Result<LayoutSettings> {
        if !path.exists() {
            log::debug!("no layout settings at {}; using defaults", path.display());
            return Ok(LayoutSettings::default());
        }

        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read layout settings from {}", path.display()))?;
        let settings: LayoutSettings = toml::from_str(&data)
            .with_context(|| format!("failed to parse layout settings from {}", path.display()))?;
        settings
            .validate()
            .map_err(|e| anyhow!("Invalid layout settings in {}: {}", path.display(), e))?;

        log::info!("Loaded layout settings from {}", path.display());
        Ok(settings)
    }

    /// Like [`SettingsService::load`], but falls back to defaults on any error.
    pub fn load_or_default(path: &Path) -> LayoutSettings {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!("{:#}; falling back to default layout settings", err);
                LayoutSettings::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::settings::{DragSettings, MonthSettings};
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = SettingsService::load(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(settings, LayoutSettings::default());
    }

    #[test]
    fn test_load_full_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        let settings = LayoutSettings {
            drag: DragSettings {
                debounce_ms: 8,
                edge_dwell_ms: 750,
            },
            month: MonthSettings {
                max_visible_rows: 4,
                first_day_of_week: 1,
            },
        };

        fs::write(&path, toml::to_string_pretty(&settings).unwrap()).unwrap();
        assert_eq!(SettingsService::load(&path).unwrap(), settings);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        fs::write(&path, "[month]\nmax_visible_rows = 5\n").unwrap();

        let settings = SettingsService::load(&path).unwrap();
        assert_eq!(settings.month.max_visible_rows, 5);
        assert_eq!(settings.month.first_day_of_week, 0);
        assert_eq!(settings.drag, DragSettings::default());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        fs::write(&path, "[drag]\ndebounce_ms = 0\n").unwrap();

        let err = SettingsService::load(&path).unwrap_err();
        assert!(err.to_string().contains("Invalid layout settings"));
        assert_eq!(SettingsService::load_or_default(&path), LayoutSettings::default());
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        fs::write(&path, "[drag\n").unwrap();
        assert!(SettingsService::load(&path).is_err());
    }

    #[test]
    fn test_out_of_range_first_day_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        fs::write(&path, "[month]\nfirst_day_of_week = 9\n").unwrap();
        assert!(SettingsService::load(&path).is_err());
    }

    #[test]
    fn test_default_path_file_name() {
        assert!(SettingsService::default_path().ends_with(SETTINGS_FILE));
    }
}
