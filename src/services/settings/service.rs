use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;

use crate::models::settings::LayoutSettings;

const SETTINGS_FILE: &str = "layout.toml";

/// Loads and stores layout settings in a TOML file
pub struct SettingsService {
    path: PathBuf,
}

impl SettingsService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Service backed by `layout.toml` in the platform config directory
    pub fn from_default_location() -> Option<Self> {
        ProjectDirs::from("com", "CareSchedule", "CareSchedule")
            .map(|dirs| Self::new(dirs.config_dir().join(SETTINGS_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the current settings; a missing file yields defaults
    pub fn get(&self) -> Result<LayoutSettings> {
        if !self.path.exists() {
            log::debug!(
                "No settings file at {}; using defaults",
                self.path.display()
            );
            return Ok(LayoutSettings::default());
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read settings from {}", self.path.display()))?;
        let settings: LayoutSettings = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse settings in {}", self.path.display()))?;
        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings in {}: {}", self.path.display(), e))?;

        Ok(settings)
    }

    /// Update settings
    pub fn update(&self, settings: &LayoutSettings) -> Result<()> {
        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings: {}", e))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).context("Failed to create settings directory")?;
        }
        let contents = toml::to_string_pretty(settings).context("Failed to serialize settings")?;
        fs::write(&self.path, contents).context("Failed to write settings")?;

        log::info!("Saved layout settings to {}", self.path.display());
        Ok(())
    }

    /// Reset settings to defaults
    pub fn reset(&self) -> Result<()> {
        self.update(&LayoutSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::settings::{PageSize, TextMetrics, TimezonePolicy, WeekAnchor};
    use chrono::Weekday;
    use tempfile::TempDir;

    fn setup_test_service() -> (TempDir, SettingsService) {
        let dir = TempDir::new().unwrap();
        let service = SettingsService::new(dir.path().join("nested").join(SETTINGS_FILE));
        (dir, service)
    }

    #[test]
    fn test_get_default_settings() {
        let (_dir, service) = setup_test_service();
        let settings = service.get().unwrap();
        assert_eq!(settings, LayoutSettings::default());
    }

    #[test]
    fn test_update_settings() {
        let (_dir, service) = setup_test_service();

        let settings = LayoutSettings {
            page_size: PageSize::LETTER_LANDSCAPE,
            week_anchor: WeekAnchor::Weekday(Weekday::Mon),
            timezone: TimezonePolicy::Named(chrono_tz::Europe::London),
            night_start_hour: 19,
            night_end_hour: 7,
            text_metrics: TextMetrics::CharacterCount,
        };
        service.update(&settings).unwrap();

        let updated = service.get().unwrap();
        assert_eq!(updated, settings);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let (dir, _) = setup_test_service();
        let path = dir.path().join(SETTINGS_FILE);
        fs::write(
            &path,
            "timezone = \"America/Denver\"\nweek_anchor = \"sunday\"\n",
        )
        .unwrap();

        let settings = SettingsService::new(&path).get().unwrap();
        assert_eq!(settings.timezone, TimezonePolicy::Named(chrono_tz::America::Denver));
        assert_eq!(settings.week_anchor, WeekAnchor::Weekday(Weekday::Sun));
        assert_eq!(settings.night_start_hour, 18);
        assert_eq!(settings.page_size, PageSize::A4_LANDSCAPE);
    }

    #[test]
    fn test_update_invalid_settings() {
        let (_dir, service) = setup_test_service();
        let settings = LayoutSettings {
            night_start_hour: 30,
            ..LayoutSettings::default()
        };
        assert!(service.update(&settings).is_err());
    }

    #[test]
    fn test_unknown_timezone_is_rejected() {
        let (dir, _) = setup_test_service();
        let path = dir.path().join(SETTINGS_FILE);
        fs::write(&path, "timezone = \"Atlantis/Central\"\n").unwrap();
        assert!(SettingsService::new(&path).get().is_err());
    }

    #[test]
    fn test_reset_settings() {
        let (_dir, service) = setup_test_service();
        let settings = LayoutSettings {
            night_start_hour: 20,
            ..LayoutSettings::default()
        };
        service.update(&settings).unwrap();
        service.reset().unwrap();
        assert_eq!(service.get().unwrap(), LayoutSettings::default());
    }
}
