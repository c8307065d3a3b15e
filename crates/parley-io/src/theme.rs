use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;
use parley_types::Theme;
use serde::{Deserialize, Serialize};

/// Durable home of the single dark/light flag
pub trait ThemeStore: Send + Sync {
    /// Saved theme, `None` when nothing usable is stored
    fn load(&self) -> Option<Theme>;
    fn save(&self, theme: Theme) -> anyhow::Result<()>;
}

#[derive(Serialize, Deserialize)]
struct ThemeFile {
    theme: Theme,
}

pub struct FileThemeStore {
    path: PathBuf,
}

impl FileThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `theme.json` in the platform data directory
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("app", "parley", "parley").map(|dirs| dirs.data_dir().join("theme.json"))
    }
}

impl ThemeStore for FileThemeStore {
    fn load(&self) -> Option<Theme> {
        let data = fs::read_to_string(&self.path).ok()?;

        match serde_json::from_str::<ThemeFile>(&data) {
            Ok(file) => Some(file.theme),
            Err(e) => {
                tracing::warn!("Ignoring unreadable theme file {}: {}", self.path.display(), e);
                None
            }
        }
    }

    fn save(&self, theme: Theme) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string(&ThemeFile { theme })?)?;
        tracing::debug!("Saved theme {} to {}", theme.as_str(), self.path.display());
        Ok(())
    }
}
