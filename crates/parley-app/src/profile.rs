use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use parley_config::Config;
use serde::{Deserialize, Serialize};

/// Represents a user profile
#[derive(Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub value: Config,
}

/// Named configs under `<root>/profiles/<name>.json`
pub struct ProfileStore {
    root: PathBuf,
}

impl ProfileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Platform config directory
    pub fn user() -> Option<Self> {
        ProjectDirs::from("app", "parley", "parley").map(|dirs| Self::new(dirs.config_dir()))
    }

    fn profiles_dir(&self) -> PathBuf {
        self.root.join("profiles")
    }

    fn profile_path(&self, name: &str) -> PathBuf {
        self.profiles_dir().join(format!("{name}.json"))
    }

    /// Initialize user config folders and main profile if missing
    pub fn init(&self) -> anyhow::Result<()> {
        fs::create_dir_all(self.profiles_dir())?;

        let main_profile = self.profile_path("main");
        if !main_profile.exists() {
            write_profile(&main_profile, "main", Config::new())?;
            tracing::info!("Created main profile at {}", main_profile.display());
        }

        Ok(())
    }

    /// Load a profile by name, falling back to main and then to defaults
    pub fn load(&self, name: &str) -> anyhow::Result<Config> {
        let profile_file = self.profile_path(name);
        if profile_file.exists() {
            return read_profile(&profile_file);
        }

        tracing::warn!("Profile {name} not found, falling back to main profile");
        let main_file = self.profile_path("main");
        if main_file.exists() {
            read_profile(&main_file)
        } else {
            Ok(Config::new())
        }
    }
}

fn read_profile(path: &Path) -> anyhow::Result<Config> {
    let data = fs::read_to_string(path)?;
    let profile: Profile = serde_json::from_str(&data)?;
    Ok(profile.value)
}

fn write_profile(path: &Path, name: &str, value: Config) -> anyhow::Result<()> {
    let profile = Profile {
        name: name.into(),
        value,
    };
    fs::write(path, serde_json::to_string_pretty(&profile)?)?;
    Ok(())
}
