//! Loader configuration.
//!
//! Settings come from the environment, optionally seeded by a `.env` file in
//! the working directory:
//!
//! - `FERRUM_CONFIG_DIR`: directory holding the table data files (default `Output/dat`)
//! - `FERRUM_CONFIG_EXT`: extension of the data files (default `dat`)
//! - `FERRUM_CONFIG_STRICT_IDS`: reject tables with duplicate ids (default `false`)
//!
//! Command line flags override whatever is found here.

use std::path::{Path, PathBuf};

use crate::persistence::{DuplicatePolicy, SettingsError};

pub const DATA_DIR_VAR: &str = "FERRUM_CONFIG_DIR";
pub const EXTENSION_VAR: &str = "FERRUM_CONFIG_EXT";
pub const STRICT_IDS_VAR: &str = "FERRUM_CONFIG_STRICT_IDS";

const DEFAULT_DATA_DIR: &str = "Output/dat";
const DEFAULT_EXTENSION: &str = "dat";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoaderSettings {
    pub data_dir: PathBuf,
    pub extension: String,
    pub duplicate_policy: DuplicatePolicy,
}

impl Default for LoaderSettings {
    fn default() -> Self {
        LoaderSettings {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            extension: DEFAULT_EXTENSION.to_string(),
            duplicate_policy: DuplicatePolicy::LastWins,
        }
    }
}

impl LoaderSettings {
    pub fn from_env() -> Result<LoaderSettings, SettingsError> {
        //! Read the settings from the process environment, after loading a
        //! `.env` file if there is one.

        apply_dotenv(dotenvy::dotenv())?;
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_env_file(path: impl AsRef<Path>) -> Result<LoaderSettings, SettingsError> {
        //! Same as [`LoaderSettings::from_env`] with an explicit `.env` file.

        apply_dotenv(dotenvy::from_path(path.as_ref()))?;
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<LoaderSettings, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        //! Build the settings from any key/value source, falling back to the
        //! defaults for keys that are missing or blank.

        let mut settings = LoaderSettings::default();
        let value_of = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(dir) = value_of(DATA_DIR_VAR) {
            settings.data_dir = PathBuf::from(dir.trim());
        }

        if let Some(extension) = value_of(EXTENSION_VAR) {
            settings.extension = extension.trim().trim_start_matches('.').to_string();
        }

        if let Some(strict) = value_of(STRICT_IDS_VAR) {
            settings.duplicate_policy = if parse_flag(STRICT_IDS_VAR, &strict)? {
                DuplicatePolicy::Reject
            } else {
                DuplicatePolicy::LastWins
            };
        }

        Ok(settings)
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> LoaderSettings {
        self.data_dir = data_dir.into();
        self
    }
}

fn apply_dotenv<T>(result: Result<T, dotenvy::Error>) -> Result<(), SettingsError> {
    // a missing .env is fine, the defaults apply
    match result {
        Err(error) if !error.not_found() => Err(SettingsError::DotEnv(error)),
        _ => Ok(()),
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool, SettingsError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(SettingsError::Invalid {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}
