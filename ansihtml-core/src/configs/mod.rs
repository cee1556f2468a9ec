//! This module handles the structuring, valid options, and parsing of user
//! config files. User config files must be `config.toml` and are parsed with
//! [`serde`] and respectively serde's [`toml`] crate.

pub mod errors;

mod appearance;
mod defaults;

pub use appearance::*;
pub use defaults::*;

use std::{io::Read, ops::Range, sync::OnceLock};

use serde::Deserialize;

use crate::{
    configs::errors::{ConfigError, TomlError},
    create_recursive,
};

static CONFIG: OnceLock<Config> = OnceLock::new();

/// Represents the entire `config.toml` configuration file.
///
/// See [`Appearance`] and [`Defaults`]
#[derive(Default, Debug, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub appearance: Appearance,
    #[serde(default)]
    pub defaults: Defaults,
}

impl Config {
    fn apply_overrides(&mut self, overrides: ConfigOverride) {
        if let Some(tabsize) = overrides.tabsize {
            self.defaults.tabsize = tabsize;
        }
        if let Some(wrap) = overrides.wrap {
            self.defaults.wrap = wrap;
        }
        if let Some(dir) = overrides.out_dir {
            self.defaults.out_dir = dir;
        }
    }
}

/// This function constructs a `static CONFIG` for the rest of ansihtml to get
/// a reference to throughout the remainder of the program.
///
/// It checks for the user's config file and if it doesn't exist, it will use
/// [`Config::default()`]. If the user's config does exist but does not set
/// values for every field, the global `static CONFIG` will be initialized
/// with the user's values and fill in the unspecified fields with their
/// default values.
///
/// # Errors
/// Returns a [`ConfigError`] when the config file exists but cannot be read
/// or parsed, or when the config was already initialized.
pub fn initialize_config(overrides: ConfigOverride) -> miette::Result<(), ConfigError> {
    let mut config: Config = if let Ok(config_file) = get_config_file() {
        let mut file = std::fs::File::open(config_file).expect("File should exist");
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        toml::from_str(&contents).map_err(|e| {
            TomlError::new(
                e.span().unwrap_or(Range { start: 0, end: 0 }),
                contents,
                e.message().to_string(),
            )
        })?
    } else {
        Config::default()
    };

    config.apply_overrides(overrides);

    CONFIG
        .set(config)
        .map_err(|_| ConfigError::AlreadyInitialized)?;
    Ok(())
}

/// When called, `get_config()` returns a reference to the global `static
/// CONFIG` that was initialized at the start of the program.
///
/// See [`Config`].
pub fn get_config() -> &'static Config {
    CONFIG.get().expect("Config not initialized")
}

/// CLI-provided values that shadow whatever the config file says.
#[derive(Debug, Default)]
pub struct ConfigOverride {
    pub tabsize: Option<usize>,
    pub wrap: Option<bool>,
    pub out_dir: Option<std::path::PathBuf>,
}

fn get_conf_dir() -> std::path::PathBuf {
    let mut user_home_dir = std::env::home_dir().expect("Failed to get home directory");

    if cfg!(target_os = "windows") {
        user_home_dir.push(".config\\ansihtml");
    } else {
        user_home_dir.push(".config/ansihtml");
    }

    let user_conf_dir = user_home_dir;
    create_recursive!(user_conf_dir.as_path());

    user_conf_dir
}

fn get_config_file() -> miette::Result<std::path::PathBuf, ConfigError> {
    let mut conf_dir = get_conf_dir();
    conf_dir.push("config.toml");
    let conf_file = conf_dir;

    if conf_file.exists() && conf_file.is_file() {
        Ok(conf_file)
    } else {
        Err(std::io::Error::new(std::io::ErrorKind::NotFound, "Could not find config file.").into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::CssColor;

    #[test]
    fn parse_test_config() {
        let file: Config = toml::from_str(
            r##"
            [appearance]
            base = ["black", "red", "#4e9a06", "#c4a000", "blue", "#75507b", "cyan", "white"]

            [defaults]
            tabsize = 8
            wrap = false
            out-dir = "captures"
            "##,
        )
        .unwrap();

        assert_eq!(file.appearance.base[2], CssColor::rgb(78, 154, 6));
        assert_eq!(file.appearance.bright, Appearance::default().bright);
        assert_eq!(
            file.defaults,
            Defaults {
                tabsize: 8,
                wrap: false,
                out_dir: std::path::PathBuf::from("captures"),
            }
        );
    }

    #[test]
    fn overrides_shadow_file_values() {
        let mut config = Config::default();
        config.apply_overrides(ConfigOverride {
            tabsize: Some(2),
            wrap: Some(false),
            out_dir: None,
        });
        assert_eq!(config.defaults.tabsize, 2);
        assert!(!config.defaults.wrap);
        assert_eq!(config.defaults.out_dir, std::path::PathBuf::from("./"));
    }

    #[test]
    fn check_conf_dir_is_dir() {
        let dir = get_conf_dir();
        assert!(std::fs::metadata(dir).unwrap().is_dir());
    }
}
