use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "config.json";
const CONFIG_ENV_VAR: &str = "TODOLIST_CONFIG_PATH";

/// ANSI styling for list output. The default theme is plain text.
#[derive(Debug, Clone)]
pub struct Palette {
    pub accent: &'static str,
    pub muted: &'static str,
    pub strike: &'static str,
    pub reset: &'static str,
}

impl Palette {
    fn plain() -> Self {
        Self {
            accent: "",
            muted: "",
            strike: "",
            reset: "",
        }
    }

    pub fn accentize(&self, text: &str) -> String {
        self.wrap(self.accent, text)
    }

    pub fn mutedize(&self, text: &str) -> String {
        self.wrap(self.muted, text)
    }

    /// Styling for a completed task's title: struck through and muted.
    pub fn strike_through(&self, text: &str) -> String {
        if self.strike.is_empty() {
            text.to_string()
        } else {
            format!("{}{}{}{}", self.strike, self.muted, text, self.reset)
        }
    }

    fn wrap(&self, code: &str, text: &str) -> String {
        if code.is_empty() {
            text.to_string()
        } else {
            format!("{}{}{}", code, text, self.reset)
        }
    }
}

pub fn palette_for_theme(theme: Option<&str>) -> Palette {
    match theme.map(canonical_theme_name).as_deref() {
        Some("teal") => Palette {
            accent: "\x1b[38;5;30m",
            muted: "\x1b[38;5;245m",
            strike: "\x1b[9m",
            reset: "\x1b[0m",
        },
        Some("noir") => Palette {
            accent: "\x1b[38;5;208m",
            muted: "\x1b[38;5;250m",
            strike: "\x1b[9m",
            reset: "\x1b[0m",
        },
        _ => Palette::plain(),
    }
}

/// Lowercase and trim a raw theme name; "dark" is an alias for "noir" and
/// "light" for the plain default.
pub fn canonical_theme_name(raw: &str) -> String {
    let cleaned = raw.trim().to_ascii_lowercase();
    match cleaned.as_str() {
        "dark" | "dark-mode" | "darkmode" => "noir".to_string(),
        "light" | "" => "default".to_string(),
        other => other.to_string(),
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub aliases: HashMap<String, String>,
}

/// Result of a fallback-soft config load: defaults plus the error that was
/// swallowed, if any, so the caller can warn without aborting.
#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: Config,
    pub warning: Option<AppError>,
}

pub fn config_path() -> Result<PathBuf, AppError> {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR)
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    if cfg!(windows) {
        let appdata =
            std::env::var("APPDATA").map_err(|_| AppError::invalid_data("APPDATA is not set"))?;
        Ok(PathBuf::from(appdata)
            .join("todolist")
            .join(CONFIG_FILE_NAME))
    } else {
        let home = std::env::var("HOME").map_err(|_| AppError::invalid_data("HOME is not set"))?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("todolist")
            .join(CONFIG_FILE_NAME))
    }
}

pub fn load_config_with_fallback() -> ConfigLoad {
    match config_path() {
        Ok(path) => load_with_fallback_from_path(&path),
        Err(err) => ConfigLoad {
            config: Config::default(),
            warning: Some(err),
        },
    }
}

fn load_with_fallback_from_path(path: &Path) -> ConfigLoad {
    if !path.exists() {
        return ConfigLoad {
            config: Config::default(),
            warning: None,
        };
    }

    match load_from_path(path) {
        Ok(config) => ConfigLoad {
            config,
            warning: None,
        },
        Err(err) => ConfigLoad {
            config: Config::default(),
            warning: Some(err),
        },
    }
}

fn load_from_path(path: &Path) -> Result<Config, AppError> {
    let content = std::fs::read_to_string(path)
        .map_err(|err| AppError::io(format!("{}: {}", path.display(), err)))?;
    let mut config: Config = serde_json::from_str(&content).map_err(|err| {
        AppError::invalid_data(format!("invalid JSON in {}: {}", path.display(), err))
    })?;
    config.theme = config.theme.map(|name| canonical_theme_name(&name));
    Ok(config)
}

/// A parsed `--config-override` target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOverride {
    Theme(String),
    Alias { name: String, command: String },
}

/// Parse a raw `KEY=VALUE` override. Supported keys: `theme` and
/// `alias.<name>`.
pub fn parse_override(raw: &str) -> Result<ConfigOverride, AppError> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| AppError::invalid_input("override must be in KEY=VALUE format"))?;
    let key = key.trim();
    let value = value.trim();

    if key.eq_ignore_ascii_case("theme") {
        return Ok(ConfigOverride::Theme(canonical_theme_name(value)));
    }

    if let Some(name) = key
        .strip_prefix("alias.")
        .or_else(|| key.strip_prefix("aliases."))
    {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::invalid_input("alias override requires a name"));
        }
        return Ok(ConfigOverride::Alias {
            name: name.to_string(),
            command: value.to_string(),
        });
    }

    Err(AppError::invalid_input(format!(
        "unknown config field '{key}'"
    )))
}

pub fn apply_overrides(mut config: Config, overrides: &[ConfigOverride]) -> Config {
    for entry in overrides {
        match entry {
            ConfigOverride::Theme(name) => config.theme = Some(name.clone()),
            ConfigOverride::Alias { name, command } => {
                config.aliases.insert(name.clone(), command.clone());
            }
        }
    }
    config
}
