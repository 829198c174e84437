//! Application settings.
//!
//! [`Settings`] is a plain value owned by an [`App`](crate::App) and handed
//! to whatever needs it. It can be built in code or loaded from TOML; every
//! field falls back to its default when absent.
//!
//! ```toml
//! jsonp_callback_name = "cb"
//! view_engine = "tera"
//! views = "templates"
//! root = "/srv/site"
//!
//! [locals]
//! title = "Switchyard"
//!
//! [flags]
//! trust_proxy = true
//! ```

use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Error type for settings loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings file could not be read.
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    /// The settings file is not valid TOML for [`Settings`].
    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Application-wide configuration values.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Query parameter naming the JSONP callback.
    pub jsonp_callback_name: String,

    /// Default template engine name.
    pub view_engine: String,

    /// Directory holding view templates, relative to `root`.
    pub views: String,

    /// Application root directory.
    pub root: Option<PathBuf>,

    /// Values made available to every rendered view.
    pub locals: HashMap<String, String>,

    /// Named on/off switches.
    pub flags: HashMap<String, bool>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            jsonp_callback_name: "callback".to_owned(),
            view_engine: "slim".to_owned(),
            views: "views".to_owned(),
            root: None,
            locals: HashMap::new(),
            flags: HashMap::new(),
        }
    }
}

impl Settings {
    /// Parse settings from a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Load settings from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let settings = Self::from_toml_str(&content)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(path = %path.display(), "settings loaded");

        Ok(settings)
    }

    /// Set the view engine.
    pub fn engine(&mut self, name: impl Into<String>) -> &mut Self {
        self.view_engine = name.into();
        self
    }

    /// Set a flag.
    pub fn set_flag(&mut self, name: impl Into<String>, value: bool) -> &mut Self {
        self.flags.insert(name.into(), value);
        self
    }

    /// Turn a flag on.
    pub fn enable(&mut self, name: impl Into<String>) -> &mut Self {
        self.set_flag(name, true)
    }

    /// Turn a flag off.
    pub fn disable(&mut self, name: impl Into<String>) -> &mut Self {
        self.set_flag(name, false)
    }

    /// Whether the flag was explicitly turned on.
    pub fn is_enabled(&self, name: &str) -> bool {
        self.flags.get(name) == Some(&true)
    }

    /// Whether the flag was explicitly turned off.
    ///
    /// A flag that was never set is neither enabled nor disabled.
    pub fn is_disabled(&self, name: &str) -> bool {
        self.flags.get(name) == Some(&false)
    }

    /// The views directory resolved against `root`, when one is set.
    pub fn views_dir(&self) -> PathBuf {
        match &self.root {
            Some(root) => root.join(&self.views),
            None => PathBuf::from(&self.views),
        }
    }
}
