//! Plain configuration values and the default presets.

use std::{fmt, str::FromStr};

use crate::error::ConfigError;

/// Backend URL baked into the hosted preset.
pub const HOSTED_BACKEND_URL: &str = "http://localhost:8000";

/// Default query window, in minutes.
pub const DEFAULT_TIME_SPAN_MINUTES: i64 = 60;

/// A point-in-time copy of every shared configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigState {
    /// Server the results client talks to (e.g. "http://localhost:8000")
    pub backend_url: String,
    /// Width of the results window in minutes; not range-checked
    pub time_span_minutes: i64,
    /// Whether the origins column is rendered
    pub show_origins: bool,
}

impl Default for ConfigState {
    fn default() -> Self {
        Preset::Blank.state()
    }
}

/// The two default-configuration variants an application may be built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    /// Empty backend URL; the user supplies one at runtime.
    #[default]
    Blank,
    /// Backend URL points at a preset server.
    Hosted,
}

impl Preset {
    /// Default values for this preset.
    pub fn state(self) -> ConfigState {
        let backend_url = match self {
            Preset::Blank => String::new(),
            Preset::Hosted => HOSTED_BACKEND_URL.to_string(),
        };
        ConfigState {
            backend_url,
            time_span_minutes: DEFAULT_TIME_SPAN_MINUTES,
            show_origins: true,
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Preset::Blank => "blank",
            Preset::Hosted => "hosted",
        })
    }
}

impl FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "blank" => Ok(Preset::Blank),
            "hosted" => Ok(Preset::Hosted),
            _ => Err(ConfigError::UnknownPreset(s.to_string())),
        }
    }
}
