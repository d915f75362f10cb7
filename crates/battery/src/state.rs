//! Battery charge states.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Possible battery states.
///
/// `Unknown` means either the controller reported unknown or the value
/// could not be determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum State {
    Unknown,
    Charging,
    Discharging,
    Empty,
    Full,
}

impl State {
    /// Parse a kernel status string (e.g. the sysfs `status` file).
    ///
    /// Unrecognized values, including "Not charging", map to `Unknown`.
    pub fn from_sysfs(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "charging" => Self::Charging,
            "discharging" => Self::Discharging,
            "empty" => Self::Empty,
            "full" => Self::Full,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Charging => "charging",
            Self::Discharging => "discharging",
            Self::Empty => "empty",
            Self::Full => "full",
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
