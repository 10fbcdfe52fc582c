//! Session mode and its fixed countdown durations

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::DashboardError;

/// Countdown mode selected by the user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionMode {
    #[default]
    Focus,
    ShortBreak,
    LongBreak,
}

impl SessionMode {
    pub const ALL: [SessionMode; 3] = [
        SessionMode::Focus,
        SessionMode::ShortBreak,
        SessionMode::LongBreak,
    ];

    /// Fixed countdown length for this mode
    pub fn duration_seconds(self) -> u64 {
        match self {
            SessionMode::Focus => 25 * 60,
            SessionMode::ShortBreak => 5 * 60,
            SessionMode::LongBreak => 15 * 60,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SessionMode::Focus => "focus",
            SessionMode::ShortBreak => "shortBreak",
            SessionMode::LongBreak => "longBreak",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SessionMode::Focus => "Focus",
            SessionMode::ShortBreak => "Short Break",
            SessionMode::LongBreak => "Long Break",
        }
    }
}

impl fmt::Display for SessionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SessionMode {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "focus" => Ok(SessionMode::Focus),
            "shortBreak" | "short-break" => Ok(SessionMode::ShortBreak),
            "longBreak" | "long-break" => Ok(SessionMode::LongBreak),
            other => Err(DashboardError::InvalidMode(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations_match_pomodoro_defaults() {
        assert_eq!(SessionMode::Focus.duration_seconds(), 1500);
        assert_eq!(SessionMode::ShortBreak.duration_seconds(), 300);
        assert_eq!(SessionMode::LongBreak.duration_seconds(), 900);
    }

    #[test]
    fn parses_wire_names() {
        for mode in SessionMode::ALL {
            assert_eq!(mode.as_str().parse::<SessionMode>().unwrap(), mode);
        }
        assert_eq!("long-break".parse::<SessionMode>().unwrap(), SessionMode::LongBreak);
        assert!(matches!(
            "nap".parse::<SessionMode>(),
            Err(DashboardError::InvalidMode(name)) if name == "nap"
        ));
    }

    #[test]
    fn defaults_to_focus() {
        assert_eq!(SessionMode::default(), SessionMode::Focus);
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_string(&SessionMode::ShortBreak).unwrap();
        assert_eq!(json, "\"shortBreak\"");
        let mode: SessionMode = serde_json::from_str("\"longBreak\"").unwrap();
        assert_eq!(mode, SessionMode::LongBreak);
    }
}
