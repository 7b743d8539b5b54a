/// Repeat mode for a playback session
use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What happens to the current track when it finishes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    /// Discard the finished track and advance
    #[default]
    Off,

    /// Replay the current track indefinitely
    Track,

    /// Re-append the finished track to the tail of the queue
    Queue,

    /// Reserved for autoplay-on-empty; currently behaves like `Off`
    Auto,
}

impl RepeatMode {
    /// Canonical lowercase name, as used on the wire and in snapshots
    pub fn as_str(&self) -> &'static str {
        match self {
            RepeatMode::Off => "off",
            RepeatMode::Track => "track",
            RepeatMode::Queue => "queue",
            RepeatMode::Auto => "auto",
        }
    }
}

impl fmt::Display for RepeatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RepeatMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "off" => Ok(RepeatMode::Off),
            "track" => Ok(RepeatMode::Track),
            "queue" => Ok(RepeatMode::Queue),
            "auto" => Ok(RepeatMode::Auto),
            other => Err(CoreError::InvalidRepeatMode(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_modes() {
        assert_eq!("off".parse::<RepeatMode>().unwrap(), RepeatMode::Off);
        assert_eq!("track".parse::<RepeatMode>().unwrap(), RepeatMode::Track);
        assert_eq!("queue".parse::<RepeatMode>().unwrap(), RepeatMode::Queue);
        assert_eq!("auto".parse::<RepeatMode>().unwrap(), RepeatMode::Auto);
    }

    #[test]
    fn rejects_unknown_mode() {
        assert!("shuffle".parse::<RepeatMode>().is_err());
        assert!("OFF".parse::<RepeatMode>().is_err());
    }

    #[test]
    fn serde_uses_lowercase_names() {
        assert_eq!(serde_json::to_string(&RepeatMode::Queue).unwrap(), "\"queue\"");
        let mode: RepeatMode = serde_json::from_str("\"auto\"").unwrap();
        assert_eq!(mode, RepeatMode::Auto);
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for mode in [
            RepeatMode::Off,
            RepeatMode::Track,
            RepeatMode::Queue,
            RepeatMode::Auto,
        ] {
            assert_eq!(mode.to_string().parse::<RepeatMode>().unwrap(), mode);
        }
    }
}
