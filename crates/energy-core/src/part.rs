use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// The electrical part installed on a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum Part {
    /// Emits power. Never rotates, always powered.
    Source,
    /// Wireless relay: every hotspot reaches every other hotspot.
    Hotspot,
    /// Must be powered for the circuit to be solved.
    Lamp,
    /// Plain cable or nothing at all.
    #[default]
    Empty,
}

impl Part {
    /// All parts.
    pub fn all() -> [Part; 4] {
        [Part::Source, Part::Hotspot, Part::Lamp, Part::Empty]
    }

    /// Whether a tile carrying this part may be rotated.
    pub const fn rotatable(self) -> bool {
        !matches!(self, Part::Source)
    }

    /// Level file marker.
    pub const fn marker(self) -> char {
        match self {
            Part::Source => 'S',
            Part::Hotspot => 'W',
            Part::Lamp => 'L',
            Part::Empty => '.',
        }
    }

    /// Parse a level file marker.
    pub fn from_marker(marker: &str) -> Result<Self, CoreError> {
        match marker {
            "S" => Ok(Part::Source),
            "W" => Ok(Part::Hotspot),
            "L" => Ok(Part::Lamp),
            "." => Ok(Part::Empty),
            other => Err(CoreError::UnknownMarker(other.to_string())),
        }
    }
}

impl FromStr for Part {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_marker(s)
    }
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.marker())
    }
}
