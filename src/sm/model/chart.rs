//! Definitions of a chart, a playable note grid of the song with its difficulty.

use std::{fmt, str::FromStr};

use super::note_grid::NoteGrid;

/// The closed set of difficulty slots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Difficulty {
    /// The easiest slot.
    Beginner,
    /// `easy`, `basic` or `light`.
    Easy,
    /// `medium`, `another`, `trick`, `standard` or `difficult`.
    Medium,
    /// `hard`, `ssr`, `maniac` or `heavy`.
    Hard,
    /// `challenge`, `smaniac`, `expert` or `oni`.
    Challenge,
    /// A user made chart, and the fallback of unknown names.
    #[default]
    Edit,
}

impl Difficulty {
    /// Looks up the difficulty name case-insensitively, including the legacy names of other games.
    #[must_use]
    pub fn lookup(name: &str) -> Option<Self> {
        let difficulty = match name.trim().to_ascii_lowercase().as_str() {
            "beginner" => Self::Beginner,
            "easy" | "basic" | "light" => Self::Easy,
            "medium" | "another" | "trick" | "standard" | "difficult" => Self::Medium,
            "hard" | "ssr" | "maniac" | "heavy" => Self::Hard,
            "challenge" | "smaniac" | "expert" | "oni" => Self::Challenge,
            "edit" => Self::Edit,
            _ => return None,
        };
        Some(difficulty)
    }

    /// Decides the difficulty of a chart from its difficulty name and description.
    ///
    /// Old files marked the hardest chart as `hard` with a description `smaniac` or `challenge`, so such a chart is
    /// promoted to [`Difficulty::Challenge`]. An unknown name is [`Difficulty::Edit`].
    #[must_use]
    pub fn from_chart_fields(name: &str, description: &str) -> Self {
        match Self::lookup(name) {
            Some(Self::Hard)
                if ["smaniac", "challenge"]
                    .iter()
                    .any(|legacy| description.trim().eq_ignore_ascii_case(legacy)) =>
            {
                Self::Challenge
            }
            Some(difficulty) => difficulty,
            None => Self::Edit,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Beginner => "Beginner",
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
            Self::Challenge => "Challenge",
            Self::Edit => "Edit",
        };
        f.write_str(name)
    }
}

/// The game mode of a chart, which decides the number of lanes.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StepsType {
    /// `dance-single`, 4 lanes.
    DanceSingle,
    /// `dance-double`, 8 lanes.
    DanceDouble,
    /// `dance-couple`, 8 lanes for 2 players.
    DanceCouple,
    /// `dance-solo`, 6 lanes.
    DanceSolo,
    /// `dance-threepanel`, 3 lanes.
    DanceThreePanel,
    /// `pump-single`, 5 lanes.
    PumpSingle,
    /// `pump-halfdouble`, 6 lanes.
    PumpHalfDouble,
    /// `pump-double`, 10 lanes.
    PumpDouble,
    /// `pump-couple`, 10 lanes for 2 players.
    PumpCouple,
    /// `kb7-single`, 7 lanes.
    Kb7Single,
    /// `para-single`, 5 lanes.
    ParaSingle,
    /// Other mode, kept as written.
    Unknown(String),
}

impl StepsType {
    /// Returns the number of lanes, or `None` for [`StepsType::Unknown`].
    #[must_use]
    pub const fn lane_count(&self) -> Option<usize> {
        let lanes = match self {
            Self::DanceThreePanel => 3,
            Self::DanceSingle => 4,
            Self::PumpSingle | Self::ParaSingle => 5,
            Self::DanceSolo | Self::PumpHalfDouble => 6,
            Self::Kb7Single => 7,
            Self::DanceDouble | Self::DanceCouple => 8,
            Self::PumpDouble | Self::PumpCouple => 10,
            Self::Unknown(_) => return None,
        };
        Some(lanes)
    }

    /// Whether the lanes are split between 2 players.
    #[must_use]
    pub const fn is_couple(&self) -> bool {
        matches!(self, Self::DanceCouple | Self::PumpCouple)
    }

    /// Returns the name as written in simfiles.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::DanceSingle => "dance-single",
            Self::DanceDouble => "dance-double",
            Self::DanceCouple => "dance-couple",
            Self::DanceSolo => "dance-solo",
            Self::DanceThreePanel => "dance-threepanel",
            Self::PumpSingle => "pump-single",
            Self::PumpHalfDouble => "pump-halfdouble",
            Self::PumpDouble => "pump-double",
            Self::PumpCouple => "pump-couple",
            Self::Kb7Single => "kb7-single",
            Self::ParaSingle => "para-single",
            Self::Unknown(name) => name,
        }
    }
}

impl FromStr for StepsType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Ok(match name.to_ascii_lowercase().as_str() {
            "dance-single" => Self::DanceSingle,
            "dance-double" => Self::DanceDouble,
            "dance-couple" => Self::DanceCouple,
            "dance-solo" => Self::DanceSolo,
            "dance-threepanel" => Self::DanceThreePanel,
            "pump-single" => Self::PumpSingle,
            "pump-halfdouble" => Self::PumpHalfDouble,
            "pump-double" => Self::PumpDouble,
            "pump-couple" => Self::PumpCouple,
            "kb7-single" => Self::Kb7Single,
            "para-single" => Self::ParaSingle,
            _ => Self::Unknown(name.to_owned()),
        })
    }
}

impl fmt::Display for StepsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A playable chart of the song, from a `#NOTES` record.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Chart {
    /// The game mode.
    pub steps_type: StepsType,
    /// The description, usually the author.
    pub description: String,
    /// The difficulty slot.
    pub difficulty: Difficulty,
    /// The numeric difficulty, at least 1.
    pub meter: u32,
    /// The notes.
    pub notes: NoteGrid,
}
