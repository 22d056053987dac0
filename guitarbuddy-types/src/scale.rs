use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::interval::Interval;

/// Supported scale types, each defined by an ordered list of interval labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleType {
    Chromatic,
    Major,
    Minor,
    MelodicMinor,
    HarmonicMinor,
    MajorBlues,
    MinorBlues,
    PentatonicMajor,
    PentatonicMinor,
    PentatonicBlues,
}

impl ScaleType {
    pub const ALL: [ScaleType; 10] = [
        ScaleType::Chromatic,
        ScaleType::Major,
        ScaleType::Minor,
        ScaleType::MelodicMinor,
        ScaleType::HarmonicMinor,
        ScaleType::MajorBlues,
        ScaleType::MinorBlues,
        ScaleType::PentatonicMajor,
        ScaleType::PentatonicMinor,
        ScaleType::PentatonicBlues,
    ];

    /// Identifier used in requests.
    pub fn id(&self) -> &'static str {
        match self {
            ScaleType::Chromatic => "chromatic",
            ScaleType::Major => "major",
            ScaleType::Minor => "minor",
            ScaleType::MelodicMinor => "melodic_minor",
            ScaleType::HarmonicMinor => "harmonic_minor",
            ScaleType::MajorBlues => "major_blues",
            ScaleType::MinorBlues => "minor_blues",
            ScaleType::PentatonicMajor => "pentatonic_major",
            ScaleType::PentatonicMinor => "pentatonic_minor",
            ScaleType::PentatonicBlues => "pentatonic_blues",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ScaleType::Chromatic => "Chromatic",
            ScaleType::Major => "Major",
            ScaleType::Minor => "Minor",
            ScaleType::MelodicMinor => "Melodic Minor",
            ScaleType::HarmonicMinor => "Harmonic Minor",
            ScaleType::MajorBlues => "Major Blues",
            ScaleType::MinorBlues => "Minor Blues",
            ScaleType::PentatonicMajor => "Pentatonic Major",
            ScaleType::PentatonicMinor => "Pentatonic Minor",
            ScaleType::PentatonicBlues => "Pentatonic Blues",
        }
    }

    /// Interval labels in the order notes are listed.
    pub fn formula(&self) -> &'static [Interval] {
        use Interval::*;
        match self {
            ScaleType::Chromatic => &[
                Root, FlatTwo, Two, FlatThree, Three, Four, FlatFive, Five, FlatSix, Six,
                FlatSeven, Seven,
            ],
            ScaleType::Major => &[Root, Two, Three, Four, Five, Six, Seven],
            ScaleType::Minor => &[Root, Two, FlatThree, Four, Five, FlatSix, FlatSeven],
            ScaleType::MelodicMinor => &[Root, Two, FlatThree, Four, Five, Six, Seven],
            ScaleType::HarmonicMinor => &[Root, Two, FlatThree, Four, Five, FlatSix, Seven],
            ScaleType::MajorBlues => &[Root, Two, FlatThree, Three, Five, Six],
            ScaleType::MinorBlues => &[Root, FlatThree, Four, FlatFive, Five, FlatSeven],
            ScaleType::PentatonicMajor => &[Root, Two, Three, Five, Six],
            ScaleType::PentatonicMinor => &[Root, FlatThree, Four, Five, FlatSeven],
            ScaleType::PentatonicBlues => &[Root, FlatThree, Four, SharpFour, Five, FlatSeven],
        }
    }

    /// Formula as comma-separated labels, e.g. `1,b3,4,5,b7`.
    pub fn formula_string(&self) -> String {
        self.formula()
            .iter()
            .map(|i| i.label())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Whether the formula names every letter exactly once.
    pub fn is_heptatonic(&self) -> bool {
        self.formula().len() == 7
    }
}

impl fmt::Display for ScaleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Case-insensitive; spaces and hyphens are read as underscores.
impl FromStr for ScaleType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id: String = s
            .trim()
            .chars()
            .map(|c| match c {
                ' ' | '-' => '_',
                c => c.to_ascii_lowercase(),
            })
            .collect();
        ScaleType::ALL
            .iter()
            .copied()
            .find(|t| t.id() == id)
            .ok_or_else(|| ValidationError::UnsupportedScaleType(s.trim().to_string()))
    }
}

/// Formula lookup by identifier.
pub fn get_formula(scale_type: &str) -> Result<&'static [Interval], ValidationError> {
    scale_type.parse::<ScaleType>().map(|t| t.formula())
}

/// A spelled scale, built once per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scale {
    pub root: String,
    pub name: String,
    pub notes: Vec<String>,
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.root, self.name, self.notes.join(" "))
    }
}
