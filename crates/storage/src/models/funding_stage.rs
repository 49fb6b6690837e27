use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the five stages of the pitch journey, stored as SMALLINT 0..=4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum FundingStage {
    Ideation,
    Validation,
    Seed,
    Growth,
    Expansion,
}

impl FundingStage {
    pub const ALL: [FundingStage; 5] = [
        Self::Ideation,
        Self::Validation,
        Self::Seed,
        Self::Growth,
        Self::Expansion,
    ];

    pub fn index(self) -> u8 {
        match self {
            Self::Ideation => 0,
            Self::Validation => 1,
            Self::Seed => 2,
            Self::Growth => 3,
            Self::Expansion => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Ideation => "Ideation",
            Self::Validation => "Validation",
            Self::Seed => "Seed",
            Self::Growth => "Growth",
            Self::Expansion => "Expansion",
        }
    }

    /// The stage that follows, saturating at `Expansion`.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() as usize + 1).min(Self::ALL.len() - 1)]
    }

    pub fn previous(self) -> Option<Self> {
        match self.index() {
            0 => None,
            i => Some(Self::ALL[i as usize - 1]),
        }
    }

    pub fn as_db(self) -> i16 {
        self.index() as i16
    }

    pub fn from_db(value: i16) -> Option<Self> {
        u8::try_from(value).ok().and_then(|v| Self::try_from(v).ok())
    }
}

impl TryFrom<u8> for FundingStage {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(value as usize)
            .copied()
            .ok_or_else(|| format!("funding stage must be between 0 and 4, got {}", value))
    }
}

impl From<FundingStage> for u8 {
    fn from(stage: FundingStage) -> Self {
        stage.index()
    }
}

impl fmt::Display for FundingStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.index())
    }
}
