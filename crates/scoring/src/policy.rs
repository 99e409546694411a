use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Points for a disqualified angler, left to the event officers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisqualifiedPoints {
    #[default]
    SameAsBlank,
    OneBelowBlank,
}

impl DisqualifiedPoints {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SameAsBlank => "same-as-blank",
            Self::OneBelowBlank => "one-below-blank",
        }
    }
}

impl FromStr for DisqualifiedPoints {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "same-as-blank" | "same" => Ok(Self::SameAsBlank),
            "one-below-blank" | "one-below" | "below" => Ok(Self::OneBelowBlank),
            other => Err(format!(
                "Unknown disqualified points policy: '{}'. Available: same-as-blank, one-below-blank",
                other
            )),
        }
    }
}

impl std::fmt::Display for DisqualifiedPoints {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Angler-of-the-Year ladder constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringPolicy {
    #[serde(default = "default_first_place_points")]
    pub first_place_points: i32,
    /// Subtracted from the lowest weighed value for anglers who weighed nothing
    #[serde(default = "default_blank_offset")]
    pub blank_offset: i32,
    /// Subtracted from the lowest weighed value for buy-ins
    #[serde(default = "default_buy_in_offset")]
    pub buy_in_offset: i32,
    #[serde(default)]
    pub disqualified: DisqualifiedPoints,
    /// Non-member appearances allowed per season before membership is required
    #[serde(default = "default_max_guest_appearances")]
    pub max_guest_appearances: u32,
}

fn default_first_place_points() -> i32 {
    100
}

fn default_blank_offset() -> i32 {
    2
}

fn default_buy_in_offset() -> i32 {
    4
}

fn default_max_guest_appearances() -> u32 {
    2
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            first_place_points: default_first_place_points(),
            blank_offset: default_blank_offset(),
            buy_in_offset: default_buy_in_offset(),
            disqualified: DisqualifiedPoints::default(),
            max_guest_appearances: default_max_guest_appearances(),
        }
    }
}

impl ScoringPolicy {
    pub fn with_disqualified(mut self, disqualified: DisqualifiedPoints) -> Self {
        self.disqualified = disqualified;
        self
    }
}
