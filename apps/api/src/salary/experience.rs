use serde::{Deserialize, Serialize};

/// Seniority bands used to scale a base wage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    Entry,
    #[default]
    Mid,
    Senior,
    Expert,
}

impl ExperienceLevel {
    /// Parses `entry | mid | senior | expert`. Keys match exactly, so "Senior" is unknown.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "entry" => Some(ExperienceLevel::Entry),
            "mid" => Some(ExperienceLevel::Mid),
            "senior" => Some(ExperienceLevel::Senior),
            "expert" => Some(ExperienceLevel::Expert),
            _ => None,
        }
    }

    pub fn multiplier(self) -> f64 {
        match self {
            ExperienceLevel::Entry => 0.75,
            ExperienceLevel::Mid => 1.0,
            ExperienceLevel::Senior => 1.35,
            ExperienceLevel::Expert => 1.65,
        }
    }

    /// Display label used in verdict text.
    pub fn label(self) -> &'static str {
        match self {
            ExperienceLevel::Entry => "Entry Level",
            ExperienceLevel::Mid => "Mid-Level",
            ExperienceLevel::Senior => "Senior Level",
            ExperienceLevel::Expert => "Expert/Lead",
        }
    }
}

/// Multiplier for a raw experience level; unrecognised levels scale by 1.0.
pub fn experience_multiplier(raw: &str) -> f64 {
    ExperienceLevel::parse(raw)
        .map(ExperienceLevel::multiplier)
        .unwrap_or(1.0)
}
