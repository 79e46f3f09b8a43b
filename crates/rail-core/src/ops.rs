//! Operational enums shared across the network model and the optimizer.
//!
//! Every enum round-trips through serde with the exact spellings used by the
//! topology and schedule files (`"Morning_Peak"`, `"single_line"`, …), so the
//! wire format never leaks string matching into the rest of the codebase.

use serde::{Deserialize, Serialize};

// ── Train type ────────────────────────────────────────────────────────────────

/// Service class of a train.  Drives base priority, cost multipliers, and
/// which remediation actions the solution generator will consider.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub enum TrainType {
    #[default]
    Express,
    Passenger,
    Local,
    Goods,
}

impl TrainType {
    /// Base priority before peak-hour adjustment (1 = highest, 5 = lowest).
    pub fn base_priority(self) -> u8 {
        match self {
            TrainType::Express => 1,
            TrainType::Passenger => 3,
            TrainType::Local => 4,
            TrainType::Goods => 5,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TrainType::Express => "Express",
            TrainType::Passenger => "Passenger",
            TrainType::Local => "Local",
            TrainType::Goods => "Goods",
        }
    }
}

impl std::fmt::Display for TrainType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Environmental conditions ──────────────────────────────────────────────────

/// Reported weather along a train's section.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub enum Weather {
    #[default]
    Clear,
    Rain,
    Fog,
    Storm,
    Snow,
}

impl Weather {
    /// Rain and fog degrade braking distance and visibility; both add the
    /// same fixed ETA and buffer adjustments.
    #[inline]
    pub fn is_adverse(self) -> bool {
        matches!(self, Weather::Rain | Weather::Fog)
    }
}

/// Reported condition of the track a train is running on.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub enum TrackCondition {
    #[default]
    Normal,
    Maintenance,
    Wet,
}

/// Coarse time-of-day band from the schedule file.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub enum TimeOfDay {
    #[default]
    #[serde(rename = "Morning_Peak")]
    MorningPeak,
    Afternoon,
    #[serde(rename = "Evening_Peak")]
    EveningPeak,
    Night,
}

impl TimeOfDay {
    #[inline]
    pub fn is_peak(self) -> bool {
        matches!(self, TimeOfDay::MorningPeak | TimeOfDay::EveningPeak)
    }
}

// ── Track attributes ──────────────────────────────────────────────────────────

/// Physical layout of a track section.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackClass {
    #[default]
    SingleLine,
    DoubleLine,
    MultipleLine,
}

/// Dispatcher priority of a track section.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackPriority {
    Low,
    #[default]
    Medium,
    High,
}

/// Runtime status of a track edge.  `Operational` is the only status visible
/// to adjacency iteration; `Maintenance` and `Disabled` edges are skipped by
/// the pathfinder.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackStatus {
    #[default]
    Operational,
    Maintenance,
    Disabled,
}

impl TrackStatus {
    #[inline]
    pub fn is_operational(self) -> bool {
        matches!(self, TrackStatus::Operational)
    }
}
