//! Event and action envelopes.
//!
//! These are the two write interfaces of the twin: an [`Event`] reports an
//! external disruption, an [`Action`] applies a remediation the optimizer
//! recommended.  Both deserialise from the JSON envelopes of the reporting
//! layer.

use serde::{Deserialize, Serialize};

use rail_core::{TrackCondition, TrackId, TrainId, Weather};

// ── Event ─────────────────────────────────────────────────────────────────────

/// Kind of a reported disruption.  Unrecognised kinds are treated as plain
/// delay reports.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    #[default]
    Delay,
    TrackFailure,
    TrackRepair,
    #[serde(other)]
    Other,
}

/// A reported disruption.
///
/// `train_id` is required for delay events, `track_id` for track events;
/// the missing-field check happens at dispatch so an envelope can be parsed
/// before its kind is known.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub event_type: EventKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub train_id: Option<TrainId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_id: Option<TrackId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Updated weather for the affected train, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<Weather>,
    /// Updated track condition for the affected train, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_condition: Option<TrackCondition>,
}

impl Event {
    /// Convenience constructor for a plain delay report.
    pub fn delay(train_id: impl Into<TrainId>, minutes: u32) -> Self {
        Self {
            event_type: EventKind::Delay,
            train_id: Some(train_id.into()),
            delay_minutes: Some(minutes),
            ..Self::default()
        }
    }

    /// Convenience constructor for a track failure report.
    pub fn track_failure(track_id: impl Into<TrackId>, description: &str) -> Self {
        Self {
            event_type: EventKind::TrackFailure,
            track_id: Some(track_id.into()),
            description: Some(description.to_owned()),
            ..Self::default()
        }
    }

    /// Convenience constructor for a track repair report.
    pub fn track_repair(track_id: impl Into<TrackId>) -> Self {
        Self {
            event_type: EventKind::TrackRepair,
            track_id: Some(track_id.into()),
            ..Self::default()
        }
    }
}

// ── Action ────────────────────────────────────────────────────────────────────

/// Kind of a remediation action.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum ActionKind {
    Halt,
    Reroute,
    Cancel,
    SpeedAdjust,
}

impl ActionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::Halt => "Halt",
            ActionKind::Reroute => "Reroute",
            ActionKind::Cancel => "Cancel",
            ActionKind::SpeedAdjust => "SpeedAdjust",
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A remediation action addressed to one train.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Action {
    pub action_type: ActionKind,
    pub train_id: TrainId,
    /// Halt duration; negative values are rejected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_mins: Option<i64>,
    /// Which alternative route a Reroute selects (default 0).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_index: Option<usize>,
    /// Speed scale for SpeedAdjust; must be positive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed_factor: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
