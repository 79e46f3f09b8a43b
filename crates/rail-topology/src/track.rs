//! Directed track edge with runtime status.

use chrono::{DateTime, Utc};
use rail_core::{StationCode, TrackClass, TrackId, TrackPriority, TrackStatus};

/// A directed track section between two stations.
///
/// All scalar attributes are fixed at load time; `status` (plus the disable
/// metadata that travels with it) is the only field mutated at runtime, and
/// only through [`TopologyGraph`](crate::TopologyGraph), which owns the
/// adjacency rebuild.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackEdge {
    pub id: TrackId,
    pub from: StationCode,
    pub to: StationCode,
    pub distance_km: f64,
    pub travel_time_minutes: u32,
    pub track_type: TrackClass,
    pub capacity_trains_per_hour: u32,
    pub priority: TrackPriority,
    pub max_speed_kmh: u32,

    pub status: TrackStatus,
    /// Why the track was disabled, while it is disabled.
    pub disable_reason: Option<String>,
    /// When the track was disabled, while it is disabled.
    pub disabled_at: Option<DateTime<Utc>>,
    /// Status to restore on re-enable.  Saved by the first disable only, so
    /// a repeated disable cannot overwrite the true pre-failure status.
    pub original_status: Option<TrackStatus>,
}

impl TrackEdge {
    #[inline]
    pub fn is_operational(&self) -> bool {
        self.status.is_operational()
    }
}
