//! Route types: an immutable chain of track segments with derived totals.

use serde::{Deserialize, Serialize};

use rail_core::{StationCode, TrackClass, TrackId, TrackPriority, TrackStatus};
use rail_topology::TrackEdge;

// ── RouteSegment ──────────────────────────────────────────────────────────────

/// One traversed edge with its scalar attributes copied at route-construction
/// time, so a later status change on the live edge cannot mutate an already
/// issued route.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RouteSegment {
    pub track_id: TrackId,
    pub from: StationCode,
    pub to: StationCode,
    pub distance_km: f64,
    pub travel_time_minutes: u32,
    pub track_type: TrackClass,
    pub capacity_trains_per_hour: u32,
    pub priority: TrackPriority,
    pub status: TrackStatus,
}

impl From<&TrackEdge> for RouteSegment {
    fn from(edge: &TrackEdge) -> Self {
        Self {
            track_id: edge.id.clone(),
            from: edge.from.clone(),
            to: edge.to.clone(),
            distance_km: edge.distance_km,
            travel_time_minutes: edge.travel_time_minutes,
            track_type: edge.track_type,
            capacity_trains_per_hour: edge.capacity_trains_per_hour,
            priority: edge.priority,
            status: edge.status,
        }
    }
}

// ── Route ─────────────────────────────────────────────────────────────────────

/// A complete route from origin to destination.  Immutable once created.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Route {
    /// Non-empty; consecutive segments chain (`segments[i].to ==
    /// segments[i+1].from`).
    pub segments: Vec<RouteSegment>,
    pub total_distance_km: f64,
    pub total_time_minutes: u32,
    /// Ranking cost for comparing alternatives; see [`route_cost`].
    pub total_cost: f64,
    /// Tag of the search strategy that produced the route, e.g.
    /// `"dijkstra_route"`.
    pub route_type: String,
    /// Visited stations in order; always `segments.len() + 1` entries.
    pub stations: Vec<StationCode>,
}

impl Route {
    /// Assemble a route from a non-empty segment chain.
    ///
    /// # Panics
    ///
    /// Panics in debug mode if `segments` is empty or does not chain.
    pub fn from_segments(segments: Vec<RouteSegment>, route_type: &str) -> Self {
        debug_assert!(!segments.is_empty(), "a route must have at least one segment");
        debug_assert!(
            segments.windows(2).all(|w| w[0].to == w[1].from),
            "route segments must chain"
        );

        let total_distance_km = segments.iter().map(|s| s.distance_km).sum();
        let total_time_minutes = segments.iter().map(|s| s.travel_time_minutes).sum();
        let total_cost = route_cost(&segments);

        let mut stations = Vec::with_capacity(segments.len() + 1);
        stations.push(segments[0].from.clone());
        stations.extend(segments.iter().map(|s| s.to.clone()));

        Self {
            segments,
            total_distance_km,
            total_time_minutes,
            total_cost,
            route_type: route_type.to_owned(),
            stations,
        }
    }

    #[inline]
    pub fn origin(&self) -> &StationCode {
        &self.stations[0]
    }

    #[inline]
    pub fn destination(&self) -> &StationCode {
        &self.stations[self.stations.len() - 1]
    }

    /// `true` if any segment runs over the given track.
    pub fn uses_track(&self, track_id: &str) -> bool {
        self.segments.iter().any(|s| s.track_id.as_str() == track_id)
    }

    /// Compact description for snapshots, persisted schedules, and solution
    /// candidates.
    pub fn summary(&self) -> RouteSummary {
        RouteSummary {
            route_type: self.route_type.clone(),
            stations: self.stations.clone(),
            total_time_minutes: self.total_time_minutes,
            total_distance_km: self.total_distance_km,
        }
    }
}

// ── RouteSummary ──────────────────────────────────────────────────────────────

/// Wire-facing summary of a route: the fields downstream consumers rank and
/// display, without the segment list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    pub route_type: String,
    pub stations: Vec<StationCode>,
    pub total_time_minutes: u32,
    pub total_distance_km: f64,
}

/// Ranking cost for a segment chain, independent of the per-edge search
/// criterion: total travel time, +10 for complex routes (more than two
/// segments), +5 per single-line segment.
pub fn route_cost(segments: &[RouteSegment]) -> f64 {
    let mut cost: f64 = segments.iter().map(|s| s.travel_time_minutes as f64).sum();
    if segments.len() > 2 {
        cost += 10.0;
    }
    let single_line = segments
        .iter()
        .filter(|s| s.track_type == TrackClass::SingleLine)
        .count();
    cost + single_line as f64 * 5.0
}
