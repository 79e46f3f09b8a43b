//! Edge-cost functions and the informed-search heuristic.

use serde::{Deserialize, Serialize};

use rail_core::{TrackClass, TrackPriority, TrainType};
use rail_topology::{TopologyGraph, TrackEdge};

// ── Criterion ─────────────────────────────────────────────────────────────────

/// What an edge traversal is charged by.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Criterion {
    #[default]
    Time,
    Distance,
    /// Travel time inflated on single-line and low-priority tracks.
    Reliability,
}

// ── SearchStrategy ────────────────────────────────────────────────────────────

/// Which queue discipline the pathfinder runs.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchStrategy {
    #[default]
    Dijkstra,
    Greedy,
    AStar,
}

impl SearchStrategy {
    /// Tag stamped on every route the strategy produces.
    pub fn route_type_tag(self) -> &'static str {
        match self {
            SearchStrategy::Dijkstra => "dijkstra_route",
            SearchStrategy::Greedy => "greedy_route",
            SearchStrategy::AStar => "astar_route",
        }
    }
}

// ── Edge cost ─────────────────────────────────────────────────────────────────

/// Cost of traversing `edge` under `criterion`, adjusted for the train type.
///
/// Express services are steered away from slow tracks (×1.2 below
/// 100 km/h); goods services tolerate single lines (×0.9).
pub fn edge_cost(edge: &TrackEdge, criterion: Criterion, train_type: TrainType) -> f64 {
    let mut cost = match criterion {
        Criterion::Time => edge.travel_time_minutes as f64,
        Criterion::Distance => edge.distance_km,
        Criterion::Reliability => {
            let mut c = edge.travel_time_minutes as f64;
            if edge.track_type == TrackClass::SingleLine {
                c *= 1.5;
            }
            if edge.priority == TrackPriority::Low {
                c *= 1.3;
            }
            c
        }
    };

    match train_type {
        TrainType::Express => {
            if edge.max_speed_kmh < 100 {
                cost *= 1.2;
            }
        }
        TrainType::Goods => {
            if edge.track_type == TrackClass::SingleLine {
                cost *= 0.9;
            }
        }
        TrainType::Passenger | TrainType::Local => {}
    }

    cost
}

// ── Heuristic ─────────────────────────────────────────────────────────────────

/// Guide value for Greedy Best-First and A*: Euclidean coordinate distance
/// between the two stations × 100.
///
/// Returns `+∞` when either station is unknown or lacks coordinates, which
/// pushes such nodes to the back of the queue without excluding them.
pub fn heuristic(graph: &TopologyGraph, from: &str, to: &str) -> f64 {
    let a = graph.station(from).and_then(|s| s.coordinates);
    let b = graph.station(to).and_then(|s| s.coordinates);
    match (a, b) {
        (Some(a), Some(b)) => a.distance_deg(b) * 100.0,
        _ => f64::INFINITY,
    }
}
