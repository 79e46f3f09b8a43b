//! The pathfinder: best route and diverse alternatives.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use ordered_float::OrderedFloat;
use rustc_hash::FxHashSet;
use tracing::debug;

use rail_core::{StationCode, TrainType};
use rail_topology::TopologyGraph;

use crate::cost::{Criterion, SearchStrategy, edge_cost, heuristic};
use crate::route::{Route, RouteSegment};

// ── Queue entry ───────────────────────────────────────────────────────────────

/// Frontier entry.  Ordering is `(key, seq)` only; the segment-list payload
/// never participates in comparisons, and equal-cost pops resolve in
/// insertion order.
struct QueueEntry {
    key: OrderedFloat<f64>,
    seq: u64,
    station: StationCode,
    /// Accumulated edge cost (`g`); independent of `key` under Greedy.
    g: f64,
    path: Vec<RouteSegment>,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.seq == other.seq
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key.cmp(&other.key).then(self.seq.cmp(&other.seq))
    }
}

// ── Pathfinder ────────────────────────────────────────────────────────────────

/// Route search bound to one [`SearchStrategy`].
///
/// The pathfinder is stateless between queries; it borrows the graph per
/// call, so one instance can serve any number of networks.
#[derive(Copy, Clone, Debug, Default)]
pub struct Pathfinder {
    strategy: SearchStrategy,
}

impl Pathfinder {
    pub fn new(strategy: SearchStrategy) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> SearchStrategy {
        self.strategy
    }

    /// Best route from `origin` to `destination`, or `None` if the stations
    /// are unknown, identical, or no operational path exists.
    pub fn find_best_route(
        &self,
        graph: &TopologyGraph,
        origin: &str,
        destination: &str,
        train_type: TrainType,
        criterion: Criterion,
    ) -> Option<Route> {
        if !graph.contains_station(origin) || !graph.contains_station(destination) {
            debug!(origin, destination, "routing skipped: unknown station");
            return None;
        }
        if origin == destination {
            return None;
        }

        let segments = self.search(graph, origin, destination, train_type, criterion)?;
        Some(Route::from_segments(segments, self.strategy.route_type_tag()))
    }

    /// Up to `max_alternatives` distinct routes, found by re-running the
    /// search under each criterion (time, reliability, distance) and
    /// dropping near-duplicates.  Sorted ascending by ranking cost.
    pub fn find_alternative_routes(
        &self,
        graph: &TopologyGraph,
        origin: &str,
        destination: &str,
        train_type: TrainType,
        max_alternatives: usize,
    ) -> Vec<Route> {
        let mut routes: Vec<Route> = Vec::new();

        for criterion in [Criterion::Time, Criterion::Reliability, Criterion::Distance] {
            if routes.len() >= max_alternatives {
                break;
            }
            if let Some(route) =
                self.find_best_route(graph, origin, destination, train_type, criterion)
            {
                if !is_duplicate(&route, &routes) {
                    routes.push(route);
                }
            }
        }

        routes.sort_by(|a, b| a.total_cost.total_cmp(&b.total_cost));
        routes.truncate(max_alternatives);
        routes
    }

    // ── Search core ───────────────────────────────────────────────────────

    /// Shared priority-queue loop; the strategy only changes the queue key.
    fn search(
        &self,
        graph: &TopologyGraph,
        origin: &str,
        destination: &str,
        train_type: TrainType,
        criterion: Criterion,
    ) -> Option<Vec<RouteSegment>> {
        let mut heap: BinaryHeap<Reverse<QueueEntry>> = BinaryHeap::new();
        let mut visited: FxHashSet<StationCode> = FxHashSet::default();
        let mut seq: u64 = 0;

        let start_key = match self.strategy {
            SearchStrategy::Dijkstra => 0.0,
            SearchStrategy::Greedy | SearchStrategy::AStar => {
                heuristic(graph, origin, destination)
            }
        };
        heap.push(Reverse(QueueEntry {
            key: OrderedFloat(start_key),
            seq,
            station: StationCode::from(origin),
            g: 0.0,
            path: Vec::new(),
        }));
        seq += 1;

        while let Some(Reverse(entry)) = heap.pop() {
            if !visited.insert(entry.station.clone()) {
                continue; // stale entry for an already-settled station
            }
            if entry.station.as_str() == destination {
                return Some(entry.path);
            }

            // Adjacency already excludes non-operational edges.
            for hop in graph.neighbours(entry.station.as_str()) {
                if visited.contains(hop.to.as_str()) {
                    continue;
                }
                let Some(edge) = graph.edge(hop.track.as_str()) else {
                    continue;
                };

                let g = entry.g + edge_cost(edge, criterion, train_type);
                let key = match self.strategy {
                    SearchStrategy::Dijkstra => g,
                    SearchStrategy::Greedy => {
                        heuristic(graph, hop.to.as_str(), destination)
                    }
                    SearchStrategy::AStar => {
                        g + heuristic(graph, hop.to.as_str(), destination)
                    }
                };

                let mut path = entry.path.clone();
                path.push(RouteSegment::from(edge));
                heap.push(Reverse(QueueEntry {
                    key: OrderedFloat(key),
                    seq,
                    station: hop.to.clone(),
                    g,
                    path,
                }));
                seq += 1;
            }
        }

        debug!(origin, destination, "no operational path");
        None
    }
}

// ── Duplicate detection ───────────────────────────────────────────────────────

/// A route is a duplicate if its station list matches an existing route
/// exactly, or if more than 80 % of its segments are shared with one.
fn is_duplicate(candidate: &Route, existing: &[Route]) -> bool {
    existing.iter().any(|other| {
        if candidate.stations == other.stations {
            return true;
        }
        let shared = candidate
            .segments
            .iter()
            .filter(|s| other.segments.iter().any(|o| o.track_id == s.track_id))
            .count();
        shared as f64 / candidate.segments.len() as f64 > 0.8
    })
}
