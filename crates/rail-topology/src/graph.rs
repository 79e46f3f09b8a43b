//! The topology graph: stations, track edges, and status-aware adjacency.
//!
//! # Adjacency model
//!
//! Outgoing edges are kept in a map from station code to a sorted `Vec` of
//! [`Hop`]s for O(1) neighbour access.  The map holds **operational edges
//! only** and is recomputed on every status change, so the pathfinder never
//! has to re-check status in its inner loop.  Hop lists are sorted by
//! `(to, track)` to keep search expansion order deterministic across runs.

use chrono::Utc;
use rustc_hash::FxHashMap;
use tracing::{info, warn};

use rail_core::{StationCode, TrackId, TrackStatus};

use crate::loader::{StationSpec, TopologyDoc, TrackSpec};
use crate::station::Station;
use crate::track::TrackEdge;
use crate::{TopologyError, TopologyResult};

// ── Hop ───────────────────────────────────────────────────────────────────────

/// One outgoing adjacency entry: the neighbouring station and the track that
/// reaches it.  Edge attributes are looked up via [`TopologyGraph::edge`].
#[derive(Clone, Debug, PartialEq)]
pub struct Hop {
    pub to: StationCode,
    pub track: TrackId,
}

// ── TopologyGraph ─────────────────────────────────────────────────────────────

/// The railway network as a directed graph with mutable track status.
///
/// Cloning produces a fully independent copy (all state is owned), which is
/// how the optimizer obtains isolated per-strategy networks.
#[derive(Clone, Debug)]
pub struct TopologyGraph {
    stations: FxHashMap<StationCode, Station>,
    tracks: FxHashMap<TrackId, TrackEdge>,
    adjacency: FxHashMap<StationCode, Vec<Hop>>,
    route_alternatives: FxHashMap<String, serde_json::Value>,
}

impl TopologyGraph {
    /// Build a graph from a parsed topology document.
    ///
    /// Fails if any track references a station the document does not define.
    pub fn from_doc(doc: &TopologyDoc) -> TopologyResult<Self> {
        let stations: FxHashMap<StationCode, Station> = doc
            .stations
            .iter()
            .map(|(code, spec)| {
                (
                    code.clone(),
                    Station {
                        code: code.clone(),
                        name: spec.name.clone(),
                        kind: spec.kind,
                        platforms: spec.platforms,
                        capacity_per_hour: spec.capacity_per_hour,
                        coordinates: spec.coordinates,
                    },
                )
            })
            .collect();

        let mut tracks: FxHashMap<TrackId, TrackEdge> = FxHashMap::default();
        for (id, spec) in &doc.tracks {
            for endpoint in [&spec.from, &spec.to] {
                if !stations.contains_key(endpoint.as_str()) {
                    return Err(TopologyError::DanglingTrack {
                        track: id.clone(),
                        station: endpoint.clone(),
                    });
                }
            }
            tracks.insert(
                id.clone(),
                TrackEdge {
                    id: id.clone(),
                    from: spec.from.clone(),
                    to: spec.to.clone(),
                    distance_km: spec.distance_km,
                    travel_time_minutes: spec.travel_time_minutes,
                    track_type: spec.track_type,
                    capacity_trains_per_hour: spec.capacity_trains_per_hour,
                    priority: spec.priority,
                    max_speed_kmh: spec.max_speed_kmh,
                    status: spec.status,
                    disable_reason: None,
                    disabled_at: None,
                    original_status: None,
                },
            );
        }

        let mut graph = Self {
            stations,
            tracks,
            adjacency: FxHashMap::default(),
            route_alternatives: doc.route_alternatives.clone(),
        };
        graph.rebuild_adjacency();
        info!(
            stations = graph.station_count(),
            tracks = graph.track_count(),
            "topology loaded"
        );
        Ok(graph)
    }

    // ── Lookups ───────────────────────────────────────────────────────────

    pub fn station(&self, code: &str) -> Option<&Station> {
        self.stations.get(code)
    }

    pub fn contains_station(&self, code: &str) -> bool {
        self.stations.contains_key(code)
    }

    pub fn edge(&self, track_id: &str) -> Option<&TrackEdge> {
        self.tracks.get(track_id)
    }

    pub fn stations(&self) -> impl Iterator<Item = &Station> {
        self.stations.values()
    }

    pub fn tracks(&self) -> impl Iterator<Item = &TrackEdge> {
        self.tracks.values()
    }

    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    // ── Traversal ─────────────────────────────────────────────────────────

    /// Outgoing operational hops from `station`, sorted by `(to, track)`.
    ///
    /// Unknown stations yield an empty slice.
    #[inline]
    pub fn neighbours(&self, station: &str) -> &[Hop] {
        self.adjacency.get(station).map(Vec::as_slice).unwrap_or(&[])
    }

    // ── Status changes ────────────────────────────────────────────────────

    /// Disable a track (failure or planned work) and rebuild adjacency.
    ///
    /// The first disable saves the edge's current status so a later
    /// [`enable_track`](Self::enable_track) can restore it exactly; repeated
    /// disables keep the original saved value.  Returns `false` for an
    /// unknown track id, leaving the graph untouched.
    pub fn disable_track(&mut self, track_id: &str, reason: &str) -> bool {
        let Some(edge) = self.tracks.get_mut(track_id) else {
            return false;
        };
        if edge.original_status.is_none() {
            edge.original_status = Some(edge.status);
        }
        edge.status = TrackStatus::Disabled;
        edge.disable_reason = Some(reason.to_owned());
        edge.disabled_at = Some(Utc::now());
        warn!(track = %track_id, reason, "track disabled");
        self.rebuild_adjacency();
        true
    }

    /// Re-enable a disabled track, restoring its pre-disable status, and
    /// rebuild adjacency.  Returns `false` for an unknown track id.
    pub fn enable_track(&mut self, track_id: &str) -> bool {
        let Some(edge) = self.tracks.get_mut(track_id) else {
            return false;
        };
        edge.status = edge.original_status.take().unwrap_or(TrackStatus::Operational);
        edge.disable_reason = None;
        edge.disabled_at = None;
        info!(track = %track_id, status = ?edge.status, "track enabled");
        self.rebuild_adjacency();
        true
    }

    // ── Health ────────────────────────────────────────────────────────────

    pub fn operational_track_count(&self) -> usize {
        self.tracks.values().filter(|t| t.is_operational()).count()
    }

    pub fn failed_track_count(&self) -> usize {
        self.tracks
            .values()
            .filter(|t| t.status == TrackStatus::Disabled)
            .count()
    }

    /// `true` iff no track is disabled.
    pub fn is_healthy(&self) -> bool {
        self.failed_track_count() == 0
    }

    // ── Serialisation ─────────────────────────────────────────────────────

    /// Re-serialisable document reflecting the graph's current state.
    ///
    /// Loading the result reproduces identical adjacency (disabled tracks
    /// stay disabled).
    pub fn to_document(&self) -> TopologyDoc {
        let stations = self
            .stations
            .iter()
            .map(|(code, s)| {
                (
                    code.clone(),
                    StationSpec {
                        name: s.name.clone(),
                        kind: s.kind,
                        platforms: s.platforms,
                        capacity_per_hour: s.capacity_per_hour,
                        coordinates: s.coordinates,
                    },
                )
            })
            .collect();
        let tracks = self
            .tracks
            .iter()
            .map(|(id, t)| {
                (
                    id.clone(),
                    TrackSpec {
                        from: t.from.clone(),
                        to: t.to.clone(),
                        distance_km: t.distance_km,
                        travel_time_minutes: t.travel_time_minutes,
                        track_type: t.track_type,
                        capacity_trains_per_hour: t.capacity_trains_per_hour,
                        priority: t.priority,
                        max_speed_kmh: t.max_speed_kmh,
                        status: t.status,
                    },
                )
            })
            .collect();
        TopologyDoc {
            stations,
            tracks,
            route_alternatives: self.route_alternatives.clone(),
        }
    }

    // ── Private helpers ───────────────────────────────────────────────────

    fn rebuild_adjacency(&mut self) {
        let mut adjacency: FxHashMap<StationCode, Vec<Hop>> = self
            .stations
            .keys()
            .map(|code| (code.clone(), Vec::new()))
            .collect();

        for edge in self.tracks.values() {
            if !edge.is_operational() {
                continue;
            }
            if let Some(hops) = adjacency.get_mut(edge.from.as_str()) {
                hops.push(Hop { to: edge.to.clone(), track: edge.id.clone() });
            }
        }

        for hops in adjacency.values_mut() {
            hops.sort_by(|a, b| {
                (a.to.as_str(), a.track.as_str()).cmp(&(b.to.as_str(), b.track.as_str()))
            });
        }

        self.adjacency = adjacency;
    }
}
