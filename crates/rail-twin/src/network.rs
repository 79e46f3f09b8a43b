//! The `Network` digital twin: composition root for graph, pathfinder, and
//! train fleet.
//!
//! # Lifecycle
//!
//! A network is constructed from a topology document plus a schedule list;
//! route slots are initialised for every train at construction.  Afterwards
//! trains are mutated only through [`apply_event`](Network::apply_event) and
//! [`apply_action`](Network::apply_action).  [`reset`](Network::reset)
//! rebuilds the network from the stored pristine inputs.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use chrono::Utc;
use rustc_hash::FxHashMap;
use serde::Serialize;
use tracing::{info, warn};

use rail_core::{StationCode, TrackId, TrainId};
use rail_routing::{Criterion, Pathfinder, RouteSummary, SearchStrategy};
use rail_topology::{TopologyDoc, TopologyGraph};

use crate::error::{TwinError, TwinResult};
use crate::event::{Action, ActionKind, Event, EventKind};
use crate::schedule::{ScheduleExport, TrainRecord, load_schedule_path};
use crate::snapshot::{NetworkStatus, StateSnapshot, TrainEta, TrainState};
use crate::train::Train;

// ── Rerouting report ──────────────────────────────────────────────────────────

/// Outcome of one train's rerouting attempt.
#[derive(Clone, Debug, Serialize)]
pub struct ReroutingInfo {
    pub train_id: TrainId,
    pub rerouted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_route: Option<RouteSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_route: Option<RouteSummary>,
}

/// Outcome of [`Network::recalculate_routes_for_trains`].
#[derive(Clone, Debug, Serialize)]
pub struct ReroutingReport {
    pub total_affected: usize,
    pub successfully_rerouted: usize,
    pub rerouting_info: Vec<ReroutingInfo>,
}

// ── Network ───────────────────────────────────────────────────────────────────

/// The live digital twin.
///
/// All state is owned, so `clone()` yields a fully independent deep copy;
/// the optimizer's per-strategy preview networks are plain clones.  Every
/// mutating operation takes `&mut self` (single-writer discipline).
#[derive(Clone, Debug)]
pub struct Network {
    graph: TopologyGraph,
    pathfinder: Pathfinder,
    trains: FxHashMap<TrainId, Train>,
    /// station → platform slots (index 0 = platform 1).
    platforms: FxHashMap<StationCode, Vec<Option<TrainId>>>,
    track_occupancy: FxHashMap<TrackId, Option<TrainId>>,

    // Pristine inputs, kept for reset.
    topology_doc: TopologyDoc,
    initial_schedule: Vec<TrainRecord>,
}

impl Network {
    // ── Construction ──────────────────────────────────────────────────────

    /// Build the twin from a parsed topology document and schedule list.
    pub fn new(topology: TopologyDoc, schedule: Vec<TrainRecord>) -> TwinResult<Self> {
        let graph = TopologyGraph::from_doc(&topology)?;
        let pathfinder = Pathfinder::new(SearchStrategy::Dijkstra);

        let mut trains: FxHashMap<TrainId, Train> = FxHashMap::default();
        for record in &schedule {
            let train = Train::from_record(record)?;
            trains.insert(train.id.clone(), train);
        }

        let platforms = graph
            .stations()
            .map(|s| (s.code.clone(), vec![None; s.platforms as usize]))
            .collect();
        let track_occupancy = graph.tracks().map(|t| (t.id.clone(), None)).collect();

        let mut network = Self {
            graph,
            pathfinder,
            trains,
            platforms,
            track_occupancy,
            topology_doc: topology,
            initial_schedule: schedule,
        };
        network.initialise_train_routes();
        info!(trains = network.trains.len(), "network constructed");
        Ok(network)
    }

    /// Build the twin from topology and schedule file paths.  Load failure
    /// is fatal: no network is created.
    pub fn from_files<P: AsRef<Path>, Q: AsRef<Path>>(
        topology_path: P,
        schedule_path: Q,
    ) -> TwinResult<Self> {
        let topology = TopologyDoc::from_path(topology_path)?;
        let schedule = load_schedule_path(schedule_path)?;
        Self::new(topology, schedule)
    }

    /// Build the twin over the minimal built-in fallback topology.
    /// Demo mode only; production callers must supply a real topology.
    pub fn demo(schedule: Vec<TrainRecord>) -> TwinResult<Self> {
        Self::new(TopologyDoc::demo_fallback(), schedule)
    }

    /// Rebuild from the pristine topology and schedule captured at
    /// construction.
    pub fn reset(&mut self) -> TwinResult<()> {
        *self = Self::new(self.topology_doc.clone(), self.initial_schedule.clone())?;
        Ok(())
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn graph(&self) -> &TopologyGraph {
        &self.graph
    }

    pub fn pathfinder(&self) -> &Pathfinder {
        &self.pathfinder
    }

    pub fn train(&self, train_id: &str) -> Option<&Train> {
        self.trains.get(train_id)
    }

    pub fn trains(&self) -> impl Iterator<Item = &Train> {
        self.trains.values()
    }

    pub fn train_count(&self) -> usize {
        self.trains.len()
    }

    // ── Event dispatch ────────────────────────────────────────────────────

    /// Apply a reported disruption.  Unknown identifiers leave the network
    /// unchanged and surface as errors; unrecognised event kinds are treated
    /// as delay reports.
    pub fn apply_event(&mut self, event: &Event) -> TwinResult<()> {
        match event.event_type {
            EventKind::TrackFailure => self.handle_track_failure(event),
            EventKind::TrackRepair => self.handle_track_repair(event),
            EventKind::Delay | EventKind::Other => self.handle_train_delay(event),
        }
    }

    fn handle_train_delay(&mut self, event: &Event) -> TwinResult<()> {
        let train_id = event.train_id.as_ref().ok_or(TwinError::MissingField("train_id"))?;
        let train = self
            .trains
            .get_mut(train_id.as_str())
            .ok_or_else(|| TwinError::TrainNotFound(train_id.clone()))?;

        train.apply_delay(event.delay_minutes.unwrap_or(0), event.description.as_deref());
        if let Some(weather) = event.weather {
            train.weather = weather;
        }
        if let Some(condition) = event.track_condition {
            train.track_condition = condition;
        }

        info!(
            train = %train.id,
            delay = train.actual_delay_mins,
            "delay event applied"
        );
        Ok(())
    }

    fn handle_track_failure(&mut self, event: &Event) -> TwinResult<()> {
        let track_id = event.track_id.as_ref().ok_or(TwinError::MissingField("track_id"))?;
        let reason = event.description.as_deref().unwrap_or("Track failure");

        // Collect the trains whose running route crosses the track *before*
        // the edge disappears from adjacency.
        let affected = self.trains_using_track(track_id.as_str());

        if !self.graph.disable_track(track_id.as_str(), reason) {
            return Err(TwinError::TrackNotFound(track_id.clone()));
        }

        let pathfinder = self.pathfinder;
        let graph = &self.graph;
        for id in &affected {
            if let Some(train) = self.trains.get_mut(id.as_str()) {
                let alternatives = pathfinder.find_alternative_routes(
                    graph,
                    train.section_start.as_str(),
                    train.section_end.as_str(),
                    train.train_type,
                    3,
                );
                if alternatives.is_empty() {
                    warn!(train = %train.id, "no alternative routes after track failure");
                }
                train.alternative_routes = alternatives;
            }
        }

        info!(track = %track_id, affected = affected.len(), "track failure applied");
        Ok(())
    }

    fn handle_track_repair(&mut self, event: &Event) -> TwinResult<()> {
        let track_id = event.track_id.as_ref().ok_or(TwinError::MissingField("track_id"))?;

        if !self.graph.enable_track(track_id.as_str()) {
            return Err(TwinError::TrackNotFound(track_id.clone()));
        }

        self.initialise_train_routes();
        info!(track = %track_id, "track repaired, routes reinitialised");
        Ok(())
    }

    // ── Action dispatch ───────────────────────────────────────────────────

    /// Apply a recommended remediation action to its target train.
    /// Invalid parameters are rejected with the network unchanged.
    pub fn apply_action(&mut self, action: &Action) -> TwinResult<()> {
        let train = self
            .trains
            .get_mut(action.train_id.as_str())
            .ok_or_else(|| TwinError::TrainNotFound(action.train_id.clone()))?;
        let reason = action.description.as_deref().unwrap_or("Optimization");

        match action.action_type {
            ActionKind::Halt => {
                let duration = action.duration_mins.unwrap_or(10);
                if duration < 0 {
                    return Err(TwinError::InvalidAction(format!(
                        "halt duration must be non-negative, got {duration}"
                    )));
                }
                train.apply_halt(duration as u32, reason);
            }
            ActionKind::Reroute => {
                let index = action.route_index.unwrap_or(0);
                let available = train.alternative_routes.len();
                if !train.switch_to_alternative_route(index) {
                    return Err(TwinError::RouteIndexOutOfRange {
                        train: action.train_id.clone(),
                        index,
                        available,
                    });
                }
            }
            ActionKind::Cancel => {
                train.apply_cancellation(reason);
            }
            ActionKind::SpeedAdjust => {
                let factor = action.speed_factor.unwrap_or(1.0);
                if factor <= 0.0 {
                    return Err(TwinError::InvalidAction(format!(
                        "speed factor must be positive, got {factor}"
                    )));
                }
                train.apply_speed_adjustment(factor, reason);
            }
        }

        info!(train = %action.train_id, action = %action.action_type, "action applied");
        Ok(())
    }

    // ── Rerouting ─────────────────────────────────────────────────────────

    /// Attempt to reassign primary routes for the listed trains under the
    /// current graph status.  Trains the pathfinder cannot serve keep their
    /// existing slots.
    pub fn recalculate_routes_for_trains(&mut self, train_ids: &[TrainId]) -> ReroutingReport {
        let pathfinder = self.pathfinder;
        let graph = &self.graph;
        let mut rerouting_info = Vec::with_capacity(train_ids.len());
        let mut successfully_rerouted = 0;

        for id in train_ids {
            let Some(train) = self.trains.get_mut(id.as_str()) else {
                rerouting_info.push(ReroutingInfo {
                    train_id: id.clone(),
                    rerouted: false,
                    previous_route: None,
                    new_route: None,
                });
                continue;
            };

            let previous_route = train.current_route.as_ref().map(|r| r.summary());
            let primary = pathfinder.find_best_route(
                graph,
                train.section_start.as_str(),
                train.section_end.as_str(),
                train.train_type,
                Criterion::Time,
            );

            match primary {
                Some(primary) => {
                    let mut alternatives = pathfinder.find_alternative_routes(
                        graph,
                        train.section_start.as_str(),
                        train.section_end.as_str(),
                        train.train_type,
                        2,
                    );
                    alternatives.retain(|r| r != &primary);
                    let new_route = Some(primary.summary());
                    train.set_routes(primary, alternatives);
                    successfully_rerouted += 1;
                    rerouting_info.push(ReroutingInfo {
                        train_id: id.clone(),
                        rerouted: true,
                        previous_route,
                        new_route,
                    });
                }
                None => {
                    rerouting_info.push(ReroutingInfo {
                        train_id: id.clone(),
                        rerouted: false,
                        previous_route,
                        new_route: None,
                    });
                }
            }
        }

        ReroutingReport {
            total_affected: train_ids.len(),
            successfully_rerouted,
            rerouting_info,
        }
    }

    /// Trains whose *current* route runs over `track_id`.
    pub fn trains_using_track(&self, track_id: &str) -> Vec<TrainId> {
        let mut affected: Vec<TrainId> = self
            .trains
            .values()
            .filter(|t| t.current_route.as_ref().is_some_and(|r| r.uses_track(track_id)))
            .map(|t| t.id.clone())
            .collect();
        affected.sort();
        affected
    }

    // ── Views ─────────────────────────────────────────────────────────────

    /// Complete serialisable snapshot of the current state.
    pub fn state_snapshot(&self) -> StateSnapshot {
        let trains: BTreeMap<TrainId, TrainState> = self
            .trains
            .values()
            .map(|t| (t.id.clone(), TrainState::for_train(t)))
            .collect();

        let platforms: BTreeMap<StationCode, BTreeMap<u32, Option<TrainId>>> = self
            .platforms
            .iter()
            .map(|(station, slots)| {
                let numbered = slots
                    .iter()
                    .enumerate()
                    .map(|(i, occupant)| (i as u32 + 1, occupant.clone()))
                    .collect();
                (station.clone(), numbered)
            })
            .collect();

        let track_occupancy: BTreeMap<TrackId, Option<TrainId>> = self
            .track_occupancy
            .iter()
            .map(|(id, occupant)| (id.clone(), occupant.clone()))
            .collect();

        let failed_tracks = self.graph.failed_track_count();
        StateSnapshot {
            trains,
            platforms,
            track_occupancy,
            network_status: NetworkStatus {
                total_stations: self.graph.station_count(),
                total_tracks: self.graph.track_count(),
                operational_tracks: self.graph.operational_track_count(),
                failed_tracks,
                network_health: if failed_tracks == 0 { "healthy" } else { "degraded" },
            },
            timestamp: Utc::now(),
        }
    }

    /// Projected arrivals for every non-cancelled train with a parseable
    /// ETA, sorted by train id for stable downstream ordering.
    pub fn all_train_etas(&self) -> Vec<TrainEta> {
        let mut etas: Vec<TrainEta> = self
            .trains
            .values()
            .filter(|t| !t.is_cancelled())
            .filter_map(|t| {
                let info = t.eta_at_destination();
                let eta = info.eta?;
                Some(TrainEta {
                    train_id: t.id.clone(),
                    train_name: t.display_name(),
                    train_type: t.train_type,
                    priority: t.priority,
                    destination: info.destination,
                    eta,
                    scheduled_time: info.scheduled_time,
                    total_delay_mins: info.total_delay_mins,
                    weather: t.weather,
                    track_condition: t.track_condition,
                    time_of_day: t.time_of_day,
                })
            })
            .collect();
        etas.sort_by(|a, b| a.train_id.cmp(&b.train_id));
        etas
    }

    /// Persisted-schedule records reflecting all applied events and actions,
    /// ordered by train id.
    pub fn export_schedule(&self) -> Vec<ScheduleExport> {
        let mut exports: Vec<ScheduleExport> = self
            .trains
            .values()
            .map(|t| ScheduleExport {
                train_id: t.id.clone(),
                train_name: t.display_name(),
                train_type: t.train_type,
                priority: t.priority,
                section_start: t.section_start.clone(),
                section_end: t.section_end.clone(),
                scheduled_departure: t.scheduled_departure.clone(),
                scheduled_arrival: t.scheduled_arrival.clone(),
                current_delay_mins: t.actual_delay_mins,
                status: t.status.clone(),
                weather: t.weather,
                track_condition: t.track_condition,
                day_of_week: t.day_of_week.clone(),
                time_of_day: t.time_of_day,
                current_location: t.current_location.clone(),
                current_route: t.current_route.as_ref().map(|r| r.summary()),
            })
            .collect();
        exports.sort_by(|a, b| a.train_id.cmp(&b.train_id));
        exports
    }

    /// Write the persisted schedule as pretty JSON.
    pub fn write_schedule<W: Write>(&self, writer: W) -> TwinResult<()> {
        serde_json::to_writer_pretty(writer, &self.export_schedule())?;
        Ok(())
    }

    // ── Private helpers ───────────────────────────────────────────────────

    /// Assign the best time-optimal primary plus up to two distinct
    /// alternatives to every train.  Unroutable trains get empty slots.
    fn initialise_train_routes(&mut self) {
        let pathfinder = self.pathfinder;
        let graph = &self.graph;

        for train in self.trains.values_mut() {
            let primary = pathfinder.find_best_route(
                graph,
                train.section_start.as_str(),
                train.section_end.as_str(),
                train.train_type,
                Criterion::Time,
            );

            match primary {
                Some(primary) => {
                    let mut alternatives = pathfinder.find_alternative_routes(
                        graph,
                        train.section_start.as_str(),
                        train.section_end.as_str(),
                        train.train_type,
                        2,
                    );
                    alternatives.retain(|r| r != &primary);
                    train.set_routes(primary, alternatives);
                }
                None => {
                    warn!(
                        train = %train.id,
                        from = %train.section_start,
                        to = %train.section_end,
                        "no route available"
                    );
                    train.clear_routes();
                }
            }
        }
    }
}
