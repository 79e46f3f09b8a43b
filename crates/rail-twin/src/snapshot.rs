//! Serialisable views of the twin's state.
//!
//! Maps use `BTreeMap` so snapshot JSON is stable across runs; operators
//! diff consecutive snapshots.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;

use rail_core::{
    StationCode, TimeOfDay, TrackCondition, TrackId, TrainId, TrainType, Weather,
};
use crate::train::Train;

// ── Route info ────────────────────────────────────────────────────────────────

/// The route a train is running, or the fact it has none.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "route_status", rename_all = "snake_case")]
pub enum RouteInfo {
    Active {
        route_type: String,
        stations: Vec<StationCode>,
        total_time_minutes: u32,
        total_distance_km: f64,
        segment_count: usize,
        alternative_routes_available: usize,
    },
    NoRoute {
        origin: StationCode,
        destination: StationCode,
    },
}

impl RouteInfo {
    pub fn for_train(train: &Train) -> Self {
        match &train.current_route {
            Some(route) => RouteInfo::Active {
                route_type: route.route_type.clone(),
                stations: route.stations.clone(),
                total_time_minutes: route.total_time_minutes,
                total_distance_km: route.total_distance_km,
                segment_count: route.segments.len(),
                alternative_routes_available: train.alternative_routes.len(),
            },
            None => RouteInfo::NoRoute {
                origin: train.section_start.clone(),
                destination: train.section_end.clone(),
            },
        }
    }
}

// ── Train state ───────────────────────────────────────────────────────────────

/// Full status record for one train, as embedded in the state snapshot.
#[derive(Clone, Debug, Serialize)]
pub struct TrainState {
    pub train_id: TrainId,
    pub train_name: String,
    pub train_type: TrainType,
    pub priority: u8,
    pub status: String,
    pub section_start: StationCode,
    pub section_end: StationCode,
    pub scheduled_departure: String,
    pub scheduled_arrival: String,
    pub current_delay_mins: u32,
    pub initial_reported_delay: u32,
    pub current_location: StationCode,
    pub day_of_week: String,
    pub time_of_day: TimeOfDay,
    pub weather: Weather,
    pub track_condition: TrackCondition,
    pub route_info: RouteInfo,
}

impl TrainState {
    pub fn for_train(train: &Train) -> Self {
        Self {
            train_id: train.id.clone(),
            train_name: train.display_name(),
            train_type: train.train_type,
            priority: train.priority,
            status: train.status.clone(),
            section_start: train.section_start.clone(),
            section_end: train.section_end.clone(),
            scheduled_departure: train.scheduled_departure.clone(),
            scheduled_arrival: train.scheduled_arrival.clone(),
            current_delay_mins: train.actual_delay_mins,
            initial_reported_delay: train.initial_reported_delay_mins,
            current_location: train.current_location.clone(),
            day_of_week: train.day_of_week.clone(),
            time_of_day: train.time_of_day,
            weather: train.weather,
            track_condition: train.track_condition,
            route_info: RouteInfo::for_train(train),
        }
    }
}

// ── Network status ────────────────────────────────────────────────────────────

/// Aggregate network health.
#[derive(Clone, Debug, Serialize)]
pub struct NetworkStatus {
    pub total_stations: usize,
    pub total_tracks: usize,
    pub operational_tracks: usize,
    pub failed_tracks: usize,
    /// `"healthy"` iff no track is disabled, else `"degraded"`.
    pub network_health: &'static str,
}

// ── State snapshot ────────────────────────────────────────────────────────────

/// A complete, serialisable picture of the network at one instant.
#[derive(Clone, Debug, Serialize)]
pub struct StateSnapshot {
    pub trains: BTreeMap<TrainId, TrainState>,
    /// station → platform number (1-based) → occupying train.
    pub platforms: BTreeMap<StationCode, BTreeMap<u32, Option<TrainId>>>,
    pub track_occupancy: BTreeMap<TrackId, Option<TrainId>>,
    pub network_status: NetworkStatus,
    pub timestamp: DateTime<Utc>,
}

// ── ETA record ────────────────────────────────────────────────────────────────

/// One projected arrival, as consumed by the conflict detector.
#[derive(Clone, Debug, Serialize)]
pub struct TrainEta {
    pub train_id: TrainId,
    pub train_name: String,
    pub train_type: TrainType,
    pub priority: u8,
    pub destination: StationCode,
    pub eta: NaiveDateTime,
    pub scheduled_time: Option<NaiveDateTime>,
    pub total_delay_mins: u32,
    pub weather: Weather,
    pub track_condition: TrackCondition,
    pub time_of_day: TimeOfDay,
}
