//! Schedule file records: loading and persisted output.
//!
//! # Input format
//!
//! An ordered JSON list of train records.  Two shapes are accepted:
//!
//! - **flat**: `Section_Start` / `Section_End` plus
//!   `Scheduled_Departure_Time` / `Scheduled_Arrival_Time`;
//! - **enhanced**: a `Route` array of per-station stops; endpoints and
//!   schedule times are taken from the first and last entries.
//!
//! Optional keys (`Train_Type`, `Day_of_Week`, `Time_of_Day`, `Weather`,
//! `Track_Condition`, `Initial_Reported_Delay_Mins`, `Actual_Delay_Mins`)
//! default per the wire conventions.  When the same `Train_ID` appears twice
//! the later record wins (map semantics in the twin).
//!
//! # Output format
//!
//! [`ScheduleExport`] is the persisted-schedule record the network emits on
//! request: current status, accumulated delay, conditions, and a summary of
//! the route in force, suitable for feeding a downstream simulator.

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use rail_core::{StationCode, TimeOfDay, TrackCondition, TrainId, TrainType, Weather};
use rail_routing::RouteSummary;

use crate::TwinResult;

fn default_day() -> String {
    "Monday".to_owned()
}

// ── Input records ─────────────────────────────────────────────────────────────

/// One stop of an enhanced-format schedule record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteStop {
    #[serde(rename = "Station_ID")]
    pub station_id: StationCode,
    #[serde(rename = "Arrival_Time")]
    pub arrival_time: String,
    #[serde(rename = "Departure_Time")]
    pub departure_time: String,
}

/// One train record as carried by the schedule file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrainRecord {
    #[serde(rename = "Train_ID")]
    pub train_id: TrainId,

    #[serde(rename = "Train_Type", default)]
    pub train_type: TrainType,

    // Flat form; ignored when a Route array is present.
    #[serde(rename = "Section_Start", default, skip_serializing_if = "Option::is_none")]
    pub section_start: Option<StationCode>,
    #[serde(rename = "Section_End", default, skip_serializing_if = "Option::is_none")]
    pub section_end: Option<StationCode>,
    #[serde(
        rename = "Scheduled_Departure_Time",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub scheduled_departure_time: Option<String>,
    #[serde(
        rename = "Scheduled_Arrival_Time",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub scheduled_arrival_time: Option<String>,

    // Enhanced form.
    #[serde(rename = "Route", default, skip_serializing_if = "Vec::is_empty")]
    pub route: Vec<RouteStop>,

    #[serde(rename = "Day_of_Week", default = "default_day")]
    pub day_of_week: String,
    #[serde(rename = "Time_of_Day", default)]
    pub time_of_day: TimeOfDay,
    #[serde(rename = "Weather", default)]
    pub weather: Weather,
    #[serde(rename = "Track_Condition", default)]
    pub track_condition: TrackCondition,

    #[serde(rename = "Initial_Reported_Delay_Mins", default)]
    pub initial_reported_delay_mins: u32,
    #[serde(rename = "Actual_Delay_Mins", default)]
    pub actual_delay_mins: u32,
}

/// Load the ordered schedule list from any reader.
pub fn load_schedule_reader<R: Read>(reader: R) -> TwinResult<Vec<TrainRecord>> {
    Ok(serde_json::from_reader(reader)?)
}

/// Load the ordered schedule list from a file path.
pub fn load_schedule_path<P: AsRef<Path>>(path: P) -> TwinResult<Vec<TrainRecord>> {
    let file = std::fs::File::open(path)?;
    load_schedule_reader(std::io::BufReader::new(file))
}

// ── Output record ─────────────────────────────────────────────────────────────

/// Persisted-schedule entry reflecting a train's current state.
#[derive(Clone, Debug, Serialize)]
pub struct ScheduleExport {
    pub train_id: TrainId,
    pub train_name: String,
    pub train_type: TrainType,
    pub priority: u8,
    pub section_start: StationCode,
    pub section_end: StationCode,
    pub scheduled_departure: String,
    pub scheduled_arrival: String,
    pub current_delay_mins: u32,
    pub status: String,
    pub weather: Weather,
    pub track_condition: TrackCondition,
    pub day_of_week: String,
    pub time_of_day: TimeOfDay,
    pub current_location: StationCode,
    /// Summary of the route in force, when the train has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_route: Option<RouteSummary>,
}
