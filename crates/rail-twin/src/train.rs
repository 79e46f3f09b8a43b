//! The train model: schedule state, route slots, and mutation operations.

use chrono::{Duration, NaiveDateTime};
use tracing::info;

use rail_core::{
    StationCode, TimeOfDay, TrackCondition, TrainId, TrainType, Weather, parse_schedule_time,
};
use rail_routing::Route;

use crate::TwinResult;
use crate::error::TwinError;
use crate::schedule::TrainRecord;

// ── ETA view ──────────────────────────────────────────────────────────────────

/// Breakdown of the delay total behind an ETA projection.
#[derive(Copy, Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct DelayFactors {
    pub reported_delay: u32,
    /// +5 in rain or fog.
    pub weather_delay: u32,
    /// +10 under track maintenance.
    pub track_delay: u32,
}

/// Projected arrival of one train at its destination.
///
/// `eta` is `None` when the scheduled arrival timestamp does not parse; the
/// delay total is still reported so operators see the accumulated delay even
/// for trains the projector cannot place on the clock.
#[derive(Clone, Debug, serde::Serialize)]
pub struct EtaInfo {
    pub destination: StationCode,
    pub scheduled_time: Option<NaiveDateTime>,
    pub eta: Option<NaiveDateTime>,
    pub total_delay_mins: u32,
    pub delay_factors: DelayFactors,
}

// ── Train ─────────────────────────────────────────────────────────────────────

/// One train's schedule, operational conditions, and assigned routes.
///
/// Trains are owned by their [`Network`](crate::Network) and mutated only
/// through `apply_event` / `apply_action` dispatch.
#[derive(Clone, Debug)]
pub struct Train {
    pub id: TrainId,
    pub train_type: TrainType,

    pub section_start: StationCode,
    pub section_end: StationCode,
    /// Raw schedule timestamps as carried by the file (parsed on demand).
    pub scheduled_departure: String,
    pub scheduled_arrival: String,

    pub day_of_week: String,
    pub time_of_day: TimeOfDay,
    pub weather: Weather,
    pub track_condition: TrackCondition,

    pub status: String,
    pub initial_reported_delay_mins: u32,
    pub actual_delay_mins: u32,
    pub current_location: StationCode,

    /// Derived at construction; 1 (highest) … 5 (lowest).
    pub priority: u8,

    pub primary_route: Option<Route>,
    pub alternative_routes: Vec<Route>,
    pub current_route: Option<Route>,
}

impl Train {
    /// Build a train from a schedule record, resolving endpoints from either
    /// the flat fields or the enhanced `Route` array.
    pub fn from_record(record: &TrainRecord) -> TwinResult<Self> {
        let (section_start, section_end, departure, arrival) = if let (Some(first), Some(last)) =
            (record.route.first(), record.route.last())
        {
            (
                first.station_id.clone(),
                last.station_id.clone(),
                first.departure_time.clone(),
                last.arrival_time.clone(),
            )
        } else {
            match (
                &record.section_start,
                &record.section_end,
                &record.scheduled_departure_time,
                &record.scheduled_arrival_time,
            ) {
                (Some(start), Some(end), Some(dep), Some(arr)) => {
                    (start.clone(), end.clone(), dep.clone(), arr.clone())
                }
                _ => {
                    return Err(TwinError::MissingEndpoints { train: record.train_id.clone() });
                }
            }
        };

        let priority = derive_priority(record.train_type, record.time_of_day);

        Ok(Self {
            id: record.train_id.clone(),
            train_type: record.train_type,
            current_location: section_start.clone(),
            section_start,
            section_end,
            scheduled_departure: departure,
            scheduled_arrival: arrival,
            day_of_week: record.day_of_week.clone(),
            time_of_day: record.time_of_day,
            weather: record.weather,
            track_condition: record.track_condition,
            status: "On-Time".to_owned(),
            initial_reported_delay_mins: record.initial_reported_delay_mins,
            actual_delay_mins: record.actual_delay_mins,
            priority,
            primary_route: None,
            alternative_routes: Vec::new(),
            current_route: None,
        })
    }

    /// Display name, e.g. `Express 12001_SHATABDI`.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.train_type, self.id)
    }

    /// Cancelled trains drop out of ETA projection and conflict detection.
    pub fn is_cancelled(&self) -> bool {
        self.status.starts_with("Cancelled")
    }

    // ── Projection ────────────────────────────────────────────────────────

    /// Project the arrival at the destination: scheduled arrival plus the
    /// accumulated delay and environmental adjustments.
    pub fn eta_at_destination(&self) -> EtaInfo {
        let delay_factors = DelayFactors {
            reported_delay: self.actual_delay_mins,
            weather_delay: if self.weather.is_adverse() { 5 } else { 0 },
            track_delay: if self.track_condition == TrackCondition::Maintenance { 10 } else { 0 },
        };
        let total_delay_mins = delay_factors.reported_delay
            + delay_factors.weather_delay
            + delay_factors.track_delay;

        let scheduled_time = parse_schedule_time(&self.scheduled_arrival);
        let eta = scheduled_time.map(|t| t + Duration::minutes(total_delay_mins as i64));

        EtaInfo {
            destination: self.section_end.clone(),
            scheduled_time,
            eta,
            total_delay_mins,
            delay_factors,
        }
    }

    // ── Route assignment ──────────────────────────────────────────────────

    /// Assign primary and alternative routes; the primary becomes current.
    pub fn set_routes(&mut self, primary: Route, alternatives: Vec<Route>) {
        self.primary_route = Some(primary.clone());
        self.alternative_routes = alternatives;
        self.current_route = Some(primary);
    }

    /// Empty all route slots (unroutable train).
    pub fn clear_routes(&mut self) {
        self.primary_route = None;
        self.alternative_routes.clear();
        self.current_route = None;
    }

    /// Switch the current route to `alternative_routes[index]`, absorbing
    /// the extra travel time as delay.  Returns `false` if the index is out
    /// of range (state unchanged).
    pub fn switch_to_alternative_route(&mut self, index: usize) -> bool {
        let Some(alt) = self.alternative_routes.get(index) else {
            return false;
        };

        let primary_time = self
            .primary_route
            .as_ref()
            .map(|r| r.total_time_minutes)
            .unwrap_or(0);
        let additional_delay = alt.total_time_minutes.saturating_sub(primary_time);

        self.current_route = Some(alt.clone());
        self.actual_delay_mins += additional_delay;
        self.status = format!(
            "Rerouted via {}",
            self.current_route.as_ref().map(|r| r.route_type.as_str()).unwrap_or("unknown")
        );
        info!(
            train = %self.id,
            index,
            additional_delay,
            "switched to alternative route"
        );
        true
    }

    // ── Mutations ─────────────────────────────────────────────────────────

    /// Add delay and mark the train delayed.
    pub fn apply_delay(&mut self, additional_delay_mins: u32, reason: Option<&str>) {
        self.actual_delay_mins += additional_delay_mins;
        self.status = match reason {
            Some(r) => format!("Delayed ({r})"),
            None => "Delayed".to_owned(),
        };
    }

    /// Hold the train in place; equivalent to a delay with a halt status.
    pub fn apply_halt(&mut self, halt_duration_mins: u32, reason: &str) {
        self.actual_delay_mins += halt_duration_mins;
        self.status = format!("Halted ({reason}) - {halt_duration_mins} min");
        info!(train = %self.id, halt_duration_mins, reason, "halted");
    }

    /// Cancel the service.
    pub fn apply_cancellation(&mut self, reason: &str) {
        self.status = format!("Cancelled ({reason})");
        info!(train = %self.id, reason, "cancelled");
    }

    /// Scale the running speed.  A factor above 1 slows the train and adds
    /// `⌊(factor − 1)·60⌋` minutes of delay; below 1 speeds it up and
    /// recovers `⌊(1 − factor)·60⌋` minutes, floored at zero.
    ///
    /// The factor must be positive; [`Network::apply_action`]
    /// (crate::Network::apply_action) rejects non-positive factors before
    /// calling this.
    pub fn apply_speed_adjustment(&mut self, factor: f64, reason: &str) {
        debug_assert!(factor > 0.0, "speed factor must be positive");
        if factor > 1.0 {
            let additional = ((factor - 1.0) * 60.0) as u32;
            self.actual_delay_mins += additional;
            self.status = format!("Speed Reduced ({reason})");
        } else if factor < 1.0 {
            let recovered = ((1.0 - factor) * 60.0) as u32;
            self.actual_delay_mins = self.actual_delay_mins.saturating_sub(recovered);
            self.status = format!("Speed Increased ({reason})");
        }
        info!(train = %self.id, factor, delay = self.actual_delay_mins, "speed adjusted");
    }
}

// ── Priority derivation ───────────────────────────────────────────────────────

/// Base priority from the train type, bumped one step up during peak hours,
/// clamped to 1.
fn derive_priority(train_type: TrainType, time_of_day: TimeOfDay) -> u8 {
    let base = train_type.base_priority();
    if time_of_day.is_peak() { base.saturating_sub(1).max(1) } else { base }
}
