//! Candidate generation: which remediation actions are worth scoring for a
//! given conflict.

use serde::Serialize;
use tracing::debug;

use rail_core::{TrackCondition, TrainId, TrainType};
use rail_routing::RouteSummary;
use rail_twin::{Action, ActionKind, Network, Train};

use crate::conflict::Conflict;

// ── Candidate ─────────────────────────────────────────────────────────────────

/// Environmental adjustments folded into a candidate's score.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct EnvironmentalAdjustment {
    /// +5 in rain or fog.
    pub weather_factor: f64,
    /// +10 under track maintenance.
    pub track_factor: f64,
    /// −2 at peak.
    pub time_factor: f64,
}

impl EnvironmentalAdjustment {
    fn for_train(train: &Train) -> Self {
        Self {
            weather_factor: if train.weather.is_adverse() { 5.0 } else { 0.0 },
            track_factor: if train.track_condition == TrackCondition::Maintenance {
                10.0
            } else {
                0.0
            },
            time_factor: if train.time_of_day.is_peak() { -2.0 } else { 0.0 },
        }
    }
}

/// One proposed remediation, ready for scoring.
#[derive(Clone, Debug, Serialize)]
pub struct SolutionCandidate {
    /// Stable id, e.g. `HALT_18205_GOODS_15`.
    pub solution_id: String,
    pub action_type: ActionKind,
    pub train_id: TrainId,
    pub duration_mins: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternative_route: Option<RouteSummary>,
    pub description: String,
    pub environmental_adjustment: EnvironmentalAdjustment,
}

impl SolutionCandidate {
    /// Action envelope that applies this candidate to a network.
    ///
    /// A SpeedAdjust converts its buffer minutes back into a slowdown
    /// factor (1 + minutes/60), the inverse of the train's delay mapping.
    pub fn to_action(&self) -> Action {
        Action {
            action_type: self.action_type,
            train_id: self.train_id.clone(),
            duration_mins: match self.action_type {
                ActionKind::Halt => Some(self.duration_mins as i64),
                _ => None,
            },
            route_index: self.route_index,
            speed_factor: match self.action_type {
                ActionKind::SpeedAdjust => Some(1.0 + self.duration_mins as f64 / 60.0),
                _ => None,
            },
            description: Some(self.description.clone()),
        }
    }
}

// ── Generation ────────────────────────────────────────────────────────────────

/// Propose candidates for every train involved in `conflict`.
///
/// Per train: a menu of halt durations shaped by its type and conditions;
/// a speed adjustment for high-priority Express services; one reroute per
/// available alternative for freight/local or low-priority trains; and a
/// cancellation for bottom-priority goods trains.
pub fn generate_solutions(conflict: &Conflict, network: &Network) -> Vec<SolutionCandidate> {
    let buffer = conflict.required_buffer_minutes;
    let mut candidates = Vec::new();

    for train_id in &conflict.affected_trains {
        let Some(train) = network.train(train_id.as_str()) else {
            continue;
        };
        let environmental_adjustment = EnvironmentalAdjustment::for_train(train);

        // Halts.
        for duration in halt_durations(train, buffer) {
            candidates.push(SolutionCandidate {
                solution_id: format!("HALT_{}_{duration}", train.id),
                action_type: ActionKind::Halt,
                train_id: train.id.clone(),
                duration_mins: duration,
                route_index: None,
                alternative_route: None,
                description: format!("Halt {} for {duration} minutes", train.display_name()),
                environmental_adjustment,
            });
        }

        // Speed adjustment: only worth it for fast, high-priority services.
        if train.train_type == TrainType::Express && train.priority <= 2 {
            let duration = buffer / 2;
            candidates.push(SolutionCandidate {
                solution_id: format!("SPEED_ADJUST_{}", train.id),
                action_type: ActionKind::SpeedAdjust,
                train_id: train.id.clone(),
                duration_mins: duration,
                route_index: None,
                alternative_route: None,
                description: format!(
                    "Reduce speed of {} to create {duration} min buffer",
                    train.display_name()
                ),
                environmental_adjustment,
            });
        }

        // Reroutes: freight, local, or low-priority trains with alternatives.
        let reroutable = matches!(train.train_type, TrainType::Goods | TrainType::Local)
            || train.priority >= 4;
        if reroutable {
            let current_time = train
                .current_route
                .as_ref()
                .map(|r| r.total_time_minutes)
                .unwrap_or(0);
            for (index, alt) in train.alternative_routes.iter().enumerate() {
                let additional_time = alt.total_time_minutes.saturating_sub(current_time);
                candidates.push(SolutionCandidate {
                    solution_id: format!("REROUTE_{}_{index}", train.id),
                    action_type: ActionKind::Reroute,
                    train_id: train.id.clone(),
                    duration_mins: additional_time,
                    route_index: Some(index),
                    alternative_route: Some(alt.summary()),
                    description: format!(
                        "Reroute {} via {} route (+{additional_time} min)",
                        train.display_name(),
                        alt.route_type
                    ),
                    environmental_adjustment,
                });
            }
        }
    }

    // Last resort: temporary cancellation of bottom-priority goods trains.
    for train_id in &conflict.affected_trains {
        let Some(train) = network.train(train_id.as_str()) else {
            continue;
        };
        if train.priority == 5 && train.train_type == TrainType::Goods {
            candidates.push(SolutionCandidate {
                solution_id: format!("CANCEL_{}", train.id),
                action_type: ActionKind::Cancel,
                train_id: train.id.clone(),
                duration_mins: 0,
                route_index: None,
                alternative_route: None,
                description: format!(
                    "Temporarily cancel {} (reschedule later)",
                    train.display_name()
                ),
                environmental_adjustment: EnvironmentalAdjustment::for_train(train),
            });
        }
    }

    debug!(count = candidates.len(), conflict = %conflict.conflict_id, "candidates generated");
    candidates
}

/// Halt-duration menu per train type, widened under adverse conditions.
fn halt_durations(train: &Train, buffer: u32) -> Vec<u32> {
    let mut durations: Vec<u32> = match train.train_type {
        TrainType::Express => vec![5, 10, buffer],
        TrainType::Passenger => vec![10, 15, buffer + 5],
        TrainType::Goods => vec![15, 20, 30, buffer + 10],
        TrainType::Local => vec![10, 15, 20],
    };

    if train.weather.is_adverse() {
        for d in &mut durations {
            *d += 5;
        }
    }
    if train.track_condition == TrackCondition::Maintenance {
        for d in &mut durations {
            *d += 10;
        }
    }

    durations
}
