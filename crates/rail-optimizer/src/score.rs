//! Candidate scoring.  Lower is better.
//!
//! ```text
//! score = (C₀·action_mult + duration_penalty + weather + track
//!          + reroute_addon + time) × priority_weight × peak_mult
//! ```
//!
//! rounded to two decimals.  `C₀` is the intrinsic disruptiveness of the
//! action; everything else scales it by who is affected and when.

use rustc_hash::FxHashMap;
use serde::Serialize;

use rail_core::TrainType;
use rail_twin::{ActionKind, Train};

use crate::solution::SolutionCandidate;
use crate::strategy::StrategyProfile;

// ── Priority weights ──────────────────────────────────────────────────────────

/// Caller-configurable mapping from train priority (1..=5) to the weight
/// multiplying every score for that train.  High weights make high-priority
/// trains expensive to disrupt.
#[derive(Clone, Debug)]
pub struct PriorityWeights(FxHashMap<u8, f64>);

impl Default for PriorityWeights {
    fn default() -> Self {
        Self(FxHashMap::from_iter([
            (1, 100.0),
            (2, 80.0),
            (3, 50.0),
            (4, 20.0),
            (5, 5.0),
        ]))
    }
}

impl PriorityWeights {
    pub fn new(weights: FxHashMap<u8, f64>) -> Self {
        Self(weights)
    }

    /// Weight for a priority level; unmapped levels fall back to 50.
    pub fn weight(&self, priority: u8) -> f64 {
        self.0.get(&priority).copied().unwrap_or(50.0)
    }
}

// ── Scoring ───────────────────────────────────────────────────────────────────

/// Intrinsic disruptiveness of an action, before any strategy weighting.
fn base_action_cost(action: ActionKind) -> f64 {
    match action {
        ActionKind::Halt => 1.0,
        ActionKind::SpeedAdjust => 0.5,
        ActionKind::Reroute => 5.0,
        ActionKind::Cancel => 50.0,
    }
}

/// Cost of holding `train` for `duration` minutes: half a point per minute,
/// scaled by how delay-sensitive the train class is, ×1.5 at peak.
fn duration_penalty(duration: u32, train: &Train) -> f64 {
    let type_scale = match train.train_type {
        TrainType::Express => 2.0,
        TrainType::Passenger => 1.0,
        TrainType::Local => 0.6,
        TrainType::Goods => 0.4,
    };
    let peak_scale = if train.time_of_day.is_peak() { 1.5 } else { 1.0 };
    duration as f64 * 0.5 * type_scale * peak_scale
}

/// Extra cost of a reroute, from how much worse the alternative is than the
/// route in force: longer distance, extra stops, and fallback route classes
/// all add; Express magnifies the penalty, Goods shrinks it.
fn reroute_addon(candidate: &SolutionCandidate, train: &Train) -> f64 {
    let Some(alt) = &candidate.alternative_route else {
        return 0.0;
    };

    let mut penalty = 0.0;
    if let Some(current) = &train.current_route {
        penalty += 0.5 * (alt.total_distance_km - current.total_distance_km).max(0.0);
    }
    let extra_stops = alt.stations.len().saturating_sub(3);
    penalty += 2.0 * extra_stops as f64;
    match alt.route_type.as_str() {
        "emergency" => penalty += 15.0,
        "alternative" => penalty += 5.0,
        _ => {}
    }

    match train.train_type {
        TrainType::Express => penalty * 1.5,
        TrainType::Goods => penalty * 0.7,
        _ => penalty,
    }
}

/// Score `candidate` for `train` under a strategy profile.  Lower is better.
pub fn score_candidate(
    candidate: &SolutionCandidate,
    train: &Train,
    profile: &StrategyProfile,
    weights: &PriorityWeights,
) -> f64 {
    let action_cost =
        base_action_cost(candidate.action_type) * profile.action_multiplier(candidate.action_type);
    let duration = duration_penalty(candidate.duration_mins, train);
    let reroute = reroute_addon(candidate, train);
    let env = &candidate.environmental_adjustment;

    let priority_mult = weights.weight(train.priority) * profile.type_multiplier(train.train_type);
    let peak_mult = if train.time_of_day.is_peak() { profile.peak_hour } else { 1.0 };

    let raw = (action_cost + duration + env.weather_factor + env.track_factor + reroute
        + env.time_factor)
        * priority_mult
        * peak_mult;

    (raw * 100.0).round() / 100.0
}

// ── Confidence ────────────────────────────────────────────────────────────────

/// How decisively the best candidate beat the field.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize)]
pub enum Confidence {
    Low,
    Medium,
    High,
}

/// Confidence from the gap between the two lowest scores.  A lone candidate
/// is Medium.
pub fn confidence(all_scores: &[f64]) -> Confidence {
    if all_scores.len() <= 1 {
        return Confidence::Medium;
    }
    let mut sorted = all_scores.to_vec();
    sorted.sort_by(f64::total_cmp);
    let gap = sorted[1] - sorted[0];
    if gap > 50.0 {
        Confidence::High
    } else if gap > 20.0 {
        Confidence::Medium
    } else {
        Confidence::Low
    }
}
