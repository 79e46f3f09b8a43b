//! Section-capacity conflict detection.
//!
//! Two trains projected to arrive at the same destination section within
//! less than the required safety buffer constitute a conflict.  The buffer
//! is dynamic: it depends on the pair's train types and the operating
//! conditions either train reports.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, warn};

use rail_core::{StationCode, TrackCondition, TrainId, TrainType, Weather, minutes_between};
use rail_twin::{Network, TrainEta};

// ── Severity ──────────────────────────────────────────────────────────────────

/// How urgent a conflict is, from an additive factor score.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Critical => "Critical",
        };
        f.write_str(s)
    }
}

// ── Conflict record ───────────────────────────────────────────────────────────

/// Environmental context of a conflict pair.
#[derive(Copy, Clone, Debug, Serialize)]
pub struct EnvironmentalFactors {
    pub weather_impact: bool,
    pub track_maintenance: bool,
}

/// One detected section-capacity conflict between two adjacent arrivals.
#[derive(Clone, Debug, Serialize)]
pub struct Conflict {
    pub conflict_id: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub location: StationCode,
    /// The two trains, earlier arrival first.
    pub affected_trains: Vec<TrainId>,
    pub train_details: Vec<TrainEta>,
    /// Arrival gap, rounded to 0.1 min.
    pub time_gap_minutes: f64,
    pub required_buffer_minutes: u32,
    pub severity: Severity,
    pub environmental_factors: EnvironmentalFactors,
    pub details: String,
}

// ── Detector ──────────────────────────────────────────────────────────────────

/// Projects arrivals and flags buffer violations.
#[derive(Copy, Clone, Debug)]
pub struct ConflictDetector {
    /// Advisory scan window; recorded with every scan.  ETAs are projected
    /// from schedule timestamps, so the detector does not clip against wall
    /// time.
    pub projection_horizon_mins: u32,
}

impl Default for ConflictDetector {
    fn default() -> Self {
        Self { projection_horizon_mins: 60 }
    }
}

impl ConflictDetector {
    pub fn new(projection_horizon_mins: u32) -> Self {
        Self { projection_horizon_mins }
    }

    /// Scan the network for section-capacity conflicts.
    ///
    /// Arrivals are grouped per destination and compared pairwise in ETA
    /// order, so each conflict involves two *adjacent* arrivals.  Returned
    /// conflicts are ordered by destination, then by arrival time.
    pub fn detect(&self, network: &Network) -> Vec<Conflict> {
        debug!(horizon_mins = self.projection_horizon_mins, "scanning for conflicts");

        let etas = network.all_train_etas();
        if etas.len() < 2 {
            return Vec::new();
        }

        // BTreeMap keeps destination order stable across runs.
        let mut by_destination: BTreeMap<StationCode, Vec<TrainEta>> = BTreeMap::new();
        for eta in etas {
            by_destination.entry(eta.destination.clone()).or_default().push(eta);
        }

        let mut conflicts = Vec::new();
        let mut seq = 0u32;

        for (destination, mut arrivals) in by_destination {
            if arrivals.len() < 2 {
                continue;
            }
            // Stable sort: equal ETAs keep train-id order.
            arrivals.sort_by_key(|e| e.eta);

            for pair in arrivals.windows(2) {
                let (a, b) = (&pair[0], &pair[1]);
                let buffer = required_buffer(a, b);
                let gap = minutes_between(a.eta, b.eta);

                if gap < buffer as f64 {
                    seq += 1;
                    let gap_rounded = (gap * 10.0).round() / 10.0;
                    let severity = conflict_severity(a, b, gap, buffer);
                    warn!(
                        %destination,
                        first = %a.train_id,
                        second = %b.train_id,
                        gap = gap_rounded,
                        buffer,
                        %severity,
                        "section capacity conflict"
                    );
                    conflicts.push(Conflict {
                        conflict_id: format!("C_{destination}_{seq:03}"),
                        kind: "SectionCapacityConflict",
                        location: destination.clone(),
                        affected_trains: vec![a.train_id.clone(), b.train_id.clone()],
                        train_details: vec![a.clone(), b.clone()],
                        time_gap_minutes: gap_rounded,
                        required_buffer_minutes: buffer,
                        severity,
                        environmental_factors: EnvironmentalFactors {
                            weather_impact: a.weather != Weather::Clear
                                || b.weather != Weather::Clear,
                            track_maintenance: a.track_condition == TrackCondition::Maintenance
                                || b.track_condition == TrackCondition::Maintenance,
                        },
                        details: format!(
                            "Trains {} and {} will arrive at {} within {gap_rounded} minutes \
                             (need {buffer} min buffer).",
                            a.train_name, b.train_name, destination
                        ),
                    });
                }
            }
        }

        conflicts
    }
}

// ── Buffer rules ──────────────────────────────────────────────────────────────

/// Minimum safe arrival gap for a pair of trains.
///
/// Base 10 min; two Express trains turn over faster (8); any Goods train
/// needs more room (20).  Adverse weather adds 5, track maintenance 10.
pub fn required_buffer(a: &TrainEta, b: &TrainEta) -> u32 {
    let mut buffer = 10;

    if a.train_type == TrainType::Express && b.train_type == TrainType::Express {
        buffer = 8;
    }
    if a.train_type == TrainType::Goods || b.train_type == TrainType::Goods {
        buffer = 20;
    }
    if a.weather.is_adverse() || b.weather.is_adverse() {
        buffer += 5;
    }
    if a.track_condition == TrackCondition::Maintenance
        || b.track_condition == TrackCondition::Maintenance
    {
        buffer += 10;
    }

    buffer
}

/// Additive severity score, thresholded to a [`Severity`] band.
fn conflict_severity(a: &TrainEta, b: &TrainEta, gap: f64, buffer: u32) -> Severity {
    let buffer = buffer as f64;
    let mut score = 0u32;

    // Tightness of the gap relative to the required buffer.
    if gap < buffer * 0.3 {
        score += 3;
    } else if gap < buffer * 0.6 {
        score += 2;
    } else {
        score += 1;
    }

    if a.priority <= 2 || b.priority <= 2 {
        score += 1;
    }
    if a.weather != Weather::Clear || b.weather != Weather::Clear {
        score += 1;
    }
    if a.track_condition == TrackCondition::Maintenance
        || b.track_condition == TrackCondition::Maintenance
    {
        score += 1;
    }
    if a.time_of_day.is_peak() || b.time_of_day.is_peak() {
        score += 1;
    }

    match score {
        s if s >= 5 => Severity::Critical,
        s if s >= 3 => Severity::High,
        s if s >= 2 => Severity::Medium,
        _ => Severity::Low,
    }
}
