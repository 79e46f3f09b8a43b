//! Strategy profiles: named weight vectors over the scorer.

use serde::{Deserialize, Serialize};

use rail_core::TrainType;
use rail_twin::ActionKind;

// ── StrategyKind ──────────────────────────────────────────────────────────────

/// The built-in optimization strategies.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    Balanced,
    Punctuality,
    Throughput,
}

impl StrategyKind {
    /// All strategies in evaluation order.
    pub fn all() -> [StrategyKind; 3] {
        [StrategyKind::Balanced, StrategyKind::Punctuality, StrategyKind::Throughput]
    }

    pub fn key(self) -> &'static str {
        match self {
            StrategyKind::Balanced => "balanced",
            StrategyKind::Punctuality => "punctuality",
            StrategyKind::Throughput => "throughput",
        }
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

// ── StrategyProfile ───────────────────────────────────────────────────────────

/// Weight vector controlling the scorer's trade-off between passenger
/// punctuality and freight throughput.
///
/// All multipliers scale a cost, so a value *below* 1 makes disrupting the
/// named train class (or taking the named action) cheaper, and the strategy
/// correspondingly more willing to do it.
#[derive(Clone, Debug, Serialize)]
pub struct StrategyProfile {
    pub kind: StrategyKind,
    pub name: &'static str,
    pub description: &'static str,

    pub express_priority: f64,
    pub passenger_priority: f64,
    pub goods_priority: f64,
    pub halt_penalty: f64,
    pub reroute_penalty: f64,
    pub cancel_penalty: f64,
    pub peak_hour: f64,
}

impl StrategyProfile {
    /// No adjustments: all train classes and actions weighted equally.
    pub fn balanced() -> Self {
        Self {
            kind: StrategyKind::Balanced,
            name: "Balanced Approach",
            description: "A balanced approach to minimize overall network disruption while \
                          considering all train types equally.",
            express_priority: 1.0,
            passenger_priority: 1.0,
            goods_priority: 1.0,
            halt_penalty: 1.0,
            reroute_penalty: 1.0,
            cancel_penalty: 1.0,
            peak_hour: 1.0,
        }
    }

    /// Keep passengers on time: disrupting Express/Passenger is cheap,
    /// disrupting Goods is expensive, halting anything costs extra.
    pub fn punctuality() -> Self {
        Self {
            kind: StrategyKind::Punctuality,
            name: "Punctuality First",
            description: "Prioritizes on-time performance for passenger trains, especially \
                          high-priority services like Express trains.",
            express_priority: 0.6,
            passenger_priority: 0.7,
            goods_priority: 1.5,
            halt_penalty: 1.3,
            reroute_penalty: 0.8,
            cancel_penalty: 0.9,
            peak_hour: 0.5,
        }
    }

    /// Keep the network moving: freight flows, strategic halts are cheap,
    /// peak capacity is protected.
    pub fn throughput() -> Self {
        Self {
            kind: StrategyKind::Throughput,
            name: "Maximum Throughput",
            description: "Focuses on network efficiency, keeping the maximum number of trains \
                          moving and prioritizing goods flow.",
            express_priority: 1.3,
            passenger_priority: 1.2,
            goods_priority: 0.5,
            halt_penalty: 0.8,
            reroute_penalty: 1.1,
            cancel_penalty: 1.0,
            peak_hour: 1.2,
        }
    }

    pub fn for_kind(kind: StrategyKind) -> Self {
        match kind {
            StrategyKind::Balanced => Self::balanced(),
            StrategyKind::Punctuality => Self::punctuality(),
            StrategyKind::Throughput => Self::throughput(),
        }
    }

    /// Multiplier applied to the priority weight of the affected train.
    pub fn type_multiplier(&self, train_type: TrainType) -> f64 {
        match train_type {
            TrainType::Express => self.express_priority,
            TrainType::Passenger => self.passenger_priority,
            TrainType::Goods => self.goods_priority,
            TrainType::Local => 1.0,
        }
    }

    /// Multiplier applied to the base cost of the proposed action.
    pub fn action_multiplier(&self, action: ActionKind) -> f64 {
        match action {
            ActionKind::Halt => self.halt_penalty,
            ActionKind::Reroute => self.reroute_penalty,
            ActionKind::Cancel => self.cancel_penalty,
            ActionKind::SpeedAdjust => 1.0,
        }
    }
}
