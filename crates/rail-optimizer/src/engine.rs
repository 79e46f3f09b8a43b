//! The optimizer engine: detect → generate → score → explain, per strategy.

use serde::Serialize;
use tracing::{debug, info, warn};

use rail_core::TrainType;
use rail_twin::{Action, Network, ScheduleExport};

use crate::conflict::{Conflict, ConflictDetector};
use crate::rationale::{self, BenefitsDrawbacks};
use crate::score::{Confidence, PriorityWeights, confidence, score_candidate};
use crate::solution::{SolutionCandidate, generate_solutions};
use crate::strategy::{StrategyKind, StrategyProfile};

// ── Config ────────────────────────────────────────────────────────────────────

/// Engine knobs.
///
/// `max_conflicts_per_call` is 1 by default: the engine resolves the first
/// detected conflict per invocation and only reports the rest in the count.
/// Both knobs are configuration so a severity-ordered multi-conflict loop can
/// be layered on without an interface change.
#[derive(Clone, Debug)]
pub struct OptimizerConfig {
    pub projection_horizon_mins: u32,
    pub max_conflicts_per_call: usize,
    pub priority_weights: PriorityWeights,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            projection_horizon_mins: 60,
            max_conflicts_per_call: 1,
            priority_weights: PriorityWeights::default(),
        }
    }
}

// ── Output types ──────────────────────────────────────────────────────────────

/// Result status of one strategy run.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize)]
pub enum RunStatus {
    ConflictFound,
    NoConflict,
    NoSolution,
}

/// The winning candidate with its score and explanation.
#[derive(Clone, Debug, Serialize)]
pub struct Recommendation {
    pub recommendation_id: String,
    pub action: SolutionCandidate,
    pub score: f64,
    pub confidence: Confidence,
    pub recommendation_text: String,
    pub reasoning: String,
}

/// Everything one strategy run produced.
#[derive(Clone, Debug, Serialize)]
pub struct StrategyOutcome {
    pub status: RunStatus,
    pub strategy: StrategyKind,
    pub strategy_name: &'static str,
    pub strategy_description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conflict_info: Option<Conflict>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<Recommendation>,
    pub total_conflicts: usize,
    pub benefits_drawbacks: BenefitsDrawbacks,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl StrategyOutcome {
    fn empty(profile: &StrategyProfile, status: RunStatus, message: &str) -> Self {
        Self {
            status,
            strategy: profile.kind,
            strategy_name: profile.name,
            strategy_description: profile.description,
            conflict_info: None,
            recommendation: None,
            total_conflicts: 0,
            benefits_drawbacks: BenefitsDrawbacks::default(),
            message: Some(message.to_owned()),
        }
    }
}

/// A strategy outcome plus the schedule that results from applying its
/// recommendation to a preview copy, as input for a downstream simulator.
#[derive(Clone, Debug, Serialize)]
pub struct StrategySchedule {
    #[serde(flatten)]
    pub outcome: StrategyOutcome,
    pub schedule_data: Vec<ScheduleExport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied_action: Option<Action>,
}

// ── Optimizer ─────────────────────────────────────────────────────────────────

/// The decision engine.  Stateless across invocations; all state lives in
/// the network passed to each call.
#[derive(Clone, Debug, Default)]
pub struct Optimizer {
    config: OptimizerConfig,
}

impl Optimizer {
    pub fn new(config: OptimizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Single-strategy run under the Balanced profile.
    ///
    /// Works on a deep copy, so the caller's network is never touched.
    pub fn run(&self, network: &Network) -> StrategyOutcome {
        self.run_strategy(network.clone(), &StrategyProfile::balanced())
    }

    /// Evaluate all three strategy profiles, each on its own deep copy of
    /// `network`, and return the outcomes in [`StrategyKind::all`] order.
    ///
    /// With the `parallel` feature the three evaluations run concurrently;
    /// they share nothing, so the results are identical either way.
    pub fn run_all_strategies(&self, network: &Network) -> Vec<StrategyOutcome> {
        let profiles = StrategyKind::all().map(StrategyProfile::for_kind);

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            profiles
                .par_iter()
                .map(|profile| self.run_strategy(network.clone(), profile))
                .collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            profiles
                .iter()
                .map(|profile| self.run_strategy(network.clone(), profile))
                .collect()
        }
    }

    /// Run all strategies, then apply each recommendation to its own preview
    /// copy and export the resulting schedule.
    pub fn generate_strategy_schedules(&self, network: &Network) -> Vec<StrategySchedule> {
        self.run_all_strategies(network)
            .into_iter()
            .map(|outcome| {
                let mut preview = network.clone();
                let applied_action =
                    outcome.recommendation.as_ref().map(|r| r.action.to_action());
                if let Some(action) = &applied_action {
                    if let Err(err) = preview.apply_action(action) {
                        warn!(strategy = %outcome.strategy, %err, "preview action failed");
                    }
                }
                StrategySchedule {
                    schedule_data: preview.export_schedule(),
                    applied_action,
                    outcome,
                }
            })
            .collect()
    }

    // ── Per-strategy pipeline ─────────────────────────────────────────────

    fn run_strategy(&self, network: Network, profile: &StrategyProfile) -> StrategyOutcome {
        let detector = ConflictDetector::new(self.config.projection_horizon_mins);
        let mut conflicts = detector.detect(&network);

        if conflicts.is_empty() {
            return StrategyOutcome::empty(
                profile,
                RunStatus::NoConflict,
                "No conflicts detected. All trains are running smoothly.",
            );
        }

        let total_conflicts = conflicts.len();
        if total_conflicts > self.config.max_conflicts_per_call {
            debug!(
                deferred = total_conflicts - self.config.max_conflicts_per_call,
                "further conflicts surfaced in the count only"
            );
        }
        let primary = conflicts.remove(0);

        let candidates = generate_solutions(&primary, &network);
        if candidates.is_empty() {
            let mut outcome = StrategyOutcome::empty(
                profile,
                RunStatus::NoSolution,
                "Conflict detected but no viable solutions found.",
            );
            outcome.conflict_info = Some(primary);
            outcome.total_conflicts = total_conflicts;
            return outcome;
        }

        // Score every candidate against its (still existing) train.
        struct Scored {
            score: f64,
            candidate: SolutionCandidate,
            train_priority: u8,
            train_name: String,
            train_type: TrainType,
        }
        let scored: Vec<Scored> = candidates
            .into_iter()
            .filter_map(|candidate| {
                let train = network.train(candidate.train_id.as_str())?;
                Some(Scored {
                    score: score_candidate(
                        &candidate,
                        train,
                        profile,
                        &self.config.priority_weights,
                    ),
                    candidate,
                    train_priority: train.priority,
                    train_name: train.display_name(),
                    train_type: train.train_type,
                })
            })
            .collect();

        let Some(best_index) = scored
            .iter()
            .enumerate()
            .min_by(|a, b| a.1.score.total_cmp(&b.1.score))
            .map(|(i, _)| i)
        else {
            let mut outcome = StrategyOutcome::empty(
                profile,
                RunStatus::NoSolution,
                "Conflict detected but no viable solutions found.",
            );
            outcome.conflict_info = Some(primary);
            outcome.total_conflicts = total_conflicts;
            return outcome;
        };

        let all_scores: Vec<f64> = scored.iter().map(|s| s.score).collect();
        let mut scored = scored;
        let best = scored.swap_remove(best_index);

        info!(
            strategy = %profile.kind,
            winner = %best.candidate.solution_id,
            score = best.score,
            "recommendation selected"
        );

        let benefits_drawbacks =
            rationale::analyse_benefits_drawbacks(profile, &best.candidate, best.train_type);
        let recommendation = Recommendation {
            recommendation_id: format!("R_{}", best.candidate.solution_id),
            recommendation_text: rationale::recommendation_text(
                &best.candidate,
                &best.train_name,
            ),
            reasoning: rationale::reasoning(best.train_priority, best.score, profile.name),
            score: best.score,
            confidence: confidence(&all_scores),
            action: best.candidate,
        };

        StrategyOutcome {
            status: RunStatus::ConflictFound,
            strategy: profile.kind,
            strategy_name: profile.name,
            strategy_description: profile.description,
            conflict_info: Some(primary),
            recommendation: Some(recommendation),
            total_conflicts,
            benefits_drawbacks,
            message: None,
        }
    }
}
