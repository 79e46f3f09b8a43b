//! Human-facing explanation of a recommendation: text, reasoning, and the
//! benefits/drawbacks panel.

use serde::Serialize;

use rail_core::TrainType;
use rail_twin::ActionKind;

use crate::solution::SolutionCandidate;
use crate::strategy::{StrategyKind, StrategyProfile};

// ── Benefits / drawbacks ──────────────────────────────────────────────────────

/// The trade-off panel shown next to a recommendation.
#[derive(Clone, Debug, Default, Serialize)]
pub struct BenefitsDrawbacks {
    pub benefits: Vec<String>,
    pub drawbacks: Vec<String>,
}

/// Analyse a chosen candidate from the strategy's point of view.
///
/// Strategy-level items state what the weight vector optimises for;
/// action-level items quantify this particular intervention.
pub fn analyse_benefits_drawbacks(
    profile: &StrategyProfile,
    candidate: &SolutionCandidate,
    train_type: TrainType,
) -> BenefitsDrawbacks {
    let mut benefits = Vec::new();
    let mut drawbacks = Vec::new();

    match profile.kind {
        StrategyKind::Punctuality => {
            benefits.extend([
                "Prioritizes on-time performance for high-value passenger services".to_owned(),
                "Minimizes cascading delays for time-sensitive trains".to_owned(),
                "Maintains passenger satisfaction and service reliability".to_owned(),
            ]);
            if candidate.action_type == ActionKind::Halt && train_type == TrainType::Goods {
                benefits.push(
                    "Preserves premium train schedules by delaying lower-priority services"
                        .to_owned(),
                );
            }
            drawbacks.extend([
                "May significantly impact goods transportation schedules".to_owned(),
                "Could create bottlenecks in freight corridors".to_owned(),
                "Higher operational costs due to priority given to passenger services".to_owned(),
            ]);
        }
        StrategyKind::Throughput => {
            benefits.extend([
                "Maximizes overall network capacity utilization".to_owned(),
                "Keeps goods and freight moving efficiently".to_owned(),
                "Optimizes infrastructure usage across the entire network".to_owned(),
                "Maintains steady flow of economic freight traffic".to_owned(),
            ]);
            if candidate.action_type == ActionKind::Halt && train_type == TrainType::Express {
                drawbacks.push("Delays high-priority passenger services".to_owned());
            }
            drawbacks.extend([
                "May cause delays for individual passenger trains".to_owned(),
                "Potential reduction in passenger service quality".to_owned(),
                "Could impact premium service reputation".to_owned(),
            ]);
        }
        StrategyKind::Balanced => {
            benefits.extend([
                "Provides a fair compromise between all service types".to_owned(),
                "Minimizes overall network disruption".to_owned(),
                "Maintains operational stability across passenger and freight services"
                    .to_owned(),
            ]);
            drawbacks.extend([
                "May not fully optimize for any specific priority".to_owned(),
                "Moderate impact on both passenger and freight services".to_owned(),
                "Compromise solution may not satisfy specialized operational goals".to_owned(),
            ]);
        }
    }

    match candidate.action_type {
        ActionKind::Halt => {
            let duration = candidate.duration_mins;
            if duration > 30 {
                drawbacks.push(format!(
                    "Extended {duration}-minute halt may cause significant passenger inconvenience"
                ));
            } else {
                benefits.push(format!(
                    "Short {duration}-minute halt minimizes overall disruption"
                ));
            }
        }
        ActionKind::Reroute => {
            benefits.push("Maintains train movement while avoiding conflict zones".to_owned());
            if candidate.duration_mins > 0 {
                drawbacks.push(format!(
                    "Alternative route adds approximately {} minutes to journey",
                    candidate.duration_mins
                ));
            }
        }
        ActionKind::Cancel => {
            benefits
                .push("Completely eliminates the conflict and frees up network capacity".to_owned());
            drawbacks.extend([
                "Complete service cancellation affects all scheduled passengers".to_owned(),
                "Requires passenger rebooking and potential compensation".to_owned(),
                "May damage service reliability reputation".to_owned(),
            ]);
        }
        ActionKind::SpeedAdjust => {}
    }

    BenefitsDrawbacks { benefits, drawbacks }
}

// ── Recommendation text ───────────────────────────────────────────────────────

/// One-line operator instruction for the chosen action.
pub fn recommendation_text(candidate: &SolutionCandidate, train_name: &str) -> String {
    match candidate.action_type {
        ActionKind::Halt => format!(
            "Halt {train_name} for {} minutes to resolve platform conflict.",
            candidate.duration_mins
        ),
        ActionKind::Reroute => format!("Reroute {train_name} to an alternative platform/route."),
        ActionKind::SpeedAdjust => {
            format!("Reduce speed of {train_name} to create buffer time.")
        }
        ActionKind::Cancel => format!("Temporarily cancel {train_name} and reschedule."),
    }
}

/// Why this candidate won, in operator language.
pub fn reasoning(train_priority: u8, score: f64, strategy_name: &str) -> String {
    let priority_text = match train_priority {
        1 => "highest",
        2 => "high",
        3 => "medium",
        4 => "low",
        5 => "lowest",
        _ => "unknown",
    };
    format!(
        "This solution was selected using the '{strategy_name}' strategy because it has the \
         optimal impact score ({score}). The affected train has {priority_text} priority \
         (level {train_priority}), making this action strategically aligned with the chosen \
         optimization approach."
    )
}
