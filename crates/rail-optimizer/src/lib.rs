//! `rail-optimizer` — the decision engine over the digital twin.
//!
//! # Pipeline
//!
//! ```text
//! detect    — project ETAs, group by destination, flag pairs whose
//!             arrival gap undercuts the dynamic safety buffer
//! generate  — propose Halt / SpeedAdjust / Reroute / Cancel candidates
//!             for the trains of the first conflict
//! score     — rank candidates under a strategy profile's weight vector;
//!             lower is better
//! explain   — confidence, recommendation text, benefits/drawbacks
//! ```
//!
//! # Crate layout
//!
//! | Module        | Contents                                               |
//! |---------------|--------------------------------------------------------|
//! | [`conflict`]  | `ConflictDetector`, `Conflict`, `Severity`             |
//! | [`solution`]  | `SolutionCandidate`, `generate_solutions`              |
//! | [`strategy`]  | `StrategyKind`, `StrategyProfile` weight vectors       |
//! | [`score`]     | `score_candidate`, `PriorityWeights`, `Confidence`     |
//! | [`rationale`] | Recommendation text, reasoning, benefits/drawbacks     |
//! | [`engine`]    | `Optimizer`: single- and multi-strategy runs           |
//!
//! # Isolation
//!
//! Every strategy run works on a deep copy (`Network::clone`) of the caller's
//! twin, so preview mutations never leak between strategies or back into the
//! live network.  With the `parallel` feature the three per-strategy runs
//! execute concurrently on Rayon's pool.

pub mod conflict;
pub mod engine;
pub mod rationale;
pub mod score;
pub mod solution;
pub mod strategy;


pub use conflict::{Conflict, ConflictDetector, EnvironmentalFactors, Severity};
pub use engine::{Optimizer, OptimizerConfig, Recommendation, RunStatus, StrategyOutcome, StrategySchedule};
pub use rationale::BenefitsDrawbacks;
pub use score::{Confidence, PriorityWeights, confidence, score_candidate};
pub use solution::{EnvironmentalAdjustment, SolutionCandidate, generate_solutions};
pub use strategy::{StrategyKind, StrategyProfile};
