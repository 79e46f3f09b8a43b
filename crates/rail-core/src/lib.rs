//! `rail-core` — foundational types for the railway decision-support core.
//!
//! This crate is a dependency of every other `rail-*` crate.  It intentionally
//! has no `rail-*` dependencies and minimal external ones (only `chrono`,
//! `serde`, and `thiserror`).
//!
//! # What lives here
//!
//! | Module    | Contents                                                  |
//! |-----------|-----------------------------------------------------------|
//! | [`ids`]   | `StationCode`, `TrackId`, `TrainId`                       |
//! | [`ops`]   | Operational enums: train type, weather, track condition…  |
//! | [`geo`]   | `GeoPoint`, planar coordinate distance                    |
//! | [`clock`] | Schedule timestamp parsing, minute arithmetic             |
//! | [`error`] | `CoreError`, `CoreResult`                                 |

pub mod clock;
pub mod error;
pub mod geo;
pub mod ids;
pub mod ops;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use clock::{minutes_between, parse_schedule_time};
pub use error::{CoreError, CoreResult};
pub use geo::GeoPoint;
pub use ids::{StationCode, TrackId, TrainId};
pub use ops::{
    TimeOfDay, TrackClass, TrackCondition, TrackPriority, TrackStatus, TrainType, Weather,
};
