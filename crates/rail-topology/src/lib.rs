//! `rail-topology` — the railway network graph.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`station`] | `Station`, `StationKind`                                  |
//! | [`track`]   | `TrackEdge` with runtime status and disable metadata      |
//! | [`graph`]   | `TopologyGraph`: adjacency, disable/enable, health        |
//! | [`loader`]  | `TopologyDoc` JSON document, demo fallback network        |
//! | [`error`]   | `TopologyError`, `TopologyResult<T>`                      |
//!
//! # Status model
//!
//! Track status is the only mutable field at runtime.  The adjacency map is
//! rebuilt on every status change and contains operational edges only, so a
//! disabled edge is invisible to neighbour iteration until re-enabled, at
//! which point its pre-disable status is restored exactly (a track that was
//! under `maintenance` before a failure returns to `maintenance`, not to
//! `operational`).

pub mod error;
pub mod graph;
pub mod loader;
pub mod station;
pub mod track;

#[cfg(test)]
mod tests;

pub use error::{TopologyError, TopologyResult};
pub use graph::{Hop, TopologyGraph};
pub use loader::{StationSpec, TopologyDoc, TrackSpec};
pub use station::{Station, StationKind};
pub use track::TrackEdge;
