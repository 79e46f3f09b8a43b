//! `rail-routing` — route search over the topology graph.
//!
//! # Crate layout
//!
//! | Module         | Contents                                               |
//! |----------------|--------------------------------------------------------|
//! | [`route`]      | `RouteSegment`, `Route`, route-cost ranking            |
//! | [`cost`]       | `Criterion`, `SearchStrategy`, edge cost, heuristic    |
//! | [`pathfinder`] | `Pathfinder`: best route and diverse alternatives      |
//!
//! # Search model
//!
//! One priority-queue loop serves all three strategies; only the queue key
//! differs (accumulated cost, heuristic, or their sum).  Queue entries are
//! ordered by `(cost key, insertion counter)` so the segment-list payload is
//! never compared.  "No route" is `None`, never an error.

pub mod cost;
pub mod pathfinder;
pub mod route;

#[cfg(test)]
mod tests;

pub use cost::{Criterion, SearchStrategy, edge_cost, heuristic};
pub use pathfinder::Pathfinder;
pub use route::{Route, RouteSegment, RouteSummary};
