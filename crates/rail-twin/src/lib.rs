//! `rail-twin` — the in-memory digital twin of the live railway network.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                 |
//! |--------------|----------------------------------------------------------|
//! | [`train`]    | `Train`: schedule state, route slots, mutations          |
//! | [`schedule`] | Schedule JSON records, loading, persisted-schedule output |
//! | [`event`]    | `Event` and `Action` envelopes                           |
//! | [`snapshot`] | Serialisable state views (`StateSnapshot`, `TrainEta`…)  |
//! | [`network`]  | `Network`: composition root, events, actions, rerouting  |
//! | [`error`]    | `TwinError`, `TwinResult<T>`                             |
//!
//! # Writer discipline
//!
//! A `Network` is single-writer: every mutating operation takes `&mut self`,
//! so exclusive access is enforced by the borrow checker rather than a lock.
//! Callers that share a network across threads wrap it in a `Mutex` and hold
//! the guard for the whole operation.  Snapshots take `&self` and therefore
//! can only observe quiescent state.  Multi-strategy evaluation works on
//! [`Clone`]s: all twin state is owned, so a clone is a fully independent
//! deep copy.

pub mod error;
pub mod event;
pub mod network;
pub mod schedule;
pub mod snapshot;
pub mod train;


pub use error::{TwinError, TwinResult};
pub use event::{Action, ActionKind, Event, EventKind};
pub use network::{Network, ReroutingInfo, ReroutingReport};
pub use schedule::{RouteStop, ScheduleExport, TrainRecord, load_schedule_path, load_schedule_reader};
pub use snapshot::{NetworkStatus, RouteInfo, StateSnapshot, TrainEta, TrainState};
pub use train::{DelayFactors, EtaInfo, Train};
