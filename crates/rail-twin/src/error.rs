//! Twin-subsystem error type.

use rail_core::{TrackId, TrainId};
use rail_topology::TopologyError;
use thiserror::Error;

/// Errors produced by `rail-twin`.
///
/// Unknown identifiers and invalid action parameters leave the network state
/// unchanged.  A train without a viable route is *not* an error: its route
/// slots stay empty and downstream components treat it as unroutable.
#[derive(Debug, Error)]
pub enum TwinError {
    #[error("train {0} not found in network")]
    TrainNotFound(TrainId),

    #[error("track {0} not found in network")]
    TrackNotFound(TrackId),

    #[error("train {train} has {available} alternative routes, index {index} requested")]
    RouteIndexOutOfRange {
        train: TrainId,
        index: usize,
        available: usize,
    },

    #[error("invalid action parameter: {0}")]
    InvalidAction(String),

    #[error("event is missing required field {0}")]
    MissingField(&'static str),

    #[error("schedule record {train} has no endpoints (flat fields or Route array required)")]
    MissingEndpoints { train: TrainId },

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error("schedule parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type TwinResult<T> = Result<T, TwinError>;
