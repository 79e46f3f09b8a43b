//! Topology-subsystem error type.

use rail_core::{StationCode, TrackId};
use thiserror::Error;

/// Errors produced by `rail-topology`.  All are fatal at load time; runtime
/// status changes report unknown ids as `false` returns instead (the caller
/// decides whether that is an error).
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("track {track} references unknown station {station}")]
    DanglingTrack { track: TrackId, station: StationCode },

    #[error("topology parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type TopologyResult<T> = Result<T, TopologyError>;
