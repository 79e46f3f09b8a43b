//! Station node type.

use rail_core::{GeoPoint, StationCode};
use serde::{Deserialize, Serialize};

/// Role of a station in the network.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StationKind {
    Junction,
    Terminal,
    #[default]
    Station,
}

/// A station as loaded from the topology file.  Immutable after load.
#[derive(Clone, Debug, PartialEq)]
pub struct Station {
    pub code: StationCode,
    pub name: String,
    pub kind: StationKind,
    /// Platform count; drives the platform-occupancy table of the twin.
    pub platforms: u32,
    pub capacity_per_hour: Option<u32>,
    /// Optional.  Stations without coordinates disable the informed-search
    /// heuristic for any query touching them.
    pub coordinates: Option<GeoPoint>,
}
