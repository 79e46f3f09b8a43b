//! JSON topology document.
//!
//! # File format
//!
//! ```json
//! {
//!   "stations": {
//!     "NDLS": {
//!       "name": "New Delhi", "type": "junction", "platforms": 16,
//!       "capacity_per_hour": 30,
//!       "coordinates": { "lat": 28.6430, "lon": 77.2195 }
//!     }
//!   },
//!   "tracks": {
//!     "NDLS_ANVR_MAIN": {
//!       "from": "NDLS", "to": "ANVR", "distance_km": 12.5,
//!       "travel_time_minutes": 25, "track_type": "double_line",
//!       "capacity_trains_per_hour": 8, "priority": "high",
//!       "max_speed_kmh": 110, "status": "operational"
//!     }
//!   },
//!   "route_alternatives": { }
//! }
//! ```
//!
//! Tracks are directed; reverse-direction travel exists only if the file
//! defines an explicit reverse edge.  `route_alternatives` is an optional
//! hint map carried through serialisation verbatim.

use std::io::Read;
use std::path::Path;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use rail_core::{GeoPoint, StationCode, TrackClass, TrackId, TrackPriority, TrackStatus};

use crate::TopologyResult;
use crate::station::StationKind;

// ── Field defaults ────────────────────────────────────────────────────────────

fn default_platforms() -> u32 {
    4
}
fn default_travel_time() -> u32 {
    30
}
fn default_capacity() -> u32 {
    4
}
fn default_max_speed() -> u32 {
    80
}

// ── Document records ──────────────────────────────────────────────────────────

/// One station entry of the topology file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StationSpec {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: StationKind,
    #[serde(default = "default_platforms")]
    pub platforms: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity_per_hour: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<GeoPoint>,
}

/// One track entry of the topology file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrackSpec {
    pub from: StationCode,
    pub to: StationCode,
    #[serde(default)]
    pub distance_km: f64,
    #[serde(default = "default_travel_time")]
    pub travel_time_minutes: u32,
    #[serde(default)]
    pub track_type: TrackClass,
    #[serde(default = "default_capacity")]
    pub capacity_trains_per_hour: u32,
    #[serde(default)]
    pub priority: TrackPriority,
    #[serde(default = "default_max_speed")]
    pub max_speed_kmh: u32,
    #[serde(default)]
    pub status: TrackStatus,
}

/// The parsed topology file.
///
/// Kept by the digital twin after graph construction so the network can be
/// rebuilt from its pristine state on reset.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TopologyDoc {
    #[serde(default)]
    pub stations: FxHashMap<StationCode, StationSpec>,
    #[serde(default)]
    pub tracks: FxHashMap<TrackId, TrackSpec>,
    /// Optional routing hints keyed by corridor name.  Not consumed by the
    /// pathfinder; round-tripped so downstream tooling keeps them.
    #[serde(default, skip_serializing_if = "FxHashMap::is_empty")]
    pub route_alternatives: FxHashMap<String, serde_json::Value>,
}

impl TopologyDoc {
    /// Parse a topology document from any reader.
    pub fn from_reader<R: Read>(reader: R) -> TopologyResult<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Parse a topology document from a file path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> TopologyResult<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// Minimal three-station fallback network.  Demo mode only; a load
    /// failure is otherwise fatal at construction.
    pub fn demo_fallback() -> Self {
        let mut stations = FxHashMap::default();
        stations.insert(
            StationCode::from("NDLS"),
            StationSpec {
                name: "New Delhi".to_owned(),
                kind: StationKind::Junction,
                platforms: 16,
                capacity_per_hour: None,
                coordinates: None,
            },
        );
        stations.insert(
            StationCode::from("ANVR"),
            StationSpec {
                name: "Anand Vihar".to_owned(),
                kind: StationKind::Station,
                platforms: 8,
                capacity_per_hour: None,
                coordinates: None,
            },
        );
        stations.insert(
            StationCode::from("GZB"),
            StationSpec {
                name: "Ghaziabad".to_owned(),
                kind: StationKind::Junction,
                platforms: 10,
                capacity_per_hour: None,
                coordinates: None,
            },
        );

        let mut tracks = FxHashMap::default();
        tracks.insert(
            TrackId::from("NDLS_ANVR"),
            TrackSpec {
                from: StationCode::from("NDLS"),
                to: StationCode::from("ANVR"),
                distance_km: 12.0,
                travel_time_minutes: 25,
                track_type: TrackClass::DoubleLine,
                capacity_trains_per_hour: default_capacity(),
                priority: TrackPriority::High,
                max_speed_kmh: default_max_speed(),
                status: TrackStatus::Operational,
            },
        );
        tracks.insert(
            TrackId::from("ANVR_GZB"),
            TrackSpec {
                from: StationCode::from("ANVR"),
                to: StationCode::from("GZB"),
                distance_km: 14.0,
                travel_time_minutes: 30,
                track_type: TrackClass::DoubleLine,
                capacity_trains_per_hour: default_capacity(),
                priority: TrackPriority::Medium,
                max_speed_kmh: default_max_speed(),
                status: TrackStatus::Operational,
            },
        );

        Self { stations, tracks, route_alternatives: FxHashMap::default() }
    }
}
