//! Unit tests for rail-topology.

use std::io::Cursor;

use rail_core::TrackStatus;

use crate::{TopologyDoc, TopologyError, TopologyGraph};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Delhi triangle: NDLS → ANVR → GZB plus a bypass NDLS → SBB → GZB.
const TOPOLOGY: &str = r#"{
  "stations": {
    "NDLS": { "name": "New Delhi", "type": "junction", "platforms": 16,
              "coordinates": { "lat": 28.6430, "lon": 77.2195 } },
    "ANVR": { "name": "Anand Vihar", "platforms": 8,
              "coordinates": { "lat": 28.6460, "lon": 77.3160 } },
    "SBB":  { "name": "Sahibabad",
              "coordinates": { "lat": 28.6770, "lon": 77.3550 } },
    "GZB":  { "name": "Ghaziabad", "type": "junction", "platforms": 10,
              "coordinates": { "lat": 28.6440, "lon": 77.4400 } }
  },
  "tracks": {
    "NDLS_ANVR_MAIN": { "from": "NDLS", "to": "ANVR", "distance_km": 12.5,
                        "travel_time_minutes": 25, "track_type": "double_line",
                        "priority": "high", "max_speed_kmh": 110 },
    "ANVR_GZB_MAIN":  { "from": "ANVR", "to": "GZB", "distance_km": 14.0,
                        "travel_time_minutes": 20, "track_type": "double_line",
                        "priority": "high", "max_speed_kmh": 110 },
    "NDLS_SBB_LOOP":  { "from": "NDLS", "to": "SBB", "distance_km": 16.0,
                        "travel_time_minutes": 35, "track_type": "single_line",
                        "priority": "low" },
    "SBB_GZB_LOOP":   { "from": "SBB", "to": "GZB", "distance_km": 11.0,
                        "travel_time_minutes": 25, "track_type": "single_line" }
  }
}"#;

fn graph() -> TopologyGraph {
    let doc = TopologyDoc::from_reader(Cursor::new(TOPOLOGY)).unwrap();
    TopologyGraph::from_doc(&doc).unwrap()
}

/// All (station, hop-to, hop-track) triples, sorted, for adjacency equality.
fn adjacency_triples(g: &TopologyGraph) -> Vec<(String, String, String)> {
    let mut out: Vec<(String, String, String)> = g
        .stations()
        .flat_map(|s| {
            g.neighbours(s.code.as_str()).iter().map(|h| {
                (s.code.to_string(), h.to.to_string(), h.track.to_string())
            })
        })
        .collect();
    out.sort();
    out
}

// ── Loader ────────────────────────────────────────────────────────────────────

mod loader {
    use super::*;

    #[test]
    fn parses_with_defaults() {
        let doc = TopologyDoc::from_reader(Cursor::new(TOPOLOGY)).unwrap();
        assert_eq!(doc.stations.len(), 4);
        assert_eq!(doc.tracks.len(), 4);

        // Absent fields fall back to documented defaults.
        let sbb = &doc.stations["SBB"];
        assert_eq!(sbb.platforms, 4);
        let loop_track = &doc.tracks["SBB_GZB_LOOP"];
        assert_eq!(loop_track.max_speed_kmh, 80);
        assert_eq!(loop_track.capacity_trains_per_hour, 4);
        assert_eq!(loop_track.status, TrackStatus::Operational);
    }

    #[test]
    fn dangling_track_is_fatal() {
        let bad = r#"{
          "stations": { "NDLS": { "name": "New Delhi" } },
          "tracks": { "NDLS_X": { "from": "NDLS", "to": "NOWHERE" } }
        }"#;
        let doc = TopologyDoc::from_reader(Cursor::new(bad)).unwrap();
        let err = TopologyGraph::from_doc(&doc).unwrap_err();
        assert!(matches!(err, TopologyError::DanglingTrack { .. }));
    }

    #[test]
    fn malformed_json_is_fatal() {
        assert!(TopologyDoc::from_reader(Cursor::new("{ not json")).is_err());
    }

    #[test]
    fn demo_fallback_builds() {
        let g = TopologyGraph::from_doc(&TopologyDoc::demo_fallback()).unwrap();
        assert_eq!(g.station_count(), 3);
        assert_eq!(g.track_count(), 2);
        assert_eq!(g.neighbours("NDLS").len(), 1);
    }
}

// ── Adjacency ─────────────────────────────────────────────────────────────────

mod adjacency {
    use super::*;

    #[test]
    fn neighbours_reflect_directed_edges() {
        let g = graph();
        let from_ndls: Vec<&str> =
            g.neighbours("NDLS").iter().map(|h| h.to.as_str()).collect();
        assert_eq!(from_ndls, vec!["ANVR", "SBB"]); // sorted by destination

        // No reverse edge was defined, so ANVR cannot reach NDLS.
        assert!(g.neighbours("ANVR").iter().all(|h| h.to.as_str() != "NDLS"));
        // GZB is a sink in this fixture.
        assert!(g.neighbours("GZB").is_empty());
    }

    #[test]
    fn unknown_station_has_no_neighbours() {
        assert!(graph().neighbours("XXXX").is_empty());
    }

    #[test]
    fn disabled_edge_is_invisible() {
        let mut g = graph();
        assert!(g.disable_track("NDLS_ANVR_MAIN", "signal failure"));
        let from_ndls: Vec<&str> =
            g.neighbours("NDLS").iter().map(|h| h.to.as_str()).collect();
        assert_eq!(from_ndls, vec!["SBB"]);
    }
}

// ── Status transitions ────────────────────────────────────────────────────────

mod status {
    use super::*;

    #[test]
    fn disable_then_enable_restores_prior_state() {
        let mut g = graph();
        let before = adjacency_triples(&g);

        assert!(g.disable_track("NDLS_ANVR_MAIN", "signal failure"));
        let edge = g.edge("NDLS_ANVR_MAIN").unwrap();
        assert_eq!(edge.status, TrackStatus::Disabled);
        assert_eq!(edge.disable_reason.as_deref(), Some("signal failure"));
        assert!(edge.disabled_at.is_some());

        assert!(g.enable_track("NDLS_ANVR_MAIN"));
        let edge = g.edge("NDLS_ANVR_MAIN").unwrap();
        assert_eq!(edge.status, TrackStatus::Operational);
        assert!(edge.disable_reason.is_none());
        assert!(edge.original_status.is_none());

        assert_eq!(adjacency_triples(&g), before);
    }

    #[test]
    fn enable_restores_maintenance_not_operational() {
        // maintenance → disabled → maintenance: the pre-disable status wins.
        let with_maintenance = TOPOLOGY.replace(
            r#""NDLS_SBB_LOOP":  { "from": "NDLS", "to": "SBB", "distance_km": 16.0,"#,
            r#""NDLS_SBB_LOOP":  { "from": "NDLS", "to": "SBB", "status": "maintenance", "distance_km": 16.0,"#,
        );
        let doc = TopologyDoc::from_reader(Cursor::new(with_maintenance)).unwrap();
        let mut g = TopologyGraph::from_doc(&doc).unwrap();

        g.disable_track("NDLS_SBB_LOOP", "flooding");
        g.enable_track("NDLS_SBB_LOOP");
        assert_eq!(g.edge("NDLS_SBB_LOOP").unwrap().status, TrackStatus::Maintenance);
    }

    #[test]
    fn repeated_disable_keeps_first_saved_status() {
        let mut g = graph();
        g.disable_track("NDLS_ANVR_MAIN", "first");
        g.disable_track("NDLS_ANVR_MAIN", "second");
        g.enable_track("NDLS_ANVR_MAIN");
        assert_eq!(g.edge("NDLS_ANVR_MAIN").unwrap().status, TrackStatus::Operational);
    }

    #[test]
    fn unknown_track_ids_are_rejected() {
        let mut g = graph();
        assert!(!g.disable_track("NOPE", "x"));
        assert!(!g.enable_track("NOPE"));
    }

    #[test]
    fn health_tracks_disabled_count() {
        let mut g = graph();
        assert!(g.is_healthy());
        assert_eq!(g.operational_track_count(), 4);
        assert_eq!(g.failed_track_count(), 0);

        g.disable_track("NDLS_ANVR_MAIN", "failure");
        assert!(!g.is_healthy());
        assert_eq!(g.operational_track_count(), 3);
        assert_eq!(g.failed_track_count(), 1);
    }
}

// ── Round-trip ────────────────────────────────────────────────────────────────

mod round_trip {
    use super::*;

    #[test]
    fn serialise_reload_preserves_adjacency() {
        let g = graph();
        let json = serde_json::to_string(&g.to_document()).unwrap();
        let reloaded =
            TopologyGraph::from_doc(&TopologyDoc::from_reader(Cursor::new(json)).unwrap())
                .unwrap();
        assert_eq!(adjacency_triples(&g), adjacency_triples(&reloaded));
    }

    #[test]
    fn serialise_reload_preserves_disabled_status() {
        let mut g = graph();
        g.disable_track("SBB_GZB_LOOP", "washout");

        let json = serde_json::to_string(&g.to_document()).unwrap();
        let reloaded =
            TopologyGraph::from_doc(&TopologyDoc::from_reader(Cursor::new(json)).unwrap())
                .unwrap();
        assert_eq!(
            reloaded.edge("SBB_GZB_LOOP").unwrap().status,
            TrackStatus::Disabled
        );
        assert_eq!(adjacency_triples(&g), adjacency_triples(&reloaded));
    }
}
