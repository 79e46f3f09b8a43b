//! Unit tests for rail-routing.

use std::io::Cursor;

use rail_core::{TrackStatus, TrainType};
use rail_topology::{TopologyDoc, TopologyGraph};

use crate::cost::{Criterion, SearchStrategy, edge_cost, heuristic};
use crate::pathfinder::Pathfinder;
use crate::route::route_cost;

// ── Fixture ───────────────────────────────────────────────────────────────────

/// Delhi triangle.  The main line (via ANVR) is fastest but longest; the loop
/// (via SBB) is shortest by distance and geographically closer to GZB, so
/// distance search and greedy search both diverge from the time-optimal path.
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
    "NDLS_ANVR_MAIN": { "from": "NDLS", "to": "ANVR", "distance_km": 18.5,
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

fn station_names(route: &crate::Route) -> Vec<&str> {
    route.stations.iter().map(|s| s.as_str()).collect()
}

// ── Edge cost ─────────────────────────────────────────────────────────────────

mod cost_fn {
    use super::*;

    #[test]
    fn time_and_distance_criteria() {
        let g = graph();
        let main = g.edge("NDLS_ANVR_MAIN").unwrap();
        assert_eq!(edge_cost(main, Criterion::Time, TrainType::Passenger), 25.0);
        assert_eq!(edge_cost(main, Criterion::Distance, TrainType::Passenger), 18.5);
    }

    #[test]
    fn reliability_penalises_single_line_and_low_priority() {
        let g = graph();
        // single_line × low priority: 35 × 1.5 × 1.3
        let loop_edge = g.edge("NDLS_SBB_LOOP").unwrap();
        let cost = edge_cost(loop_edge, Criterion::Reliability, TrainType::Passenger);
        assert!((cost - 35.0 * 1.5 * 1.3).abs() < 1e-9);

        // double_line, high priority: no penalty
        let main = g.edge("NDLS_ANVR_MAIN").unwrap();
        assert_eq!(edge_cost(main, Criterion::Reliability, TrainType::Passenger), 25.0);
    }

    #[test]
    fn express_avoids_slow_tracks() {
        let g = graph();
        // 80 km/h default < 100 → × 1.2 for Express only.
        let slow = g.edge("SBB_GZB_LOOP").unwrap();
        assert!((edge_cost(slow, Criterion::Time, TrainType::Express) - 25.0 * 1.2).abs() < 1e-9);
        // 110 km/h → no Express adjustment.
        let fast = g.edge("NDLS_ANVR_MAIN").unwrap();
        assert_eq!(edge_cost(fast, Criterion::Time, TrainType::Express), 25.0);
    }

    #[test]
    fn goods_discount_on_single_line() {
        let g = graph();
        let single = g.edge("SBB_GZB_LOOP").unwrap();
        assert!((edge_cost(single, Criterion::Time, TrainType::Goods) - 25.0 * 0.9).abs() < 1e-9);
        let double = g.edge("NDLS_ANVR_MAIN").unwrap();
        assert_eq!(edge_cost(double, Criterion::Time, TrainType::Goods), 25.0);
    }
}

// ── Heuristic ─────────────────────────────────────────────────────────────────

mod heuristic_fn {
    use super::*;

    #[test]
    fn scales_coordinate_distance() {
        let g = graph();
        let h = heuristic(&g, "ANVR", "GZB");
        assert!(h > 0.0 && h.is_finite());
        assert_eq!(heuristic(&g, "GZB", "GZB"), 0.0);
    }

    #[test]
    fn infinite_without_coordinates() {
        let stripped = TOPOLOGY.replace(
            ",\n              \"coordinates\": { \"lat\": 28.6440, \"lon\": 77.4400 } }",
            "}",
        );
        let doc = TopologyDoc::from_reader(Cursor::new(stripped)).unwrap();
        let g = TopologyGraph::from_doc(&doc).unwrap();
        assert_eq!(heuristic(&g, "NDLS", "GZB"), f64::INFINITY);
        assert_eq!(heuristic(&g, "NDLS", "NOWHERE"), f64::INFINITY);
    }
}

// ── Best route ────────────────────────────────────────────────────────────────

mod best_route {
    use super::*;

    #[test]
    fn dijkstra_picks_fastest_by_time() {
        let finder = Pathfinder::new(SearchStrategy::Dijkstra);
        let route = finder
            .find_best_route(&graph(), "NDLS", "GZB", TrainType::Passenger, Criterion::Time)
            .unwrap();
        assert_eq!(station_names(&route), vec!["NDLS", "ANVR", "GZB"]);
        assert_eq!(route.total_time_minutes, 45);
        assert_eq!(route.route_type, "dijkstra_route");
    }

    #[test]
    fn dijkstra_picks_shortest_by_distance() {
        let finder = Pathfinder::new(SearchStrategy::Dijkstra);
        let route = finder
            .find_best_route(&graph(), "NDLS", "GZB", TrainType::Passenger, Criterion::Distance)
            .unwrap();
        assert_eq!(station_names(&route), vec!["NDLS", "SBB", "GZB"]);
        assert!((route.total_distance_km - 27.0).abs() < 1e-9);
    }

    #[test]
    fn greedy_follows_the_heuristic() {
        // SBB is geographically closer to GZB than ANVR, so greedy commits
        // to the loop even though it is slower.
        let finder = Pathfinder::new(SearchStrategy::Greedy);
        let route = finder
            .find_best_route(&graph(), "NDLS", "GZB", TrainType::Passenger, Criterion::Time)
            .unwrap();
        assert_eq!(station_names(&route), vec!["NDLS", "SBB", "GZB"]);
        assert_eq!(route.route_type, "greedy_route");
    }

    #[test]
    fn astar_recovers_the_optimal_path() {
        let finder = Pathfinder::new(SearchStrategy::AStar);
        let route = finder
            .find_best_route(&graph(), "NDLS", "GZB", TrainType::Passenger, Criterion::Time)
            .unwrap();
        assert_eq!(station_names(&route), vec!["NDLS", "ANVR", "GZB"]);
        assert_eq!(route.route_type, "astar_route");
    }

    #[test]
    fn segments_chain_and_are_operational() {
        let finder = Pathfinder::default();
        let route = finder
            .find_best_route(&graph(), "NDLS", "GZB", TrainType::Goods, Criterion::Time)
            .unwrap();
        assert!(route.segments.windows(2).all(|w| w[0].to == w[1].from));
        assert!(route.segments.iter().all(|s| s.status == TrackStatus::Operational));
        assert_eq!(route.stations.len(), route.segments.len() + 1);
    }

    #[test]
    fn same_origin_and_destination_is_none() {
        let finder = Pathfinder::default();
        assert!(
            finder
                .find_best_route(&graph(), "NDLS", "NDLS", TrainType::Express, Criterion::Time)
                .is_none()
        );
    }

    #[test]
    fn unknown_station_is_none() {
        let finder = Pathfinder::default();
        assert!(
            finder
                .find_best_route(&graph(), "NDLS", "XXXX", TrainType::Express, Criterion::Time)
                .is_none()
        );
    }

    #[test]
    fn disabled_edge_forces_detour() {
        let mut g = graph();
        g.disable_track("NDLS_ANVR_MAIN", "signal failure");
        let finder = Pathfinder::default();
        let route = finder
            .find_best_route(&g, "NDLS", "GZB", TrainType::Passenger, Criterion::Time)
            .unwrap();
        assert_eq!(station_names(&route), vec!["NDLS", "SBB", "GZB"]);
    }

    #[test]
    fn isolated_origin_is_none() {
        let mut g = graph();
        g.disable_track("NDLS_ANVR_MAIN", "failure");
        g.disable_track("NDLS_SBB_LOOP", "failure");
        let finder = Pathfinder::default();
        assert!(
            finder
                .find_best_route(&g, "NDLS", "GZB", TrainType::Passenger, Criterion::Time)
                .is_none()
        );
    }
}

// ── Alternatives ──────────────────────────────────────────────────────────────

mod alternatives {
    use super::*;

    #[test]
    fn distinct_routes_sorted_by_ranking_cost() {
        let finder = Pathfinder::default();
        let routes =
            finder.find_alternative_routes(&graph(), "NDLS", "GZB", TrainType::Passenger, 3);

        // Time and reliability both choose the main line (deduplicated);
        // distance contributes the loop.
        assert_eq!(routes.len(), 2);
        assert_eq!(station_names(&routes[0]), vec!["NDLS", "ANVR", "GZB"]);
        assert_eq!(station_names(&routes[1]), vec!["NDLS", "SBB", "GZB"]);

        // main: 45 min, no penalties; loop: 60 min + 2 single-line × 5.
        assert_eq!(routes[0].total_cost, 45.0);
        assert_eq!(routes[1].total_cost, 70.0);
        assert!(routes[0].total_cost <= routes[1].total_cost);
    }

    #[test]
    fn no_duplicate_station_lists() {
        let finder = Pathfinder::default();
        let routes =
            finder.find_alternative_routes(&graph(), "NDLS", "GZB", TrainType::Passenger, 3);
        for (i, a) in routes.iter().enumerate() {
            for b in &routes[i + 1..] {
                assert_ne!(a.stations, b.stations);
            }
        }
    }

    #[test]
    fn respects_max_alternatives() {
        let finder = Pathfinder::default();
        let routes =
            finder.find_alternative_routes(&graph(), "NDLS", "GZB", TrainType::Passenger, 1);
        assert_eq!(routes.len(), 1);
        assert_eq!(station_names(&routes[0]), vec!["NDLS", "ANVR", "GZB"]);
    }

    #[test]
    fn unroutable_pair_yields_empty() {
        let finder = Pathfinder::default();
        // GZB is a sink: no outgoing edges at all.
        assert!(
            finder
                .find_alternative_routes(&graph(), "GZB", "NDLS", TrainType::Passenger, 3)
                .is_empty()
        );
    }
}

// ── Route cost ────────────────────────────────────────────────────────────────

mod ranking {
    use super::*;

    #[test]
    fn complexity_and_single_line_penalties() {
        let g = graph();
        let seg = |id: &str| crate::RouteSegment::from(g.edge(id).unwrap());

        // Two double-line segments: plain time sum.
        assert_eq!(route_cost(&[seg("NDLS_ANVR_MAIN"), seg("ANVR_GZB_MAIN")]), 45.0);

        // Two single-line segments: 60 + 2×5.
        assert_eq!(route_cost(&[seg("NDLS_SBB_LOOP"), seg("SBB_GZB_LOOP")]), 70.0);

        // Three segments trip the complexity penalty.
        let cost = route_cost(&[
            seg("NDLS_ANVR_MAIN"),
            seg("ANVR_GZB_MAIN"),
            seg("NDLS_SBB_LOOP"),
        ]);
        assert_eq!(cost, 25.0 + 20.0 + 35.0 + 10.0 + 5.0);
    }
}
