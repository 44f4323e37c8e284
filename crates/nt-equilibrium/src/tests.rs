//! Unit tests for nt-equilibrium.

#[cfg(test)]
mod helpers {
    use nt_core::NodeId;
    use nt_network::{Path, RoadNetwork, RoadNetworkBuilder};
    use nt_road::{BprTime, RoadSegment};

    use crate::{FlowAssignment, IterationStep, Outcome, SolverObserver};

    /// Two disjoint two-edge routes `0 → 1 → 3` and `0 → 2 → 3` with the
    /// same time function on every edge.
    pub fn twin_routes<F: Clone>(f: F) -> RoadNetwork<F> {
        let mut b = RoadNetworkBuilder::new();
        for (from, to) in [(0, 1), (1, 3), (0, 2), (2, 3)] {
            b.add_edge(NodeId(from), NodeId(to), f.clone());
        }
        b.build()
    }

    pub fn bpr(free_flow_secs: f64, capacity: f64) -> BprTime {
        BprTime::new(free_flow_secs, capacity).unwrap()
    }

    pub fn road(v0_kph: f64, lanes: u32, length_m: f64) -> RoadSegment {
        RoadSegment::new(v0_kph, lanes, length_m).unwrap()
    }

    /// A direct route `0 → 2` and a two-edge detour `0 → 1 → 2`.  The direct
    /// route is discovered first.
    pub fn direct_and_detour<F>(direct: F, first: F, second: F) -> RoadNetwork<F> {
        let mut b = RoadNetworkBuilder::new();
        b.add_edge(NodeId(0), NodeId(2), direct);
        b.add_edge(NodeId(0), NodeId(1), first);
        b.add_edge(NodeId(1), NodeId(2), second);
        b.build()
    }

    /// Records every iteration for invariant checks.
    #[derive(Default)]
    pub struct Recorder {
        pub started:  Option<Vec<u32>>,
        pub sums:     Vec<u64>,
        pub spreads:  Vec<f64>,
        pub finished: Option<(Outcome, u64)>,
    }

    impl SolverObserver for Recorder {
        fn on_start(&mut self, _paths: &[Path], assignment: &FlowAssignment) {
            self.started = Some(assignment.vehicles().to_vec());
        }

        fn on_iteration(&mut self, step: &IterationStep<'_>) {
            self.sums.push(step.assignment.vehicles().iter().map(|&n| n as u64).sum());
            self.spreads.push(step.spread());
        }

        fn on_finish(&mut self, outcome: Outcome, iterations: u64) {
            self.finished = Some((outcome, iterations));
        }
    }
}

// ── FlowAssignment ────────────────────────────────────────────────────────────

#[cfg(test)]
mod assignment {
    use nt_core::{NodeId, PathId};
    use nt_network::{RoadNetworkBuilder, enumerate_paths};

    use super::helpers::bpr;
    use crate::FlowAssignment;

    #[test]
    fn all_on_places_total() {
        let a = FlowAssignment::all_on(3, PathId(1), 50);
        assert_eq!(a.vehicles(), &[0, 50, 0]);
        assert_eq!(a.total(), 50);
        assert_eq!(a.len(), 3);
    }

    #[test]
    fn transfer_moves_one_vehicle() {
        let mut a = FlowAssignment::all_on(2, PathId(0), 10);
        assert!(a.transfer(PathId(0), PathId(1)));
        assert_eq!(a.vehicles(), &[9, 1]);
    }

    #[test]
    fn transfer_refuses_from_empty_route() {
        let mut a = FlowAssignment::all_on(2, PathId(0), 10);
        assert!(!a.transfer(PathId(1), PathId(0)));
        assert_eq!(a.vehicles(), &[10, 0]);
    }

    #[test]
    fn transfer_refuses_same_route() {
        let mut a = FlowAssignment::all_on(2, PathId(0), 10);
        assert!(!a.transfer(PathId(0), PathId(0)));
    }

    #[test]
    fn zero_total_never_moves() {
        let mut a = FlowAssignment::all_on(2, PathId(0), 0);
        assert!(!a.transfer(PathId(0), PathId(1)));
    }

    #[test]
    fn shared_edges_accumulate_load() {
        // Routes: [0,1,3], [0,2,3], [0,1,2,3].
        let mut b = RoadNetworkBuilder::new();
        for (from, to) in [(0, 1), (0, 2), (1, 3), (2, 3), (1, 2)] {
            b.add_edge(NodeId(from), NodeId(to), bpr(10.0, 10.0));
        }
        let net = b.build();
        let paths = enumerate_paths(&net);
        assert_eq!(paths.len(), 3);

        let mut a = FlowAssignment::all_on(3, PathId(0), 23);
        for _ in 0..7 {
            a.transfer(PathId(0), PathId(1));
        }
        for _ in 0..11 {
            a.transfer(PathId(0), PathId(2));
        }
        assert_eq!(a.vehicles(), &[5, 7, 11]);

        let loads = a.edge_loads(&paths, net.edge_count());
        let load = |f: u32, t: u32| loads[net.edge_between(NodeId(f), NodeId(t)).unwrap().index()];
        assert_eq!(load(0, 1), 16.0);
        assert_eq!(load(0, 2), 7.0);
        assert_eq!(load(1, 3), 5.0);
        assert_eq!(load(2, 3), 18.0);
        assert_eq!(load(1, 2), 11.0);
    }
}

// ── Solver ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod solver {
    use nt_core::{NodeId, PathId, SolverConfig};
    use nt_network::{RoadNetwork, RoadNetworkBuilder};
    use nt_road::{BprTime, LoadMap, RoadError, RoadResult, RoadSegment, TimeFunction};

    use super::helpers::{Recorder, bpr, direct_and_detour, road, twin_routes};
    use crate::{
        EquilibriumError, NoopObserver, Outcome, equilibrate, equilibrate_between,
        equilibrate_with_observer,
    };

    /// Constant time up to `cap` vehicles, impassable beyond.
    #[derive(Clone)]
    struct HardCap {
        free_secs: f64,
        cap:       f64,
    }

    impl TimeFunction for HardCap {
        fn travel_time(&self, load: f64) -> RoadResult<f64> {
            if load > self.cap {
                return Err(RoadError::Impassable { vehicles: load });
            }
            Ok(self.free_secs)
        }
    }

    #[test]
    fn single_edge_takes_everything() {
        let mut b = RoadNetworkBuilder::new();
        b.add_edge(
            NodeId(0),
            NodeId(1),
            road(60.0, 4, 1_000.0).with_load_map(LoadMap { alpha: 1.0, beta: 0.0 }),
        );
        let net = b.build();

        let eq = equilibrate(&net, &SolverConfig::new(100, 5.0)).unwrap();
        assert_eq!(eq.vehicles(), &[100]);
        assert!(eq.is_converged());
        assert_eq!(eq.iterations, 0);
        // 100 cars on 4 lanes still leave free-flow spacing: 1 km at 60 km/h.
        assert!(eq.times[0].is_finite() && eq.times[0] > 0.0);
        assert!((eq.times[0] - 60.0).abs() < 1e-9, "got {}", eq.times[0]);
    }

    #[test]
    fn identical_routes_split_evenly() {
        let net = twin_routes(bpr(60.0, 100.0));
        let eq = equilibrate(&net, &SolverConfig::new(200, 5.0)).unwrap();

        let v = eq.vehicles();
        assert_eq!(v.iter().sum::<u32>(), 200);
        assert!((v[0] as i64 - 100).abs() <= 1, "split {v:?}");
        assert!(eq.spread() <= 5.0);
        assert!(eq.is_converged());
        // Time gap is 4.8 s per vehicle above 100, so the run stops at 101.
        assert_eq!(v, &[101, 99]);
    }

    #[test]
    fn identical_road_segments_converge_within_tolerance() {
        let net = twin_routes(road(60.0, 4, 1_000.0));
        let eq = equilibrate(&net, &SolverConfig::new(200, 5.0)).unwrap();
        assert!(eq.is_converged());
        assert_eq!(eq.vehicles().iter().sum::<u32>(), 200);
        assert!((eq.times[0] - eq.times[1]).abs() <= 5.0);
        assert!(eq.vehicles()[1] > 0, "load never left the first route");
    }

    #[test]
    fn vehicles_conserved_every_iteration() {
        let net = twin_routes(road(50.0, 2, 800.0).with_load_map(LoadMap { alpha: 1.0, beta: 20.0 }));
        let mut rec = Recorder::default();
        let eq = equilibrate_with_observer(&net, &SolverConfig::new(300, 5.0), &mut rec).unwrap();

        assert_eq!(rec.started.as_deref(), Some(&[300, 0][..]));
        assert!(!rec.sums.is_empty());
        assert!(rec.sums.iter().all(|&s| s == 300));
        assert_eq!(rec.sums.len() as u64, eq.iterations + 1);
        assert_eq!(rec.finished, Some((eq.outcome, eq.iterations)));
        if eq.is_converged() {
            assert!(*rec.spreads.last().unwrap() <= 5.0);
        }
    }

    #[test]
    fn ties_start_on_lowest_route() {
        let net = twin_routes(bpr(60.0, 100.0));
        let mut rec = Recorder::default();
        equilibrate_with_observer(&net, &SolverConfig::new(10, 1_000.0), &mut rec).unwrap();
        assert_eq!(rec.started.as_deref(), Some(&[10, 0][..]));
    }

    #[test]
    fn disconnected_destination_is_no_route() {
        let mut b = RoadNetworkBuilder::new();
        b.add_edge(NodeId(0), NodeId(1), bpr(10.0, 10.0));
        b.add_edge(NodeId(2), NodeId(3), bpr(10.0, 10.0));
        let net = b.build();
        let r = equilibrate(&net, &SolverConfig::default());
        assert!(matches!(r, Err(EquilibriumError::NoRoute { from: NodeId(0), to: NodeId(3) })));
    }

    #[test]
    fn empty_network_is_error() {
        let net: RoadNetwork<BprTime> = RoadNetwork::empty();
        assert!(matches!(equilibrate(&net, &SolverConfig::default()), Err(EquilibriumError::EmptyNetwork)));
    }

    #[test]
    fn slower_unused_route_is_balanced() {
        // Direct route 10 s with vast capacity; detour 100 s.  Nobody moves.
        let net = direct_and_detour(bpr(10.0, 1e9), bpr(50.0, 1e9), bpr(50.0, 1e9));
        let eq = equilibrate(&net, &SolverConfig::new(40, 0.0)).unwrap();
        // Routes in discovery order: [0, 2] then [0, 1, 2].
        assert_eq!(eq.paths[0].nodes(), &[NodeId(0), NodeId(2)]);
        assert_eq!(eq.vehicles(), &[40, 0]);
        assert_eq!(eq.outcome, Outcome::Converged);
        assert_eq!(eq.iterations, 0);
        assert_eq!(eq.slowest(), PathId(0));
        assert_eq!(eq.spread(), 0.0);
    }

    #[test]
    fn iteration_cap_halts_run() {
        let net = twin_routes(bpr(60.0, 100.0));
        let config = SolverConfig { max_iterations: 3, ..SolverConfig::new(200, 5.0) };
        let eq = equilibrate(&net, &config).unwrap();
        assert_eq!(eq.outcome, Outcome::IterationLimit);
        assert_eq!(eq.iterations, 3);
        assert_eq!(eq.vehicles(), &[197, 3]);
    }

    #[test]
    fn impassable_route_never_chosen() {
        let blocked = RoadSegment::new(0.0, 1, 500.0).unwrap();
        let open = road(60.0, 2, 1_000.0);
        let net = direct_and_detour(blocked, open.clone(), open);
        let eq = equilibrate(&net, &SolverConfig::new(50, 5.0)).unwrap();
        assert_eq!(eq.vehicles(), &[0, 50]);
        assert!(eq.times[0].is_infinite());
        assert!(eq.times[1].is_finite());
        assert!(eq.is_converged());
        assert_eq!(eq.fastest(), PathId(1));
        assert_eq!(eq.slowest(), PathId(1));
    }

    #[test]
    fn empty_blocked_route_does_not_stop_balancing() {
        // Routes: 0 -> 3 (blocked), 0 -> 1 -> 3, 0 -> 2 -> 3.
        let open = road(60.0, 4, 1_000.0);
        let mut b = RoadNetworkBuilder::new();
        b.add_edge(NodeId(0), NodeId(3), RoadSegment::new(0.0, 1, 1_000.0).unwrap());
        for (from, to) in [(0, 1), (1, 3), (0, 2), (2, 3)] {
            b.add_edge(NodeId(from), NodeId(to), open.clone());
        }
        let net = b.build();
        let mut rec = Recorder::default();
        let eq = equilibrate_with_observer(&net, &SolverConfig::new(200, 5.0), &mut rec).unwrap();

        assert_eq!(eq.paths[0].nodes(), &[NodeId(0), NodeId(3)]);
        assert_eq!(rec.started.as_deref(), Some(&[0, 200, 0][..]));
        assert!(eq.times[0].is_infinite());
        assert!(eq.is_converged());
        assert!(eq.iterations > 0);
        let v = eq.vehicles();
        assert_eq!(v[0], 0);
        assert_eq!(v.iter().sum::<u32>(), 200);
        assert!(v[1] > 0 && v[2] > 0, "split {v:?}");
        assert!((eq.times[1] - eq.times[2]).abs() <= 5.0);
        assert!(eq.spread() <= 5.0);
    }

    #[test]
    fn loaded_route_turning_impassable_is_gridlock() {
        let mut b = RoadNetworkBuilder::new();
        b.add_edge(NodeId(0), NodeId(1), HardCap { free_secs: 30.0, cap: 5.0 });
        let net = b.build();
        let r = equilibrate(&net, &SolverConfig::new(10, 5.0));
        assert!(matches!(r, Err(EquilibriumError::Gridlock { path: PathId(0) })));
    }

    #[test]
    fn all_routes_impassable_is_gridlock() {
        let mut b = RoadNetworkBuilder::new();
        b.add_edge(NodeId(0), NodeId(1), RoadSegment::new(0.0, 1, 100.0).unwrap());
        let net = b.build();
        let r = equilibrate(&net, &SolverConfig::new(10, 5.0));
        assert!(matches!(r, Err(EquilibriumError::Gridlock { path: PathId(0) })));
    }

    #[test]
    fn invalid_tolerance_rejected() {
        let net = twin_routes(bpr(60.0, 100.0));
        let r = equilibrate(&net, &SolverConfig::new(10, -1.0));
        assert!(matches!(r, Err(EquilibriumError::Config(_))));
    }

    #[test]
    fn zero_vehicles_is_trivially_balanced() {
        let net = twin_routes(bpr(60.0, 100.0));
        let eq = equilibrate(&net, &SolverConfig::new(0, 0.0)).unwrap();
        assert_eq!(eq.vehicles(), &[0, 0]);
        assert!(eq.is_converged());
        assert!(eq.mean_time().is_none());
    }

    #[test]
    fn mean_time_weights_by_vehicles() {
        let net = twin_routes(bpr(60.0, 100.0));
        let eq = equilibrate(&net, &SolverConfig::new(200, 5.0)).unwrap();
        let want = (101.0 * eq.times[0] + 99.0 * eq.times[1]) / 200.0;
        assert!((eq.mean_time().unwrap() - want).abs() < 1e-9);
    }

    #[test]
    fn custom_endpoints() {
        let net = twin_routes(bpr(60.0, 100.0));
        let eq = equilibrate_between(&net, NodeId(1), NodeId(3), &SolverConfig::new(5, 1.0), &mut NoopObserver)
            .unwrap();
        assert_eq!(eq.paths.len(), 1);
        assert_eq!(eq.vehicles(), &[5]);
    }

    #[test]
    fn unknown_endpoint_is_network_error() {
        let net = twin_routes(bpr(60.0, 100.0));
        let r = equilibrate_between(&net, NodeId(0), NodeId(99), &SolverConfig::default(), &mut NoopObserver);
        assert!(matches!(r, Err(EquilibriumError::Network(_))));
    }
}
