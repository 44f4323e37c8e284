//! Vehicles per route.

use nt_core::PathId;
use nt_network::Path;

/// Number of vehicles on each route, indexed by [`PathId`].
///
/// The sum over all routes always equals [`total`](Self::total): the only
/// mutation is [`transfer`](Self::transfer), which moves exactly one
/// vehicle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowAssignment {
    vehicles: Vec<u32>,
    total:    u32,
}

impl FlowAssignment {
    /// All `total` vehicles on `route`, none on the other `routes − 1`.
    ///
    /// # Panics
    /// Panics if `route` is not below `routes`.
    pub fn all_on(routes: usize, route: PathId, total: u32) -> Self {
        assert!(route.index() < routes, "route {route} out of range for {routes} routes");
        let mut vehicles = vec![0; routes];
        vehicles[route.index()] = total;
        Self { vehicles, total }
    }

    /// Vehicles per route, in route order.
    pub fn vehicles(&self) -> &[u32] {
        &self.vehicles
    }

    #[inline]
    pub fn get(&self, route: PathId) -> u32 {
        self.vehicles[route.index()]
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    /// Move one vehicle from `from` to `to`.
    ///
    /// Returns `false` and changes nothing when `from` is empty, `to`
    /// already holds every vehicle, or both are the same route.
    pub fn transfer(&mut self, from: PathId, to: PathId) -> bool {
        if from == to || self.get(from) == 0 || self.get(to) >= self.total {
            return false;
        }
        self.vehicles[from.index()] -= 1;
        self.vehicles[to.index()] += 1;
        true
    }

    /// Aggregate load on every edge of a network with `edge_count` edges:
    /// the sum of this assignment over the routes using each edge.
    pub fn edge_loads(&self, paths: &[Path], edge_count: usize) -> Vec<f64> {
        debug_assert_eq!(paths.len(), self.vehicles.len());
        let mut loads = vec![0.0; edge_count];
        for (path, &n) in paths.iter().zip(&self.vehicles) {
            if n == 0 {
                continue;
            }
            for edge in path.edges() {
                loads[edge.index()] += n as f64;
            }
        }
        loads
    }
}
