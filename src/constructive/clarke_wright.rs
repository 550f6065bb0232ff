//! Clarke-Wright savings algorithm over geographic delivery nodes.
//!
//! # Algorithm
//!
//! The savings algorithm (Clarke & Wright, 1964) starts with each node on
//! its own trip (depot → node → depot). It then merges trips by linking an
//! endpoint of one trip to an endpoint of another, in decreasing order of
//! the distance saved:
//!
//! ```text
//! s(i, j) = d(0, i) + d(0, j) - d(i, j)
//! ```
//!
//! A merge is accepted only when both linked nodes are trip endpoints and
//! the combined load fits the vehicle. Iteration stops at the first negative
//! saving; zero savings are still merged since they never lengthen a tour.
//!
//! # Complexity
//!
//! O(n² log n) where n = number of nodes (dominated by sorting savings).
//!
//! # Reference
//!
//! Clarke, G. & Wright, J.W. (1964). "Scheduling of Vehicles from a Central
//! Depot to a Number of Delivery Points", *Operations Research* 12(4), 568-581.

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::capacity::validate_capacity;
use crate::distance::DistanceMatrix;
use crate::error::{PlanError, Result};
use crate::models::{DeliveryNode, Location, NodeId, Trip};

/// A savings value for linking two nodes on one trip.
///
/// `from` and `to` are node positions in the input slice, `from < to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Saving {
    /// Position of the first node.
    pub from: usize,
    /// Position of the second node.
    pub to: usize,
    /// Distance saved (km) by serving both on one trip.
    pub value: f64,
}

/// Computes savings for every unordered node pair, sorted by decreasing value.
///
/// `distances` must have the depot at index 0 and node `k` at index `k + 1`,
/// as built by [`DistanceMatrix::from_locations`]. Ties keep generation
/// order (`from` ascending, then `to` ascending).
pub fn compute_savings(distances: &DistanceMatrix) -> Vec<Saving> {
    let n = distances.size().saturating_sub(1);
    let mut savings = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            let value = distances.get(0, i + 1) + distances.get(0, j + 1)
                - distances.get(i + 1, j + 1);
            savings.push(Saving {
                from: i,
                to: j,
                value,
            });
        }
    }
    // Stable: equal savings stay in generation order.
    savings.sort_by(|a, b| b.value.total_cmp(&a.value));
    savings
}

fn validate_input<I: NodeId>(
    nodes: &[DeliveryNode<I>],
    depot: Location,
    vehicle_capacity: f64,
) -> Result<()> {
    validate_capacity(vehicle_capacity)?;
    depot.validate("depot")?;

    let mut seen = HashSet::with_capacity(nodes.len());
    for node in nodes {
        node.location().validate(&format!("node {:?}", node.id()))?;
        if !node.demand().is_finite() || node.demand() < 0.0 {
            return Err(PlanError::invalid(format!(
                "demand of node {:?} must be a finite non-negative number, got {}",
                node.id(),
                node.demand()
            )));
        }
        if !seen.insert(node.id()) {
            return Err(PlanError::invalid(format!("duplicate node id {:?}", node.id())));
        }
    }
    Ok(())
}

/// Trip under construction, indexed by node position.
#[derive(Debug, Default)]
struct TripSlot {
    path: Vec<usize>,
    load: f64,
}

impl TripSlot {
    fn is_endpoint(&self, node: usize) -> bool {
        self.path.first() == Some(&node) || self.path.last() == Some(&node)
    }
}

/// Builds capacity-feasible trips with the Clarke-Wright savings heuristic.
///
/// Every node appears in exactly one returned trip and no trip's load
/// exceeds `vehicle_capacity`, except a single node whose own demand is
/// larger than the vehicle: it stays on its own trip. The result is
/// deterministic for a given input order.
///
/// # Errors
///
/// [`PlanError::InvalidArgument`] for non-finite coordinates, negative or
/// non-finite demand or capacity, and duplicate node IDs.
///
/// # Examples
///
/// ```
/// use u_delivery::constructive::build_routes;
/// use u_delivery::models::{DeliveryNode, Location};
///
/// let depot = Location::new(0.0, 0.0);
/// let nodes = vec![
///     DeliveryNode::new("A", Location::new(0.0, 0.010), 4.0),
///     DeliveryNode::new("B", Location::new(0.0, 0.011), 4.0),
///     DeliveryNode::new("C", Location::new(0.0, -0.010), 4.0),
/// ];
/// let trips = build_routes(&nodes, depot, 8.0).unwrap();
/// assert_eq!(trips.len(), 2);
/// assert_eq!(trips[0].path(), &["B", "A"]);
/// assert_eq!(trips[1].path(), &["C"]);
/// ```
pub fn build_routes<I: NodeId>(
    nodes: &[DeliveryNode<I>],
    depot: Location,
    vehicle_capacity: f64,
) -> Result<Vec<Trip<I>>> {
    validate_input(nodes, depot, vehicle_capacity)?;
    if nodes.is_empty() {
        return Ok(Vec::new());
    }

    let locations: Vec<Location> = nodes.iter().map(|n| n.location()).collect();
    let distances = DistanceMatrix::from_locations(depot, &locations);
    let savings = compute_savings(&distances);

    // trip_of[node] = slot currently holding the node
    let mut trip_of: Vec<usize> = (0..nodes.len()).collect();
    let mut trips: Vec<TripSlot> = nodes
        .iter()
        .enumerate()
        .map(|(i, n)| TripSlot {
            path: vec![i],
            load: n.demand(),
        })
        .collect();
    let mut merges = 0usize;

    for saving in &savings {
        if saving.value < 0.0 {
            break;
        }

        let rf = trip_of[saving.from];
        let rt = trip_of[saving.to];
        if rf == rt {
            continue;
        }
        if !trips[rf].is_endpoint(saving.from) || !trips[rt].is_endpoint(saving.to) {
            continue;
        }
        let combined_load = trips[rf].load + trips[rt].load;
        if combined_load > vehicle_capacity {
            continue;
        }

        // The `to` trip becomes the prefix ending at `to`, followed by the
        // `from` trip starting at `from`.
        let mut prefix = std::mem::take(&mut trips[rt]);
        if prefix.path.last() != Some(&saving.to) {
            prefix.path.reverse();
        }
        let suffix = &mut trips[rf];
        if suffix.path.first() != Some(&saving.from) {
            suffix.path.reverse();
        }
        for &node in &prefix.path {
            trip_of[node] = rf;
        }
        prefix.path.append(&mut suffix.path);
        suffix.path = prefix.path;
        suffix.load = combined_load;
        merges += 1;

        trace!(
            from = ?nodes[saving.from].id(),
            to = ?nodes[saving.to].id(),
            saving = saving.value,
            load = combined_load,
            "merged trips"
        );
    }

    let result: Vec<Trip<I>> = trips
        .into_iter()
        .filter(|slot| !slot.path.is_empty())
        .map(|slot| {
            let path = slot.path.iter().map(|&i| nodes[i].id().clone()).collect();
            Trip::new(path, slot.load)
        })
        .collect();

    debug!(
        nodes = nodes.len(),
        savings = savings.len(),
        merges,
        trips = result.len(),
        "built routes"
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &'static str, lat: f64, lng: f64, demand: f64) -> DeliveryNode<&'static str> {
        DeliveryNode::new(id, Location::new(lat, lng), demand)
    }

    fn origin() -> Location {
        Location::new(0.0, 0.0)
    }

    #[test]
    fn test_empty() {
        let trips = build_routes::<&str>(&[], origin(), 10.0).expect("valid");
        assert!(trips.is_empty());
    }

    #[test]
    fn test_single_node() {
        let trips = build_routes(&[node("A", 0.0, 0.01, 3.0)], origin(), 10.0).expect("valid");
        assert_eq!(trips.len(), 1);
        assert_eq!(trips[0].path(), &["A"]);
        assert_eq!(trips[0].load(), 3.0);
    }

    #[test]
    fn test_line_merges_into_one_trip() {
        let nodes = vec![
            node("A", 0.0, 0.01, 10.0),
            node("B", 0.0, 0.02, 10.0),
            node("C", 0.0, 0.03, 10.0),
        ];
        let trips = build_routes(&nodes, origin(), 30.0).expect("valid");
        assert_eq!(trips.len(), 1);
        assert_eq!(trips[0].load(), 30.0);
        let mut ids = trips[0].path().to_vec();
        ids.sort_unstable();
        assert_eq!(ids, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_capacity_splits() {
        let nodes = vec![
            node("A", 0.0, 0.01, 15.0),
            node("B", 0.0, 0.02, 15.0),
            node("C", 0.0, 0.03, 15.0),
        ];
        let trips = build_routes(&nodes, origin(), 25.0).expect("valid");
        assert_eq!(trips.len(), 3);
        assert!(trips.iter().all(|t| t.load() <= 25.0));
    }

    #[test]
    fn test_capacity_exactly_full_merges() {
        let nodes = vec![node("A", 0.0, 0.01, 12.5), node("B", 0.0, 0.02, 12.5)];
        let trips = build_routes(&nodes, origin(), 25.0).expect("valid");
        assert_eq!(trips.len(), 1);
        assert_eq!(trips[0].load(), 25.0);
    }

    #[test]
    fn test_oversized_node_stays_alone() {
        let nodes = vec![node("A", 0.0, 0.01, 50.0), node("B", 0.0, 0.02, 5.0)];
        let trips = build_routes(&nodes, origin(), 20.0).expect("valid");
        assert_eq!(trips.len(), 2);
        assert_eq!(trips[0].path(), &["A"]);
        assert_eq!(trips[0].load(), 50.0);
    }

    #[test]
    fn test_interior_node_not_merged() {
        // A-B-C form a trip along the line with B in the middle; D sits next
        // to B off the line and must attach to an endpoint, never to B.
        let nodes = vec![
            node("A", 0.0, 0.010, 1.0),
            node("B", 0.0, 0.020, 1.0),
            node("C", 0.0, 0.030, 1.0),
            node("D", 0.001, 0.020, 1.0),
        ];
        let trips = build_routes(&nodes, origin(), 100.0).expect("valid");
        assert_eq!(trips.len(), 1);
        // B-C and C-D link first; A can then only attach to the B end.
        assert_eq!(trips[0].path(), &["D", "C", "B", "A"]);
    }

    #[test]
    fn test_deterministic() {
        let nodes = vec![
            node("A", 0.01, 0.01, 3.0),
            node("B", 0.02, -0.01, 4.0),
            node("C", -0.01, 0.02, 5.0),
            node("D", 0.015, 0.015, 2.0),
        ];
        let first = build_routes(&nodes, origin(), 9.0).expect("valid");
        let second = build_routes(&nodes, origin(), 9.0).expect("valid");
        assert_eq!(first, second);
    }

    #[test]
    fn test_savings_sorted_descending() {
        let dm = DistanceMatrix::from_locations(
            origin(),
            &[
                Location::new(0.0, 0.01),
                Location::new(0.0, 0.02),
                Location::new(0.0, -0.01),
            ],
        );
        let savings = compute_savings(&dm);
        assert_eq!(savings.len(), 3);
        assert!(savings.windows(2).all(|w| w[0].value >= w[1].value));
        assert_eq!((savings[0].from, savings[0].to), (0, 1));
        assert!(savings.iter().all(|s| s.from < s.to));
    }

    #[test]
    fn test_savings_formula() {
        let dm = DistanceMatrix::from_data(3, vec![0.0, 3.0, 4.0, 3.0, 0.0, 1.0, 4.0, 1.0, 0.0])
            .expect("valid");
        let savings = compute_savings(&dm);
        assert_eq!(savings.len(), 1);
        assert!((savings[0].value - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_non_finite_coordinates() {
        let nodes = vec![node("A", f64::NAN, 0.0, 1.0)];
        assert!(matches!(
            build_routes(&nodes, origin(), 10.0),
            Err(PlanError::InvalidArgument(_))
        ));
        let nodes = vec![node("A", 0.0, 0.0, 1.0)];
        assert!(build_routes(&nodes, Location::new(0.0, f64::INFINITY), 10.0).is_err());
    }

    #[test]
    fn test_rejects_bad_demand_and_capacity() {
        assert!(build_routes(&[node("A", 0.0, 0.0, -1.0)], origin(), 10.0).is_err());
        assert!(build_routes(&[node("A", 0.0, 0.0, f64::NAN)], origin(), 10.0).is_err());
        assert!(build_routes(&[node("A", 0.0, 0.0, 1.0)], origin(), -5.0).is_err());
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let nodes = vec![node("A", 0.0, 0.01, 1.0), node("A", 0.0, 0.02, 1.0)];
        let err = build_routes(&nodes, origin(), 10.0).expect_err("duplicate");
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_zero_demand_nodes_are_routed() {
        let nodes = vec![node("A", 0.0, 0.01, 0.0), node("B", 0.0, 0.02, 0.0)];
        let trips = build_routes(&nodes, origin(), 0.0).expect("valid");
        assert_eq!(trips.len(), 1);
        assert_eq!(trips[0].load(), 0.0);
    }
}
