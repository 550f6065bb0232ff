//! Trip evaluator that derives stop sequences, distances and load feasibility.

use std::collections::HashMap;

use tracing::warn;

use crate::distance::haversine_km;
use crate::error::{PlanError, Result};
use crate::models::{DeliveryNode, Location, NodeId, Trip, TripPlan, Violation, ViolationType};

/// Evaluates trips by computing each stop's sequence number and distance
/// from the previous stop, the round-trip distance, and the carried load.
///
/// # Examples
///
/// ```
/// use u_delivery::models::{DeliveryNode, Location};
/// use u_delivery::evaluation::TripEvaluator;
///
/// let nodes = vec![
///     DeliveryNode::new("A", Location::new(0.0, 0.01), 4.0),
///     DeliveryNode::new("B", Location::new(0.0, 0.02), 4.0),
/// ];
/// let evaluator = TripEvaluator::new(&nodes, Location::new(0.0, 0.0), 10.0);
/// let (plan, violations) = evaluator.plan_trip(&["A", "B"]).unwrap();
/// assert_eq!(plan.len(), 2);
/// assert_eq!(plan.stops()[1].sequence, 2);
/// assert!(violations.is_empty());
/// ```
pub struct TripEvaluator<'a, I> {
    depot: Location,
    nodes: HashMap<&'a I, &'a DeliveryNode<I>>,
    vehicle_capacity: f64,
}

impl<'a, I: NodeId> TripEvaluator<'a, I> {
    /// Creates a new evaluator for the given planning input.
    pub fn new(nodes: &'a [DeliveryNode<I>], depot: Location, vehicle_capacity: f64) -> Self {
        Self {
            depot,
            nodes: nodes.iter().map(|n| (n.id(), n)).collect(),
            vehicle_capacity,
        }
    }

    /// Builds a trip plan from a sequence of node IDs.
    ///
    /// Returns the plan and any constraint violations found (with
    /// `trip_index` 0).
    ///
    /// # Errors
    ///
    /// [`PlanError::InvalidArgument`] if a node ID is unknown to this evaluator.
    pub fn plan_trip(&self, path: &[I]) -> Result<(TripPlan<I>, Vec<Violation>)> {
        let mut plan = TripPlan::new();
        let mut violations = Vec::new();
        let mut total_distance = 0.0;
        let mut load = 0.0;
        let mut prev = self.depot;

        for id in path {
            let node = self
                .nodes
                .get(id)
                .ok_or_else(|| PlanError::invalid(format!("unknown node id {id:?}")))?;
            let travel = haversine_km(prev, node.location());
            total_distance += travel;
            load += node.demand();
            plan.push_stop(id.clone(), travel);
            prev = node.location();
        }

        // Return to depot
        if !path.is_empty() {
            total_distance += haversine_km(prev, self.depot);
        }

        plan.set_load(load);
        plan.set_total_distance_km(total_distance);

        if load > self.vehicle_capacity {
            violations.push(Violation::new(ViolationType::CapacityExceeded {
                trip_index: 0,
                load,
                capacity: self.vehicle_capacity,
            }));
        }

        Ok((plan, violations))
    }

    /// Evaluates a set of trips, returning their plans and all violations.
    pub fn evaluate(&self, trips: &[Trip<I>]) -> Result<(Vec<TripPlan<I>>, Vec<Violation>)> {
        let mut plans = Vec::with_capacity(trips.len());
        let mut all_violations = Vec::new();

        for (idx, trip) in trips.iter().enumerate() {
            let (plan, mut violations) = self.plan_trip(trip.path())?;

            for v in &mut violations {
                match &mut v.kind {
                    ViolationType::CapacityExceeded {
                        trip_index,
                        load,
                        capacity,
                    } => {
                        *trip_index = idx;
                        warn!(
                            trip = idx,
                            load = *load,
                            capacity = *capacity,
                            "trip exceeds vehicle capacity"
                        );
                    }
                }
            }

            plans.push(plan);
            all_violations.append(&mut violations);
        }

        Ok((plans, all_violations))
    }
}
