//! End-to-end delivery planning: orders to evaluated trips.
//!
//! Each order's demand is computed on its own line items (per-order
//! homogeneity), the orders become delivery nodes, Clarke-Wright builds
//! trips, and every trip is evaluated into numbered stops.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::capacity::{
    compute_demand, validate_aggregate_with, AggregateCapacityResult, CapacityResult,
    DEFAULT_HIGH_UTILIZATION_THRESHOLD,
};
use crate::constructive::build_routes;
use crate::error::Result;
use crate::evaluation::TripEvaluator;
use crate::models::{DeliveryNode, LineItem, Location, NodeId, Order, TripPlan, Violation};

/// Default vehicle capacity in capacity units.
pub const DEFAULT_VEHICLE_CAPACITY: f64 = 200.0;

/// Planning options.
///
/// # Examples
///
/// ```
/// use u_delivery::planner::PlanOptions;
///
/// let options: PlanOptions = serde_json::from_str(r#"{"vehicleCapacity": 150}"#).unwrap();
/// assert_eq!(options.vehicle_capacity, 150.0);
/// assert_eq!(options.high_utilization_threshold, 80.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlanOptions {
    /// Vehicle capacity in capacity units.
    pub vehicle_capacity: f64,
    /// Utilization percentage above which a larger vehicle is recommended.
    pub high_utilization_threshold: f64,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            vehicle_capacity: DEFAULT_VEHICLE_CAPACITY,
            high_utilization_threshold: DEFAULT_HIGH_UTILIZATION_THRESHOLD,
        }
    }
}

impl PlanOptions {
    /// Creates options for a vehicle of the given capacity.
    pub fn new(vehicle_capacity: f64) -> Self {
        Self {
            vehicle_capacity,
            ..Self::default()
        }
    }

    /// Sets the high-utilization threshold (percent).
    pub fn with_high_utilization_threshold(mut self, threshold: f64) -> Self {
        self.high_utilization_threshold = threshold;
        self
    }
}

/// An order to deliver: where it goes and what it carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryOrder<I> {
    /// Order identifier; becomes the node ID of its stop.
    pub id: I,
    /// Store location.
    pub location: Location,
    /// Order lines.
    pub items: Vec<LineItem>,
}

/// Demand computed for one order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDemand<I> {
    /// Order identifier.
    pub order_id: I,
    /// Capacity report of the order alone.
    pub capacity: CapacityResult,
}

/// Result of one planning invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryPlan<I> {
    /// Evaluated trips, in construction order.
    pub trips: Vec<TripPlan<I>>,
    /// Summed round-trip distance of all trips, in km.
    pub total_distance_km: f64,
    /// Trips carrying more than the vehicle capacity.
    pub violations: Vec<Violation>,
    /// Per-order demand, in input order.
    pub demands: Vec<OrderDemand<I>>,
}

impl<I> DeliveryPlan<I> {
    /// Number of trips.
    pub fn num_trips(&self) -> usize {
        self.trips.len()
    }

    /// Number of stops across all trips.
    pub fn num_stops(&self) -> usize {
        self.trips.iter().map(|t| t.len()).sum()
    }

    /// Returns `true` if no trip exceeds the vehicle capacity.
    pub fn is_feasible(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Capacity and routing operations bound to one set of [`PlanOptions`].
///
/// # Examples
///
/// ```
/// use u_delivery::models::{LineItem, Location, Product};
/// use u_delivery::planner::{DeliveryOrder, PlanOptions, RoutePlanner};
///
/// let gallon = Product::new("Gallon 19L").with_heterogeneous_conversion_factor(3.3);
/// let orders = vec![
///     DeliveryOrder {
///         id: "ORD-1".to_string(),
///         location: Location::new(-6.20, 106.82),
///         items: vec![LineItem::new("G19", 40, gallon.clone())],
///     },
///     DeliveryOrder {
///         id: "ORD-2".to_string(),
///         location: Location::new(-6.21, 106.83),
///         items: vec![LineItem::new("G19", 30, gallon)],
///     },
/// ];
///
/// let planner = RoutePlanner::new(PlanOptions::new(100.0));
/// let plan = planner.plan(&orders, Location::new(-6.19, 106.80)).unwrap();
/// assert_eq!(plan.num_trips(), 1);
/// assert_eq!(plan.num_stops(), 2);
/// assert!(plan.is_feasible());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RoutePlanner {
    options: PlanOptions,
}

impl RoutePlanner {
    /// Creates a planner with the given options.
    pub fn new(options: PlanOptions) -> Self {
        Self { options }
    }

    /// Planning options in use.
    pub fn options(&self) -> &PlanOptions {
        &self.options
    }

    /// Demand of one load against the configured vehicle.
    pub fn compute_demand(&self, items: &[LineItem]) -> Result<CapacityResult> {
        compute_demand(items, self.options.vehicle_capacity)
    }

    /// Capacity report of several orders sharing the configured vehicle.
    pub fn validate_aggregate(&self, orders: &[Order]) -> Result<AggregateCapacityResult> {
        validate_aggregate_with(
            orders,
            self.options.vehicle_capacity,
            self.options.high_utilization_threshold,
        )
    }

    /// Plans trips for `orders` departing from and returning to `depot`.
    ///
    /// An order heavier than the vehicle still gets its own trip and is
    /// reported in [`DeliveryPlan::violations`]. Any invalid order aborts
    /// the whole plan.
    pub fn plan<I: NodeId>(&self, orders: &[DeliveryOrder<I>], depot: Location) -> Result<DeliveryPlan<I>> {
        let capacity = self.options.vehicle_capacity;

        let mut demands = Vec::with_capacity(orders.len());
        let mut nodes = Vec::with_capacity(orders.len());
        for order in orders {
            let result = compute_demand(&order.items, capacity)?;
            nodes.push(DeliveryNode::new(
                order.id.clone(),
                order.location,
                result.total_units(),
            ));
            demands.push(OrderDemand {
                order_id: order.id.clone(),
                capacity: result,
            });
        }

        let trips = build_routes(&nodes, depot, capacity)?;
        let evaluator = TripEvaluator::new(&nodes, depot, capacity);
        let (plans, violations) = evaluator.evaluate(&trips)?;
        let total_distance_km = plans.iter().map(|p| p.total_distance_km()).sum();

        debug!(
            orders = orders.len(),
            trips = plans.len(),
            total_distance_km,
            violations = violations.len(),
            "planned deliveries"
        );

        Ok(DeliveryPlan {
            trips: plans,
            total_distance_km,
            violations,
            demands,
        })
    }
}

/// Plans deliveries with the given options. See [`RoutePlanner::plan`].
pub fn plan_deliveries<I: NodeId>(
    orders: &[DeliveryOrder<I>],
    depot: Location,
    options: &PlanOptions,
) -> Result<DeliveryPlan<I>> {
    RoutePlanner::new(options.clone()).plan(orders, depot)
}
