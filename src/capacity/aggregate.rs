//! Capacity validation of several orders loaded onto one vehicle.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::demand::{compute_demand, round2, CapacityResult};
use crate::error::{PlanError, Result};
use crate::models::{LineItem, Order};

/// Utilization (percent) above which a fitting load triggers a larger-vehicle hint.
pub const DEFAULT_HIGH_UTILIZATION_THRESHOLD: f64 = 80.0;

/// Capacity report for a set of orders sharing one vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateCapacityResult {
    /// Demand of the merged line items.
    #[serde(flatten)]
    pub capacity: CapacityResult,
    /// Number of orders validated.
    pub order_count: usize,
    /// Distinct product IDs across all orders.
    pub product_types: usize,
    /// Human-readable guidance for the dispatcher.
    pub recommendation: String,
}

/// Merges line items across orders by product ID, summing quantities.
///
/// Products keep their first-seen order. The first resolved product record
/// seen for an ID is kept.
fn merge_items(orders: &[Order]) -> Result<Vec<LineItem>> {
    let mut merged: Vec<LineItem> = Vec::new();
    for item in orders.iter().flat_map(|o| o.items.iter()) {
        if item.quantity < 0 {
            return Err(PlanError::invalid(format!(
                "quantity for product {} must not be negative, got {}",
                item.product_id, item.quantity
            )));
        }
        match merged.iter_mut().find(|m| m.product_id == item.product_id) {
            Some(existing) => {
                existing.quantity = existing.quantity.checked_add(item.quantity).ok_or_else(|| {
                    PlanError::invalid(format!(
                        "total quantity for product {} overflows",
                        item.product_id
                    ))
                })?;
                if existing.product.is_none() {
                    existing.product = item.product.clone();
                }
            }
            None => merged.push(item.clone()),
        }
    }
    Ok(merged)
}

fn recommend(result: &CapacityResult, vehicle_capacity: f64, high_threshold: f64) -> String {
    if !result.can_fit {
        let excess = round2(result.total_capacity_used - vehicle_capacity);
        format!(
            "Load exceeds vehicle capacity by {excess:.2} units. \
             Reduce order quantities or split the load across multiple vehicles."
        )
    } else if result.utilization_percentage > high_threshold {
        format!(
            "Capacity utilization is {:.2}%. Consider a larger vehicle for future loads.",
            result.utilization_percentage
        )
    } else {
        format!(
            "Vehicle capacity is adequate ({:.2}% utilized).",
            result.utilization_percentage
        )
    }
}

/// Validates that all `orders` fit together in one vehicle.
///
/// Homogeneity is decided over the union of products across all orders, so
/// two single-product orders of different products form a mixed load.
/// Uses [`DEFAULT_HIGH_UTILIZATION_THRESHOLD`] for the recommendation.
///
/// # Errors
///
/// Same as [`compute_demand`].
///
/// # Examples
///
/// ```
/// use u_delivery::capacity::validate_aggregate;
/// use u_delivery::models::{LineItem, Order, Product};
///
/// let cup = Product::new("Cup").with_heterogeneous_conversion_factor(0.57);
/// let orders = vec![
///     Order::new(vec![LineItem::new("CUP", 60, cup.clone())]),
///     Order::new(vec![LineItem::new("CUP", 40, cup)]),
/// ];
/// let report = validate_aggregate(&orders, 200.0).unwrap();
/// assert_eq!(report.order_count, 2);
/// assert_eq!(report.product_types, 1);
/// assert!(report.capacity.is_homogeneous);
/// assert_eq!(report.capacity.total_capacity_used, 100.0);
/// ```
pub fn validate_aggregate(orders: &[Order], vehicle_capacity: f64) -> Result<AggregateCapacityResult> {
    validate_aggregate_with(orders, vehicle_capacity, DEFAULT_HIGH_UTILIZATION_THRESHOLD)
}

/// Like [`validate_aggregate`] with an explicit high-utilization threshold (percent).
pub fn validate_aggregate_with(
    orders: &[Order],
    vehicle_capacity: f64,
    high_utilization_threshold: f64,
) -> Result<AggregateCapacityResult> {
    let merged = merge_items(orders)?;
    let capacity = compute_demand(&merged, vehicle_capacity)?;
    let recommendation = recommend(&capacity, vehicle_capacity, high_utilization_threshold);

    debug!(
        orders = orders.len(),
        product_types = merged.len(),
        total = capacity.total_capacity_used,
        "validated aggregate load"
    );

    Ok(AggregateCapacityResult {
        order_count: orders.len(),
        product_types: merged.len(),
        capacity,
        recommendation,
    })
}
