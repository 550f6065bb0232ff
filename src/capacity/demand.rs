//! Capacity-unit demand of a set of line items.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PlanError, Result};
use crate::models::{LineItem, Product};

/// Per-line breakdown of a capacity computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityDetail {
    /// Product identifier.
    pub product_id: String,
    /// Product display name.
    pub product_name: String,
    /// Ordered quantity.
    pub quantity: i64,
    /// Capacity units per item applied to this line.
    pub conversion_rate: f64,
    /// `quantity * conversion_rate`.
    pub capacity_needed: f64,
}

/// Result of fitting a set of line items into one vehicle.
///
/// `total_capacity_used`, `remaining_capacity` and `utilization_percentage`
/// are rounded to 2 decimals for display. `can_fit` is decided on the
/// unrounded total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityResult {
    /// Summed capacity units of all lines.
    pub total_capacity_used: f64,
    /// Vehicle capacity minus total; negative when overloaded.
    pub remaining_capacity: f64,
    /// `true` when the load holds at most one distinct product.
    pub is_homogeneous: bool,
    /// `true` when the unrounded total does not exceed the vehicle capacity.
    pub can_fit: bool,
    /// Total as a percentage of vehicle capacity.
    pub utilization_percentage: f64,
    /// Per-line breakdown, in input order.
    pub capacity_details: Vec<CapacityDetail>,
}

impl CapacityResult {
    /// Unrounded sum of `capacity_needed` over all lines, in line order.
    ///
    /// This is the value `can_fit` is decided on; use it wherever capacity is
    /// compared again, since `total_capacity_used` is rounded for display.
    pub fn total_units(&self) -> f64 {
        self.capacity_details
            .iter()
            .fold(0.0, |acc, d| acc + d.capacity_needed)
    }
}

/// Rounds to 2 decimal places, halves away from zero.
///
/// ```
/// use u_delivery::capacity::round2;
///
/// assert_eq!(round2(1.234), 1.23);
/// assert_eq!(round2(2.675001), 2.68);
/// assert_eq!(round2(-0.125), -0.13);
/// ```
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Returns `true` if the items contain at most one distinct product ID.
pub fn is_homogeneous(items: &[LineItem]) -> bool {
    let distinct: HashSet<&str> = items.iter().map(|i| i.product_id.as_str()).collect();
    distinct.len() <= 1
}

pub(crate) fn validate_capacity(vehicle_capacity: f64) -> Result<()> {
    if !vehicle_capacity.is_finite() || vehicle_capacity < 0.0 {
        return Err(PlanError::invalid(format!(
            "vehicle capacity must be a finite non-negative number, got {vehicle_capacity}"
        )));
    }
    Ok(())
}

fn checked_rate(product_id: &str, rate: f64) -> Result<f64> {
    if !rate.is_finite() || rate < 0.0 {
        return Err(PlanError::invalid(format!(
            "conversion rate for product {product_id} must be a finite non-negative number, got {rate}"
        )));
    }
    Ok(rate)
}

/// Computes the capacity units needed to carry `items` in one vehicle.
///
/// Homogeneity is decided over the distinct product IDs of `items`: one
/// product (or none) uses each product's unit factor, several products use
/// the heterogeneous factor chain (see [`Product::conversion_rate`]).
///
/// # Errors
///
/// - [`PlanError::DivideByZero`] if `vehicle_capacity` is zero.
/// - [`PlanError::InvalidArgument`] for a negative quantity, a negative or
///   non-finite conversion rate, or an invalid capacity.
/// - [`PlanError::MissingProduct`] if a line has no product record.
///
/// Any error aborts the whole computation.
///
/// # Examples
///
/// ```
/// use u_delivery::capacity::compute_demand;
/// use u_delivery::models::{LineItem, Product};
///
/// let items = vec![
///     LineItem::new("P1", 100, Product::new("Cup 240ml")),
///     LineItem::new("P2", 50, Product::new("Bottle 600ml").with_heterogeneous_conversion_factor(1.6)),
/// ];
/// let result = compute_demand(&items, 200.0).unwrap();
/// assert!(!result.is_homogeneous);
/// assert_eq!(result.total_capacity_used, 180.0);
/// assert!(result.can_fit);
/// assert_eq!(result.utilization_percentage, 90.0);
/// ```
pub fn compute_demand(items: &[LineItem], vehicle_capacity: f64) -> Result<CapacityResult> {
    validate_capacity(vehicle_capacity)?;
    if vehicle_capacity == 0.0 {
        return Err(PlanError::DivideByZero("utilization percentage"));
    }

    let homogeneous = is_homogeneous(items);
    let mut total = 0.0;
    let mut details = Vec::with_capacity(items.len());

    for item in items {
        if item.quantity < 0 {
            return Err(PlanError::invalid(format!(
                "quantity for product {} must not be negative, got {}",
                item.product_id, item.quantity
            )));
        }
        let product = item
            .product
            .as_ref()
            .ok_or_else(|| PlanError::MissingProduct {
                product_id: item.product_id.clone(),
            })?;
        let rate = checked_rate(&item.product_id, product.conversion_rate(homogeneous))?;
        let needed = item.quantity as f64 * rate;
        total += needed;

        details.push(CapacityDetail {
            product_id: item.product_id.clone(),
            product_name: product.name.clone(),
            quantity: item.quantity,
            conversion_rate: rate,
            capacity_needed: needed,
        });
    }

    let result = CapacityResult {
        total_capacity_used: round2(total),
        remaining_capacity: round2(vehicle_capacity - total),
        is_homogeneous: homogeneous,
        can_fit: total <= vehicle_capacity,
        utilization_percentage: round2(total / vehicle_capacity * 100.0),
        capacity_details: details,
    };

    debug!(
        lines = items.len(),
        homogeneous,
        total = result.total_capacity_used,
        capacity = vehicle_capacity,
        can_fit = result.can_fit,
        "computed demand"
    );

    Ok(result)
}

/// Maximum whole items of `product` that fit in an otherwise empty vehicle.
///
/// # Errors
///
/// - [`PlanError::DivideByZero`] if `vehicle_capacity` is zero.
/// - [`PlanError::InvalidArgument`] if the selected conversion rate is not
///   positive, or the capacity is invalid.
///
/// # Examples
///
/// ```
/// use u_delivery::capacity::max_units_for;
/// use u_delivery::models::Product;
///
/// let gallon = Product::new("Gallon 19L").with_heterogeneous_conversion_factor(3.3);
/// assert_eq!(max_units_for(&gallon, 200.0, true).unwrap(), 200);
/// assert_eq!(max_units_for(&gallon, 200.0, false).unwrap(), 60);
/// ```
pub fn max_units_for(product: &Product, vehicle_capacity: f64, is_homogeneous: bool) -> Result<u64> {
    validate_capacity(vehicle_capacity)?;
    if vehicle_capacity == 0.0 {
        return Err(PlanError::DivideByZero("max units"));
    }
    let rate = product.conversion_rate(is_homogeneous);
    if !rate.is_finite() || rate <= 0.0 {
        return Err(PlanError::invalid(format!(
            "conversion rate for {} must be positive, got {rate}",
            product.name
        )));
    }
    // The quotient can land one ulp below an integer (200 / 1.6); count the
    // next unit only when its product actually fits, as `compute_demand` would.
    let units = (vehicle_capacity / rate).floor();
    if (units + 1.0) * rate <= vehicle_capacity {
        Ok((units + 1.0) as u64)
    } else {
        Ok(units as u64)
    }
}
