//! JSON request envelope for language bindings.
//!
//! Every public operation is reachable through one tagged [`Request`]; the
//! C ABI (`ffi` feature) and WebAssembly (`wasm` feature) bindings are thin
//! wrappers around [`handle`] and [`handle_json`].

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use crate::capacity::{
    compute_demand, max_units_for, size_to_conversion_factor, validate_aggregate_with,
    AggregateCapacityResult, CapacityResult, ConversionFactors, DEFAULT_HIGH_UTILIZATION_THRESHOLD,
};
use crate::constructive::build_routes;
use crate::distance::haversine_km;
use crate::error::{PlanError, Result};
use crate::models::{DeliveryNode, LineItem, Location, Order, Product, Trip};
use crate::planner::{plan_deliveries, DeliveryOrder, DeliveryPlan, PlanOptions};

fn default_threshold() -> f64 {
    DEFAULT_HIGH_UTILIZATION_THRESHOLD
}

/// An operation request, tagged by `op`.
///
/// # Examples
///
/// ```
/// use u_delivery::api::Request;
///
/// let request: Request =
///     serde_json::from_str(r#"{"op":"sizeToConversionFactor","label":"600ml"}"#).unwrap();
/// assert!(matches!(request, Request::SizeToConversionFactor { .. }));
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Request {
    /// Demand of one load.
    #[serde(rename_all = "camelCase")]
    ComputeDemand {
        /// Line items loaded together.
        items: Vec<LineItem>,
        /// Vehicle capacity in capacity units.
        vehicle_capacity: f64,
    },
    /// Demand of several orders sharing one vehicle.
    #[serde(rename_all = "camelCase")]
    ValidateAggregate {
        /// Orders sharing the vehicle.
        orders: Vec<Order>,
        /// Vehicle capacity in capacity units.
        vehicle_capacity: f64,
        /// Utilization percentage above which a larger vehicle is suggested.
        #[serde(default = "default_threshold")]
        high_utilization_threshold: f64,
    },
    /// Factors suggested by a size label.
    SizeToConversionFactor {
        /// Size label such as `"600ml"` or `"19 Liters"`.
        label: String,
    },
    /// Whole items of one product fitting a vehicle.
    #[serde(rename_all = "camelCase")]
    MaxUnitsFor {
        /// Product record whose factors apply.
        product: Product,
        /// Vehicle capacity in capacity units.
        vehicle_capacity: f64,
        /// Selects the unit factor (`true`) or the mixed-load chain.
        is_homogeneous: bool,
    },
    /// Clarke-Wright trip construction.
    #[serde(rename_all = "camelCase")]
    BuildRoutes {
        /// Stops to group into trips.
        nodes: Vec<DeliveryNode<String>>,
        /// Start and end of every trip.
        depot: Location,
        /// Vehicle capacity in capacity units.
        vehicle_capacity: f64,
    },
    /// Great-circle distance in km.
    Distance {
        /// First point.
        from: Location,
        /// Second point.
        to: Location,
    },
    /// Orders to evaluated trips.
    PlanDeliveries {
        /// Orders to deliver.
        orders: Vec<DeliveryOrder<String>>,
        /// Start and end of every trip.
        depot: Location,
        /// Planning options; defaults apply when omitted.
        #[serde(default)]
        options: PlanOptions,
    },
}

impl Request {
    fn op(&self) -> &'static str {
        match self {
            Self::ComputeDemand { .. } => "computeDemand",
            Self::ValidateAggregate { .. } => "validateAggregate",
            Self::SizeToConversionFactor { .. } => "sizeToConversionFactor",
            Self::MaxUnitsFor { .. } => "maxUnitsFor",
            Self::BuildRoutes { .. } => "buildRoutes",
            Self::Distance { .. } => "distance",
            Self::PlanDeliveries { .. } => "planDeliveries",
        }
    }
}

/// The result of a [`Request`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Response {
    /// Result of [`Request::ComputeDemand`].
    Capacity(CapacityResult),
    /// Result of [`Request::ValidateAggregate`].
    Aggregate(AggregateCapacityResult),
    /// Result of [`Request::SizeToConversionFactor`].
    Conversion(ConversionFactors),
    /// Result of [`Request::MaxUnitsFor`].
    #[serde(rename_all = "camelCase")]
    MaxUnits {
        /// Whole items that fit an empty vehicle.
        max_units: u64,
    },
    /// Result of [`Request::BuildRoutes`].
    Trips(Vec<Trip<String>>),
    /// Result of [`Request::Distance`].
    Distance {
        /// Great-circle distance in km.
        km: f64,
    },
    /// Result of [`Request::PlanDeliveries`].
    Plan(DeliveryPlan<String>),
}

/// Executes a request.
pub fn handle(request: Request) -> Result<Response> {
    debug!(op = request.op(), "handling request");
    let response = match request {
        Request::ComputeDemand {
            items,
            vehicle_capacity,
        } => Response::Capacity(compute_demand(&items, vehicle_capacity)?),
        Request::ValidateAggregate {
            orders,
            vehicle_capacity,
            high_utilization_threshold,
        } => Response::Aggregate(validate_aggregate_with(
            &orders,
            vehicle_capacity,
            high_utilization_threshold,
        )?),
        Request::SizeToConversionFactor { label } => {
            Response::Conversion(size_to_conversion_factor(&label))
        }
        Request::MaxUnitsFor {
            product,
            vehicle_capacity,
            is_homogeneous,
        } => Response::MaxUnits {
            max_units: max_units_for(&product, vehicle_capacity, is_homogeneous)?,
        },
        Request::BuildRoutes {
            nodes,
            depot,
            vehicle_capacity,
        } => Response::Trips(build_routes(&nodes, depot, vehicle_capacity)?),
        Request::Distance { from, to } => {
            from.validate("from")?;
            to.validate("to")?;
            Response::Distance {
                km: haversine_km(from, to),
            }
        }
        Request::PlanDeliveries {
            orders,
            depot,
            options,
        } => Response::Plan(plan_deliveries(&orders, depot, &options)?),
    };
    Ok(response)
}

/// Renders an error as `{"error": "<message>"}`.
pub fn error_json(message: &str) -> String {
    json!({ "error": message }).to_string()
}

/// Parses a JSON request, executes it, and renders the outcome.
///
/// Success is `{"ok": <response>}`; failure is `{"error": "<message>"}`.
///
/// # Examples
///
/// ```
/// use u_delivery::api::handle_json;
///
/// let out = handle_json(r#"{"op":"distance","from":{"lat":0,"lng":0},"to":{"lat":0,"lng":0}}"#);
/// assert_eq!(out, r#"{"ok":{"km":0.0}}"#);
/// ```
pub fn handle_json(input: &str) -> String {
    let outcome = serde_json::from_str::<Request>(input)
        .map_err(|e| PlanError::invalid(format!("malformed request: {e}")))
        .and_then(handle);
    match outcome {
        Ok(response) => json!({ "ok": response }).to_string(),
        Err(e) => error_json(&e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn call(input: &str) -> Value {
        serde_json::from_str(&handle_json(input)).expect("output is JSON")
    }

    #[test]
    fn test_compute_demand() {
        let out = call(
            r#"{"op":"computeDemand","vehicleCapacity":200,"items":[
                {"productId":"P1","quantity":100,"product":{}},
                {"productId":"P2","quantity":50,"product":{"heterogeneousConversionFactor":1.6}}
            ]}"#,
        );
        assert_eq!(out["ok"]["totalCapacityUsed"], 180.0);
        assert_eq!(out["ok"]["canFit"], true);
        assert_eq!(out["ok"]["isHomogeneous"], false);
        assert_eq!(out["ok"]["capacityDetails"][1]["conversionRate"], 1.6);
    }

    #[test]
    fn test_validate_aggregate_default_threshold() {
        let out = call(
            r#"{"op":"validateAggregate","vehicleCapacity":100,"orders":[
                {"items":[{"productId":"P1","quantity":90,"product":{}}]}
            ]}"#,
        );
        assert_eq!(out["ok"]["orderCount"], 1);
        let rec = out["ok"]["recommendation"].as_str().expect("string");
        assert!(rec.contains("larger vehicle"));
    }

    #[test]
    fn test_size_to_conversion_factor() {
        let out = call(r#"{"op":"sizeToConversionFactor","label":"19L"}"#);
        assert_eq!(out["ok"]["heterogeneousConversionFactor"], 3.3);
        assert_eq!(out["ok"]["sizeMl"], 19000.0);
    }

    #[test]
    fn test_size_label_spelled_out() {
        let out = call(r#"{"op":"sizeToConversionFactor","label":"19 Liters"}"#);
        assert_eq!(out["ok"]["heterogeneousConversionFactor"], 3.3);
    }

    #[test]
    fn test_max_units() {
        let out = call(
            r#"{"op":"maxUnitsFor","vehicleCapacity":200,"isHomogeneous":false,
                "product":{"name":"Bottle","heterogeneousConversionFactor":1.6}}"#,
        );
        assert_eq!(out["ok"]["maxUnits"], 125);
    }

    #[test]
    fn test_build_routes() {
        let out = call(
            r#"{"op":"buildRoutes","vehicleCapacity":10,"depot":{"lat":0,"lng":0},"nodes":[
                {"id":"A","location":{"lat":0,"lng":0},"demand":5},
                {"id":"B","location":{"lat":0,"lng":0.001},"demand":5}
            ]}"#,
        );
        let trips = out["ok"].as_array().expect("trips");
        assert_eq!(trips.len(), 1);
        assert_eq!(trips[0]["load"], 10.0);
    }

    #[test]
    fn test_plan_deliveries_default_options() {
        let out = call(
            r#"{"op":"planDeliveries","depot":{"lat":0,"lng":0},"orders":[
                {"id":"O1","location":{"lat":0,"lng":0.01},"items":[{"productId":"P","quantity":5,"product":{}}]}
            ]}"#,
        );
        let stop = &out["ok"]["trips"][0]["stops"][0];
        assert_eq!(stop["nodeId"], "O1");
        assert_eq!(stop["sequence"], 1);
        assert!(stop["distanceFromPrev"].as_f64().expect("number") > 0.0);
    }

    #[test]
    fn test_errors() {
        let out = call(r#"{"op":"computeDemand","vehicleCapacity":0,"items":[]}"#);
        assert!(out["error"].as_str().expect("message").contains("division by zero"));

        let out = call(r#"{"op":"teleport"}"#);
        assert!(out["error"].as_str().expect("message").contains("malformed request"));

        let out = call("not json");
        assert!(out.get("ok").is_none());
    }

    #[test]
    fn test_error_json_escapes() {
        let out: Value = serde_json::from_str(&error_json("bad \"label\"")).expect("JSON");
        assert_eq!(out["error"], "bad \"label\"");
    }
}
