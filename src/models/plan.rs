//! Evaluated trip plans and constraint violations.

use serde::{Deserialize, Serialize};

/// A type of constraint violation in an evaluated plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum ViolationType {
    /// Vehicle capacity exceeded.
    #[serde(rename_all = "camelCase")]
    CapacityExceeded {
        /// Trip index in the plan.
        trip_index: usize,
        /// Load carried by the trip.
        load: f64,
        /// Vehicle capacity.
        capacity: f64,
    },
}

/// A constraint violation in a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    /// The type of violation.
    pub kind: ViolationType,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationType) -> Self {
        Self { kind }
    }
}

/// One stop of a planned trip, ready to be persisted as a route stop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedStop<I> {
    /// Node serviced at this stop.
    pub node_id: I,
    /// 1-based position within the trip.
    pub sequence: usize,
    /// Great-circle distance from the previous stop (the depot for the first stop), in km.
    #[serde(rename = "distanceFromPrev")]
    pub distance_from_prev_km: f64,
}

/// A trip with derived stop sequence and travel distance.
///
/// # Examples
///
/// ```
/// use u_delivery::models::TripPlan;
///
/// let plan: TripPlan<u32> = TripPlan::new();
/// assert!(plan.is_empty());
/// assert_eq!(plan.total_distance_km(), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripPlan<I> {
    stops: Vec<PlannedStop<I>>,
    load: f64,
    total_distance_km: f64,
}

impl<I> TripPlan<I> {
    /// Creates an empty plan.
    pub fn new() -> Self {
        Self {
            stops: Vec::new(),
            load: 0.0,
            total_distance_km: 0.0,
        }
    }

    /// Appends a stop, assigning it the next sequence number.
    pub fn push_stop(&mut self, node_id: I, distance_from_prev_km: f64) {
        let sequence = self.stops.len() + 1;
        self.stops.push(PlannedStop {
            node_id,
            sequence,
            distance_from_prev_km,
        });
    }

    /// Stops in visit order.
    pub fn stops(&self) -> &[PlannedStop<I>] {
        &self.stops
    }

    /// Number of stops.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Returns `true` if the plan has no stops.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Summed demand carried on this trip.
    pub fn load(&self) -> f64 {
        self.load
    }

    /// Round-trip distance from the depot and back, in km.
    pub fn total_distance_km(&self) -> f64 {
        self.total_distance_km
    }

    /// Sets the carried load (used by evaluator).
    pub fn set_load(&mut self, load: f64) {
        self.load = load;
    }

    /// Sets the total distance (used by evaluator).
    pub fn set_total_distance_km(&mut self, d: f64) {
        self.total_distance_km = d;
    }
}

impl<I> Default for TripPlan<I> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_stop_sequences() {
        let mut plan = TripPlan::new();
        plan.push_stop("A", 1.5);
        plan.push_stop("B", 0.5);
        assert_eq!(plan.len(), 2);
        assert_eq!(plan.stops()[0].sequence, 1);
        assert_eq!(plan.stops()[1].sequence, 2);
        assert_eq!(plan.stops()[1].node_id, "B");
    }

    #[test]
    fn test_stop_serializes_distance_from_prev() {
        let stop = PlannedStop {
            node_id: "A",
            sequence: 1,
            distance_from_prev_km: 2.0,
        };
        let json = serde_json::to_string(&stop).expect("serialize");
        assert_eq!(json, r#"{"nodeId":"A","sequence":1,"distanceFromPrev":2.0}"#);
    }

    #[test]
    fn test_violation_serializes_tagged() {
        let v = Violation::new(ViolationType::CapacityExceeded {
            trip_index: 2,
            load: 12.0,
            capacity: 10.0,
        });
        let json = serde_json::to_string(&v).expect("serialize");
        assert_eq!(
            json,
            r#"{"kind":{"type":"capacityExceeded","tripIndex":2,"load":12.0,"capacity":10.0}}"#
        );
    }
}
