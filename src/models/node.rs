//! Delivery node type.

use std::fmt::Debug;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use super::Location;

/// Identifier of a routable stop (an order or a store visit).
pub trait NodeId: Clone + Eq + Hash + Debug {}

impl<T> NodeId for T where T: Clone + Eq + Hash + Debug {}

/// One routable stop: an identifier, a location and a demand in capacity units.
///
/// A node with zero demand is always feasible but still occupies a position
/// in some trip.
///
/// # Examples
///
/// ```
/// use u_delivery::models::{DeliveryNode, Location};
///
/// let node = DeliveryNode::new("order-17", Location::new(-6.2, 106.8), 12.5);
/// assert_eq!(*node.id(), "order-17");
/// assert_eq!(node.demand(), 12.5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryNode<I> {
    id: I,
    location: Location,
    demand: f64,
}

impl<I: NodeId> DeliveryNode<I> {
    /// Creates a new delivery node.
    pub fn new(id: I, location: Location, demand: f64) -> Self {
        Self {
            id,
            location,
            demand,
        }
    }

    /// Node identifier.
    pub fn id(&self) -> &I {
        &self.id
    }

    /// Node location.
    pub fn location(&self) -> Location {
        self.location
    }

    /// Capacity units required at this node.
    pub fn demand(&self) -> f64 {
        self.demand
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_new() {
        let n = DeliveryNode::new(7u32, Location::new(1.0, 2.0), 3.5);
        assert_eq!(*n.id(), 7);
        assert_eq!(n.location(), Location::new(1.0, 2.0));
        assert_eq!(n.demand(), 3.5);
    }

    #[test]
    fn test_node_serde_camel_case() {
        let n = DeliveryNode::new("A".to_string(), Location::new(0.0, 0.001), 5.0);
        let json = serde_json::to_string(&n).expect("serialize");
        assert_eq!(
            json,
            r#"{"id":"A","location":{"lat":0.0,"lng":0.001},"demand":5.0}"#
        );
        let back: DeliveryNode<String> = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, n);
    }
}
