//! Domain model types for delivery planning.
//!
//! Provides geographic locations, delivery nodes with demands, product and
//! order records for capacity accounting, trips as ordered node sequences,
//! and evaluated trip plans with their constraint violations.

mod location;
mod node;
mod plan;
mod product;
mod trip;

pub use location::Location;
pub use node::{DeliveryNode, NodeId};
pub use plan::{PlannedStop, TripPlan, Violation, ViolationType};
pub use product::{LineItem, Order, Product};
pub use trip::Trip;
