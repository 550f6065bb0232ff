//! # u-delivery
//!
//! Delivery planning core: converts product mixes into capacity-unit demand
//! and groups delivery stops into vehicle trips with the Clarke-Wright
//! savings heuristic over great-circle distances.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Location, DeliveryNode, Product, LineItem, Trip, TripPlan)
//! - [`distance`] — Haversine distance and distance matrix
//! - [`capacity`] — Capacity-unit demand, max units, aggregate validation, size-label factors
//! - [`constructive`] — Clarke-Wright savings trip construction
//! - [`evaluation`] — Stop sequencing, trip distance and capacity checks
//! - [`planner`] — Orders to evaluated trips in one call
//! - [`api`] — JSON request envelope used by the `ffi` and `wasm` bindings

pub mod api;
pub mod capacity;
pub mod constructive;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod models;
pub mod planner;

#[cfg(feature = "ffi")]
pub mod ffi;
#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::{PlanError, Result};
