//! Great-circle distance and distance matrices.
//!
//! Provides the haversine metric used for every planning computation and a
//! dense matrix over a depot plus its delivery nodes.

mod haversine;
mod matrix;

pub use haversine::{haversine_km, EARTH_RADIUS_KM};
pub use matrix::DistanceMatrix;
