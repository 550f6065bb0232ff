//! Constructive heuristics for building delivery trips.
//!
//! - [`build_routes`] — Clarke-Wright savings algorithm (1964), O(n² log n)
//! - [`compute_savings`] — the sorted savings list it consumes

mod clarke_wright;

pub use clarke_wright::{build_routes, compute_savings, Saving};
