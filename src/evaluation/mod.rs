//! Trip evaluation: stop sequencing, travel distance and capacity checks.

mod evaluator;

pub use evaluator::TripEvaluator;
