//! Capacity-unit accounting for vehicle loads.
//!
//! - [`compute_demand`] — capacity units of one load, homogeneous or mixed
//! - [`max_units_for`] — how many items of one product fill a vehicle
//! - [`validate_aggregate`] — several orders merged onto one vehicle, with guidance
//! - [`size_to_conversion_factor`] — factors suggested by a package size label

mod aggregate;
mod conversion;
mod demand;

pub use aggregate::{
    validate_aggregate, validate_aggregate_with, AggregateCapacityResult,
    DEFAULT_HIGH_UTILIZATION_THRESHOLD,
};
pub use conversion::{size_to_conversion_factor, ConversionFactors};
pub use demand::{
    compute_demand, is_homogeneous, max_units_for, round2, CapacityDetail, CapacityResult,
};

pub(crate) use demand::validate_capacity;
