//! Conversion factors derived from package size labels.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::demand::round2;
use crate::models::Product;

/// Standard package sizes (ml) and their mixed-load conversion factors.
const STANDARD_SIZES: [(f64, f64); 5] = [
    (120.0, 0.57),
    (240.0, 1.0),
    (330.0, 1.0),
    (600.0, 1.6),
    (19_000.0, 3.3),
];

const BASELINE_ML: f64 = 240.0;
const GALLON_ML: f64 = 19_000.0;
const GALLON_FACTOR: f64 = 3.3;

/// Capacity factors suggested for a package size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionFactors {
    /// Homogeneous-load factor; always 1.0.
    pub unit_capacity_factor: f64,
    /// Mixed-load factor.
    pub heterogeneous_conversion_factor: f64,
    /// Parsed size in milliliters, if the label could be read.
    pub size_ml: Option<f64>,
    /// How the factors were derived.
    pub explanation: String,
}

impl ConversionFactors {
    /// Applies these factors to a product record.
    pub fn apply_to(&self, product: Product) -> Product {
        product
            .with_unit_capacity_factor(self.unit_capacity_factor)
            .with_heterogeneous_conversion_factor(self.heterogeneous_conversion_factor)
    }
}

/// Scans `label` for the first `<number><unit>` token and returns milliliters.
///
/// Units are case-insensitive and may be separated from the number by
/// spaces: `ml`, `milliliter(s)`, `millilitre(s)`, `l`, `lt`, `ltr`,
/// `liter(s)`, `litre(s)`. The unit must be a whole word, so `"500 lbs"`
/// does not read as liters.
fn parse_size_ml(label: &str) -> Option<f64> {
    let lower = label.to_ascii_lowercase();
    let bytes = lower.as_bytes();
    let len = bytes.len();
    let mut i = 0;

    while i < len {
        let starts_number = bytes[i].is_ascii_digit()
            && (i == 0 || !(bytes[i - 1].is_ascii_digit() || bytes[i - 1] == b'.'));
        if !starts_number {
            i += 1;
            continue;
        }

        let start = i;
        while i < len && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i + 1 < len && bytes[i] == b'.' && bytes[i + 1].is_ascii_digit() {
            i += 1;
            while i < len && bytes[i].is_ascii_digit() {
                i += 1;
            }
        }
        let number_end = i;

        let mut j = i;
        while j < len && bytes[j] == b' ' {
            j += 1;
        }
        let unit_start = j;
        while j < len && bytes[j].is_ascii_alphabetic() {
            j += 1;
        }

        let scale = match &lower[unit_start..j] {
            "ml" | "milliliter" | "milliliters" | "millilitre" | "millilitres" => 1.0,
            "l" | "lt" | "ltr" | "liter" | "liters" | "litre" | "litres" => 1000.0,
            _ => continue,
        };
        if let Ok(value) = lower[start..number_end].parse::<f64>() {
            return Some(value * scale);
        }
    }
    None
}

/// Derives capacity factors from a human size label such as `"600ml"` or `"19L"`.
///
/// Tabulated sizes use their fixed factor. Other sizes scale against the
/// 240 ml baseline, or against the 19 L gallon (factor 3.3) from 19 L up.
/// An unreadable label is not an error: default factors of 1.0 are returned
/// with an explanatory note.
///
/// # Examples
///
/// ```
/// use u_delivery::capacity::size_to_conversion_factor;
///
/// let f = size_to_conversion_factor("600ml");
/// assert_eq!(f.heterogeneous_conversion_factor, 1.6);
/// assert_eq!(f.unit_capacity_factor, 1.0);
///
/// let f = size_to_conversion_factor("1.5 L");
/// assert_eq!(f.size_ml, Some(1500.0));
/// assert_eq!(f.heterogeneous_conversion_factor, 6.25);
/// ```
pub fn size_to_conversion_factor(label: &str) -> ConversionFactors {
    let size_ml = match parse_size_ml(label) {
        Some(size) if size.is_finite() && size > 0.0 => size,
        _ => {
            warn!(label, "unreadable size label, using default factors");
            return ConversionFactors {
                unit_capacity_factor: 1.0,
                heterogeneous_conversion_factor: 1.0,
                size_ml: None,
                explanation: format!(
                    "Could not read a size from \"{label}\"; using default factors of 1.0."
                ),
            };
        }
    };

    let standard = STANDARD_SIZES
        .iter()
        .find(|(ml, _)| (ml - size_ml).abs() < 1e-9)
        .map(|&(_, factor)| factor);

    let (factor, explanation) = match standard {
        Some(factor) => (
            factor,
            format!("{size_ml} ml is a standard size with factor {factor}."),
        ),
        None if size_ml < GALLON_ML => {
            let factor = round2(size_ml / BASELINE_ML);
            (
                factor,
                format!("{size_ml} ml scaled against the {BASELINE_ML} ml baseline: {factor}."),
            )
        }
        None => {
            let factor = round2(size_ml / GALLON_ML * GALLON_FACTOR);
            (
                factor,
                format!(
                    "{size_ml} ml scaled against the {GALLON_ML} ml gallon (factor {GALLON_FACTOR}): {factor}."
                ),
            )
        }
    };

    ConversionFactors {
        unit_capacity_factor: 1.0,
        heterogeneous_conversion_factor: factor,
        size_ml: Some(size_ml),
        explanation,
    }
}
