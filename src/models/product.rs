//! Product, line item and order types consumed by the capacity model.

use serde::{Deserialize, Serialize};

/// Capacity factors of a product record.
///
/// Homogeneous loads (one distinct product) use `unit_capacity_factor`;
/// mixed loads use `heterogeneous_conversion_factor`. Unset factors fall
/// back as described in [`Product::conversion_rate`].
///
/// # Examples
///
/// ```
/// use u_delivery::models::Product;
///
/// let bottle = Product::new("Aqua 600ml").with_heterogeneous_conversion_factor(1.6);
/// assert_eq!(bottle.conversion_rate(true), 1.0);
/// assert_eq!(bottle.conversion_rate(false), 1.6);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Product {
    /// Display name.
    pub name: String,
    /// Capacity units per item in a homogeneous load.
    pub unit_capacity_factor: Option<f64>,
    /// Capacity units per item in a heterogeneous load.
    pub heterogeneous_conversion_factor: Option<f64>,
}

impl Product {
    /// Creates a product with no factors set.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the homogeneous-load factor.
    pub fn with_unit_capacity_factor(mut self, factor: f64) -> Self {
        self.unit_capacity_factor = Some(factor);
        self
    }

    /// Sets the mixed-load factor.
    pub fn with_heterogeneous_conversion_factor(mut self, factor: f64) -> Self {
        self.heterogeneous_conversion_factor = Some(factor);
        self
    }

    /// Capacity units per item for the given load composition.
    ///
    /// Homogeneous: `unit_capacity_factor`, else 1.0.
    /// Heterogeneous: `heterogeneous_conversion_factor`, else
    /// `unit_capacity_factor`, else 1.0.
    pub fn conversion_rate(&self, is_homogeneous: bool) -> f64 {
        if is_homogeneous {
            self.unit_capacity_factor.unwrap_or(1.0)
        } else {
            self.heterogeneous_conversion_factor
                .or(self.unit_capacity_factor)
                .unwrap_or(1.0)
        }
    }
}

/// One order line: a product and a quantity.
///
/// `product` is the resolved product record; `None` means the caller failed
/// to resolve it, which the capacity model rejects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Product identifier.
    pub product_id: String,
    /// Ordered quantity.
    pub quantity: i64,
    /// Resolved product record.
    #[serde(default)]
    pub product: Option<Product>,
}

impl LineItem {
    /// Creates a line item with a resolved product.
    pub fn new(product_id: impl Into<String>, quantity: i64, product: Product) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
            product: Some(product),
        }
    }

    /// Creates a line item whose product record is missing.
    pub fn unresolved(product_id: impl Into<String>, quantity: i64) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
            product: None,
        }
    }
}

/// An order: the line items loaded together for one delivery.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Order lines.
    pub items: Vec<LineItem>,
}

impl Order {
    /// Creates an order from its line items.
    pub fn new(items: Vec<LineItem>) -> Self {
        Self { items }
    }
}
