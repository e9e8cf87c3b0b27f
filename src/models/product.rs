//! Product inventory records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where a product's fabric is in the production workflow.
///
/// The store keeps the Turkish workflow labels verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FabricStatus {
    #[default]
    #[serde(rename = "kumaş sipariş edildi")]
    Ordered,
    #[serde(rename = "kumaş geldi")]
    Arrived,
    #[serde(rename = "kumaş kesime girdi")]
    InCutting,
    #[serde(rename = "kumaş hazır")]
    Ready,
}

impl FabricStatus {
    pub const ALL: [FabricStatus; 4] = [
        FabricStatus::Ordered,
        FabricStatus::Arrived,
        FabricStatus::InCutting,
        FabricStatus::Ready,
    ];

    /// Stored value.
    pub fn as_str(self) -> &'static str {
        match self {
            FabricStatus::Ordered => "kumaş sipariş edildi",
            FabricStatus::Arrived => "kumaş geldi",
            FabricStatus::InCutting => "kumaş kesime girdi",
            FabricStatus::Ready => "kumaş hazır",
        }
    }

    /// Short English keyword, accepted on input alongside the stored value.
    pub fn keyword(self) -> &'static str {
        match self {
            FabricStatus::Ordered => "ordered",
            FabricStatus::Arrived => "arrived",
            FabricStatus::InCutting => "cutting",
            FabricStatus::Ready => "ready",
        }
    }
}

impl fmt::Display for FabricStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FabricStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        FabricStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == wanted || status.keyword() == wanted)
            .ok_or_else(|| s.to_string())
    }
}

/// A product row from the `products` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Product {
    pub id: String,

    /// Owner of the row
    pub user_id: Option<String>,

    pub name: String,
    pub model: Option<String>,

    /// Ordered quantity
    pub stock_quantity: Option<i64>,

    /// Produced quantity
    pub min_stock_level: Option<i64>,

    pub color: Option<String>,
    pub order_number: Option<String>,
    pub ordering_brand: Option<String>,
    pub fabric_number: Option<String>,
    pub fabric_status: Option<FabricStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Raw product form input, every field as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductForm {
    pub name: String,
    pub model: String,
    pub stock_quantity: String,
    pub min_stock_level: String,
    pub color: String,
    pub order_number: String,
    pub ordering_brand: String,
    pub fabric_number: String,
    pub fabric_status: String,
}

impl Default for ProductForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            model: String::new(),
            stock_quantity: String::new(),
            min_stock_level: String::new(),
            color: String::new(),
            order_number: String::new(),
            ordering_brand: String::new(),
            fabric_number: String::new(),
            fabric_status: FabricStatus::default().as_str().to_string(),
        }
    }
}

impl From<&Product> for ProductForm {
    /// Prefill the form for editing an existing product.
    fn from(product: &Product) -> Self {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        let number = |value: Option<i64>| value.map(|n| n.to_string()).unwrap_or_default();

        Self {
            name: product.name.clone(),
            model: text(&product.model),
            stock_quantity: number(product.stock_quantity),
            min_stock_level: number(product.min_stock_level),
            color: text(&product.color),
            order_number: text(&product.order_number),
            ordering_brand: text(&product.ordering_brand),
            fabric_number: text(&product.fabric_number),
            fabric_status: product.fabric_status.unwrap_or_default().as_str().to_string(),
        }
    }
}

/// Insert or update payload for a product.
///
/// Blank optional fields are sent as `null`. `created_by` is only present on
/// inserts.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewProduct {
    pub user_id: String,
    pub name: String,
    pub model: Option<String>,
    pub stock_quantity: i64,
    pub min_stock_level: Option<i64>,
    pub color: Option<String>,
    pub order_number: Option<String>,
    pub ordering_brand: Option<String>,
    pub fabric_number: Option<String>,
    pub fabric_status: Option<FabricStatus>,
    pub updated_by: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
}
