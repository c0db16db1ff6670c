//! Shopify Admin REST resource shapes.
//!
//! Response types are deliberately lenient: only `id` is required and every
//! other field defaults, since the Admin API adds fields between versions and
//! omits `null`-valued ones on some endpoints.
//!
//! Input types skip `None` fields on serialization so that an update only
//! touches what the caller set.

use serde::{Deserialize, Serialize};

/// A product as returned by `GET/POST /products.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct Product {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub handle: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    /// Every product has at least one variant; the store creates a default
    /// one when the product is created without variants.
    #[serde(default)]
    pub variants: Vec<Variant>,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub options: Vec<ProductOption>,
}

/// A purchasable variant of a [`Product`].
#[derive(Debug, Clone, Deserialize)]
pub struct Variant {
    pub id: u64,
    #[serde(default)]
    pub product_id: Option<u64>,
    /// Needed to address the variant's stock through `inventory_levels`.
    #[serde(default)]
    pub inventory_item_id: Option<u64>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub image_id: Option<u64>,
    #[serde(default)]
    pub option1: Option<String>,
    #[serde(default)]
    pub option2: Option<String>,
    #[serde(default)]
    pub option3: Option<String>,
    #[serde(default)]
    pub position: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Image {
    pub id: u64,
    #[serde(default)]
    pub product_id: Option<u64>,
    #[serde(default)]
    pub src: Option<String>,
    #[serde(default)]
    pub position: Option<u32>,
    #[serde(default)]
    pub alt: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InventoryLevel {
    pub inventory_item_id: u64,
    pub location_id: u64,
    #[serde(default)]
    pub available: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Collect {
    pub id: u64,
    pub product_id: u64,
    pub collection_id: u64,
}

/// A named axis of variation with its distinct values in first-seen order.
///
/// Used both on input (product creation) and output; the store adds `id`,
/// `product_id` and `position` on output, which are ignored here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductOption {
    pub name: String,
    #[serde(default)]
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    Active,
    Draft,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,
    /// Comma-separated, as the store accepts it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    pub status: ProductStatus,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<ProductOption>,
}

/// Fields applied to a variant on create or update.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VariantInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compare_at_price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grams: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fulfillment_service: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory_management: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory_policy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requires_shipping: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taxable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option3: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageInput {
    pub src: String,
    /// 1-based; the store appends when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryLevelInput {
    pub location_id: u64,
    pub inventory_item_id: u64,
    pub available: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectInput {
    pub product_id: u64,
    pub collection_id: u64,
}
