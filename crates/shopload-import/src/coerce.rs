//! Cell-to-field coercions shared by product and variant formatting.

use shopload_admin::{ProductStatus, VariantInput};

use crate::layout::{Cell, Column, ProductRow};

/// Variants created by an import are always stock-tracked by the store.
pub const INVENTORY_MANAGEMENT: &str = "shopify";

/// Native `true`, or text equal to `TRUE` after trimming and upper-casing.
#[must_use]
pub fn coerce_flag(cell: &Cell) -> bool {
    match cell {
        Cell::Bool(b) => *b,
        Cell::Text(s) => s.trim().eq_ignore_ascii_case("TRUE"),
        Cell::Empty | Cell::Number(_) => false,
    }
}

#[must_use]
pub fn coerce_status(published: &Cell) -> ProductStatus {
    if coerce_flag(published) {
        ProductStatus::Active
    } else {
        ProductStatus::Draft
    }
}

/// Non-empty cell content as text.
#[must_use]
pub fn coerce_text(cell: &Cell) -> Option<String> {
    cell.text()
}

/// Numeric value of a cell. Empty cells are unset rather than zero; text that
/// does not parse is unset and logged.
pub fn coerce_number(cell: &Cell, column: Column) -> Option<f64> {
    match cell {
        Cell::Empty => None,
        Cell::Number(n) => Some(*n),
        Cell::Text(s) if s.trim().is_empty() => None,
        Cell::Text(s) => match s.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => Some(n),
            _ => {
                tracing::warn!(column = column.header(), value = %s, "ignoring non-numeric cell");
                None
            }
        },
        Cell::Bool(b) => {
            tracing::warn!(column = column.header(), value = b, "ignoring boolean in numeric cell");
            None
        }
    }
}

/// Numeric value rounded to the nearest integer.
#[allow(clippy::cast_possible_truncation)]
pub fn coerce_integer(cell: &Cell, column: Column) -> Option<i64> {
    coerce_number(cell, column).map(|n| n.round() as i64)
}

/// 1-based image position; zero and negative positions are unset.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn coerce_position(cell: &Cell) -> Option<u32> {
    coerce_number(cell, Column::ImagePosition)
        .map(f64::round)
        .filter(|n| *n >= 1.0 && *n <= f64::from(u32::MAX))
        .map(|n| n as u32)
}

#[must_use]
pub fn coerce_weight_unit(cell: &Cell) -> Option<String> {
    cell.text()
        .map(|unit| unit.trim().to_lowercase())
        .filter(|unit| !unit.is_empty())
}

/// Variant fields of one row, used both for updating a product's default
/// variant and for creating additional variants.
pub fn format_variant_input(row: &ProductRow, image_id: Option<u64>) -> VariantInput {
    VariantInput {
        image_id,
        price: coerce_text(&row.variant_price),
        compare_at_price: coerce_text(&row.variant_compare_at_price),
        grams: coerce_integer(&row.variant_grams, Column::VariantGrams),
        sku: coerce_text(&row.variant_sku),
        barcode: coerce_text(&row.variant_barcode),
        fulfillment_service: coerce_text(&row.variant_fulfillment_service),
        inventory_management: Some(INVENTORY_MANAGEMENT.to_owned()),
        inventory_policy: coerce_text(&row.variant_inventory_policy),
        requires_shipping: Some(coerce_flag(&row.variant_requires_shipping)),
        taxable: Some(coerce_flag(&row.variant_taxable)),
        tax_code: coerce_text(&row.variant_tax_code),
        weight_unit: coerce_weight_unit(&row.variant_weight_unit),
        option1: coerce_text(&row.option1_value),
        option2: coerce_text(&row.option2_value),
        option3: coerce_text(&row.option3_value),
    }
}

#[cfg(test)]
#[path = "coerce_test.rs"]
mod tests;
