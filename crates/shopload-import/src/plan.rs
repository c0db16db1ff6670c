//! Turns flat worksheet rows into per-product write plans.
//!
//! Rows are grouped by handle into blocks; each row of a block is classified
//! once into a [`RowKind`] and expanded into the remote writes it needs. All
//! of this is pure: nothing here talks to the store.

use std::collections::HashMap;

use serde::Serialize;
use shopload_admin::{ImageInput, ProductInput, ProductOption, VariantInput};

use crate::coerce::{
    coerce_integer, coerce_position, coerce_status, coerce_text, format_variant_input,
};
use crate::layout::{Column, ProductRow, OPTION_SLOTS};

/// Shape of a row within its handle block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowKind {
    /// First row of the block; defines the product.
    Primary,
    /// Adds an image to the block's product.
    ImageOnly,
    /// Adds a variant (and possibly images) to the block's product.
    Variant,
    /// Matches none of the shapes above.
    Invalid,
}

/// All rows sharing one handle, in sheet order.
#[derive(Debug, Clone)]
pub struct HandleBlock {
    pub handle: String,
    pub rows: Vec<ProductRow>,
}

/// Groups rows by handle. Blocks appear in first-seen handle order and rows
/// keep their sheet order within each block.
#[must_use]
pub fn group_by_handle(rows: Vec<ProductRow>) -> Vec<HandleBlock> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut blocks: Vec<HandleBlock> = Vec::new();
    for row in rows {
        let handle = row.handle_key();
        match index.get(&handle) {
            Some(&i) => blocks[i].rows.push(row),
            None => {
                index.insert(handle.clone(), blocks.len());
                blocks.push(HandleBlock {
                    handle,
                    rows: vec![row],
                });
            }
        }
    }
    blocks
}

/// Classifies a row by its position in the block and which cells it fills.
/// The first matching shape wins.
#[must_use]
pub fn classify(index_in_block: usize, row: &ProductRow) -> RowKind {
    if index_in_block == 0 {
        return RowKind::Primary;
    }
    let has_image = !row.image_src.is_empty();
    let has_qty = !row.variant_inventory_qty.is_empty();
    let has_price = !row.variant_price.is_empty();
    let has_option_value = row.option_values().iter().any(|cell| !cell.is_empty());

    if has_image && !has_qty {
        RowKind::ImageOnly
    } else if has_qty && has_price && has_option_value {
        RowKind::Variant
    } else {
        RowKind::Invalid
    }
}

/// Options named on the primary row, each with the distinct values of its
/// slot across every row of the block (classification is not consulted, so
/// rows later found invalid still contribute values).
#[must_use]
pub fn collect_options(rows: &[ProductRow]) -> Vec<ProductOption> {
    let Some(primary) = rows.first() else {
        return Vec::new();
    };
    OPTION_SLOTS
        .iter()
        .filter_map(|(name_col, value_col)| {
            let name = coerce_text(primary.cell(*name_col))?.trim().to_owned();
            if name.is_empty() {
                return None;
            }
            let mut values: Vec<String> = Vec::new();
            for value in rows.iter().filter_map(|row| coerce_text(row.cell(*value_col))) {
                if !values.contains(&value) {
                    values.push(value);
                }
            }
            Some(ProductOption { name, values })
        })
        .collect()
}

/// Product-level fields from the block's primary row.
#[must_use]
pub fn product_input(
    handle: &str,
    primary: &ProductRow,
    options: Vec<ProductOption>,
) -> ProductInput {
    ProductInput {
        handle: (!handle.is_empty()).then(|| handle.to_owned()),
        title: coerce_text(&primary.title),
        body_html: coerce_text(&primary.body_html),
        vendor: coerce_text(&primary.vendor),
        product_type: coerce_text(&primary.product_type),
        tags: coerce_text(&primary.tags),
        status: coerce_status(&primary.published),
        options,
    }
}

/// Which image, if any, a variant is linked to.
#[derive(Debug, Clone, PartialEq)]
pub enum VariantImage {
    Unlinked,
    /// The image created from the same row's `image_src`.
    RowImage,
    /// A separate image created from the row's variant image source.
    Separate(ImageInput),
}

/// Writes needed to apply one row's variant fields.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantPlan {
    /// Image created from the row's `image_src` before the variant write.
    pub image: Option<ImageInput>,
    pub link: VariantImage,
    /// Variant fields; `image_id` is filled once the linked image exists.
    pub fields: VariantInput,
    /// Stock to set at the configured location; unset skips the write.
    pub quantity: Option<i64>,
}

fn row_image(row: &ProductRow) -> Option<ImageInput> {
    coerce_text(&row.image_src).map(|src| ImageInput {
        src,
        position: coerce_position(&row.image_position),
        alt: coerce_text(&row.image_alt_text),
    })
}

/// Applies the variant image rule: a variant image equal to the row image
/// reuses it, a different one becomes its own image at the same position.
fn variant_link(row: &ProductRow) -> VariantImage {
    let Some(variant_src) = coerce_text(&row.variant_image_src) else {
        return VariantImage::Unlinked;
    };
    if coerce_text(&row.image_src).as_deref() == Some(variant_src.as_str()) {
        VariantImage::RowImage
    } else {
        VariantImage::Separate(ImageInput {
            src: variant_src,
            position: coerce_position(&row.image_position),
            alt: None,
        })
    }
}

#[must_use]
pub fn variant_plan(row: &ProductRow) -> VariantPlan {
    VariantPlan {
        image: row_image(row),
        link: variant_link(row),
        fields: format_variant_input(row, None),
        quantity: coerce_integer(&row.variant_inventory_qty, Column::VariantInventoryQty),
    }
}

/// Remote writes for one classified row.
#[derive(Debug, Clone, PartialEq)]
pub enum RowPlan {
    Primary {
        product: ProductInput,
        variant: VariantPlan,
    },
    ImageOnly {
        image: ImageInput,
    },
    Variant(VariantPlan),
    Invalid {
        /// The row's cells, tab-separated, for the error log.
        cells: String,
    },
}

impl RowPlan {
    #[must_use]
    pub fn kind(&self) -> RowKind {
        match self {
            RowPlan::Primary { .. } => RowKind::Primary,
            RowPlan::ImageOnly { .. } => RowKind::ImageOnly,
            RowPlan::Variant(_) => RowKind::Variant,
            RowPlan::Invalid { .. } => RowKind::Invalid,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlannedRow {
    /// Row number in the worksheet.
    pub line: usize,
    /// Position within the handle block; `0` is the primary row.
    pub index: usize,
    pub plan: RowPlan,
}

/// One product and the ordered writes that build it.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockPlan {
    pub handle: String,
    pub rows: Vec<PlannedRow>,
}

impl BlockPlan {
    /// Options the product will be created with.
    #[must_use]
    pub fn options(&self) -> &[ProductOption] {
        match self.rows.first().map(|row| &row.plan) {
            Some(RowPlan::Primary { product, .. }) => &product.options,
            _ => &[],
        }
    }
}

#[must_use]
pub fn plan_block(block: HandleBlock) -> BlockPlan {
    let mut options = collect_options(&block.rows);
    let rows = block
        .rows
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let plan = match classify(index, row) {
                RowKind::Primary => RowPlan::Primary {
                    product: product_input(&block.handle, row, std::mem::take(&mut options)),
                    variant: variant_plan(row),
                },
                // ImageOnly implies a non-empty image_src.
                RowKind::ImageOnly => match row_image(row) {
                    Some(image) => RowPlan::ImageOnly { image },
                    None => RowPlan::Invalid { cells: row.to_tsv() },
                },
                RowKind::Variant => RowPlan::Variant(variant_plan(row)),
                RowKind::Invalid => RowPlan::Invalid { cells: row.to_tsv() },
            };
            PlannedRow {
                line: row.line,
                index,
                plan,
            }
        })
        .collect();
    BlockPlan {
        handle: block.handle,
        rows,
    }
}

/// Groups a worksheet's rows and yields one block plan at a time.
pub fn plan_worksheet(rows: Vec<ProductRow>) -> impl Iterator<Item = BlockPlan> {
    group_by_handle(rows).into_iter().map(plan_block)
}

#[cfg(test)]
#[path = "plan_test.rs"]
mod tests;
