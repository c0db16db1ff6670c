//! The fixed 31-column product export layout.
//!
//! [`COLUMN_LAYOUT`] is the only place that knows which spreadsheet column
//! holds which field; [`ProductRow`] is the named record built from it.

/// One spreadsheet cell after type detection.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl Cell {
    /// Blank cells and empty strings are both empty; whitespace is not.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.is_empty(),
            Cell::Number(_) | Cell::Bool(_) => false,
        }
    }

    /// The cell as text, or `None` when empty. Whole numbers render without
    /// a fractional part (`42.0` → `"42"`).
    #[must_use]
    pub fn text(&self) -> Option<String> {
        match self {
            Cell::Empty => None,
            Cell::Text(s) if s.is_empty() => None,
            Cell::Text(s) => Some(s.clone()),
            Cell::Number(n) => Some(format_number(*n)),
            Cell::Bool(b) => Some(if *b { "TRUE" } else { "FALSE" }.to_owned()),
        }
    }
}

fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{n:.0}")
    } else {
        n.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Handle,
    Title,
    BodyHtml,
    Vendor,
    ProductType,
    Tags,
    Published,
    Option1Name,
    Option1Value,
    Option2Name,
    Option2Value,
    Option3Name,
    Option3Value,
    VariantSku,
    VariantGrams,
    VariantInventoryTracker,
    VariantInventoryQty,
    VariantInventoryPolicy,
    VariantFulfillmentService,
    VariantPrice,
    VariantCompareAtPrice,
    VariantRequiresShipping,
    VariantTaxable,
    VariantBarcode,
    ImageSrc,
    ImagePosition,
    ImageAltText,
    GiftCard,
    VariantImageSrc,
    VariantWeightUnit,
    VariantTaxCode,
}

pub const COLUMN_COUNT: usize = 31;

/// Spreadsheet column index → field.
pub const COLUMN_LAYOUT: [Column; COLUMN_COUNT] = [
    Column::Handle,
    Column::Title,
    Column::BodyHtml,
    Column::Vendor,
    Column::ProductType,
    Column::Tags,
    Column::Published,
    Column::Option1Name,
    Column::Option1Value,
    Column::Option2Name,
    Column::Option2Value,
    Column::Option3Name,
    Column::Option3Value,
    Column::VariantSku,
    Column::VariantGrams,
    Column::VariantInventoryTracker,
    Column::VariantInventoryQty,
    Column::VariantInventoryPolicy,
    Column::VariantFulfillmentService,
    Column::VariantPrice,
    Column::VariantCompareAtPrice,
    Column::VariantRequiresShipping,
    Column::VariantTaxable,
    Column::VariantBarcode,
    Column::ImageSrc,
    Column::ImagePosition,
    Column::ImageAltText,
    Column::GiftCard,
    Column::VariantImageSrc,
    Column::VariantWeightUnit,
    Column::VariantTaxCode,
];

/// Name and value columns of the three option slots.
pub const OPTION_SLOTS: [(Column, Column); 3] = [
    (Column::Option1Name, Column::Option1Value),
    (Column::Option2Name, Column::Option2Value),
    (Column::Option3Name, Column::Option3Value),
];

impl Column {
    /// Header text used by the export format.
    #[must_use]
    pub fn header(self) -> &'static str {
        match self {
            Column::Handle => "Handle",
            Column::Title => "Title",
            Column::BodyHtml => "Body (HTML)",
            Column::Vendor => "Vendor",
            Column::ProductType => "Type",
            Column::Tags => "Tags",
            Column::Published => "Published",
            Column::Option1Name => "Option1 Name",
            Column::Option1Value => "Option1 Value",
            Column::Option2Name => "Option2 Name",
            Column::Option2Value => "Option2 Value",
            Column::Option3Name => "Option3 Name",
            Column::Option3Value => "Option3 Value",
            Column::VariantSku => "Variant SKU",
            Column::VariantGrams => "Variant Grams",
            Column::VariantInventoryTracker => "Variant Inventory Tracker",
            Column::VariantInventoryQty => "Variant Inventory Qty",
            Column::VariantInventoryPolicy => "Variant Inventory Policy",
            Column::VariantFulfillmentService => "Variant Fulfillment Service",
            Column::VariantPrice => "Variant Price",
            Column::VariantCompareAtPrice => "Variant Compare At Price",
            Column::VariantRequiresShipping => "Variant Requires Shipping",
            Column::VariantTaxable => "Variant Taxable",
            Column::VariantBarcode => "Variant Barcode",
            Column::ImageSrc => "Image Src",
            Column::ImagePosition => "Image Position",
            Column::ImageAltText => "Image Alt Text",
            Column::GiftCard => "Gift Card",
            Column::VariantImageSrc => "Variant Image",
            Column::VariantWeightUnit => "Variant Weight Unit",
            Column::VariantTaxCode => "Variant Tax Code",
        }
    }
}

/// One data row of the export, addressed by field name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductRow {
    /// 1-based row number in the source worksheet.
    pub line: usize,
    pub handle: Cell,
    pub title: Cell,
    pub body_html: Cell,
    pub vendor: Cell,
    pub product_type: Cell,
    pub tags: Cell,
    pub published: Cell,
    pub option1_name: Cell,
    pub option1_value: Cell,
    pub option2_name: Cell,
    pub option2_value: Cell,
    pub option3_name: Cell,
    pub option3_value: Cell,
    pub variant_sku: Cell,
    pub variant_grams: Cell,
    pub variant_inventory_tracker: Cell,
    pub variant_inventory_qty: Cell,
    pub variant_inventory_policy: Cell,
    pub variant_fulfillment_service: Cell,
    pub variant_price: Cell,
    pub variant_compare_at_price: Cell,
    pub variant_requires_shipping: Cell,
    pub variant_taxable: Cell,
    pub variant_barcode: Cell,
    pub image_src: Cell,
    pub image_position: Cell,
    pub image_alt_text: Cell,
    pub gift_card: Cell,
    pub variant_image_src: Cell,
    pub variant_weight_unit: Cell,
    pub variant_tax_code: Cell,
}

impl ProductRow {
    /// Builds a row from positional cells. Missing trailing cells stay empty;
    /// cells past the last layout column are ignored.
    pub fn from_cells(line: usize, cells: impl IntoIterator<Item = Cell>) -> Self {
        let mut row = ProductRow {
            line,
            ..ProductRow::default()
        };
        for (column, cell) in COLUMN_LAYOUT.iter().zip(cells) {
            *row.cell_mut(*column) = cell;
        }
        row
    }

    #[must_use]
    pub fn cell(&self, column: Column) -> &Cell {
        match column {
            Column::Handle => &self.handle,
            Column::Title => &self.title,
            Column::BodyHtml => &self.body_html,
            Column::Vendor => &self.vendor,
            Column::ProductType => &self.product_type,
            Column::Tags => &self.tags,
            Column::Published => &self.published,
            Column::Option1Name => &self.option1_name,
            Column::Option1Value => &self.option1_value,
            Column::Option2Name => &self.option2_name,
            Column::Option2Value => &self.option2_value,
            Column::Option3Name => &self.option3_name,
            Column::Option3Value => &self.option3_value,
            Column::VariantSku => &self.variant_sku,
            Column::VariantGrams => &self.variant_grams,
            Column::VariantInventoryTracker => &self.variant_inventory_tracker,
            Column::VariantInventoryQty => &self.variant_inventory_qty,
            Column::VariantInventoryPolicy => &self.variant_inventory_policy,
            Column::VariantFulfillmentService => &self.variant_fulfillment_service,
            Column::VariantPrice => &self.variant_price,
            Column::VariantCompareAtPrice => &self.variant_compare_at_price,
            Column::VariantRequiresShipping => &self.variant_requires_shipping,
            Column::VariantTaxable => &self.variant_taxable,
            Column::VariantBarcode => &self.variant_barcode,
            Column::ImageSrc => &self.image_src,
            Column::ImagePosition => &self.image_position,
            Column::ImageAltText => &self.image_alt_text,
            Column::GiftCard => &self.gift_card,
            Column::VariantImageSrc => &self.variant_image_src,
            Column::VariantWeightUnit => &self.variant_weight_unit,
            Column::VariantTaxCode => &self.variant_tax_code,
        }
    }

    fn cell_mut(&mut self, column: Column) -> &mut Cell {
        match column {
            Column::Handle => &mut self.handle,
            Column::Title => &mut self.title,
            Column::BodyHtml => &mut self.body_html,
            Column::Vendor => &mut self.vendor,
            Column::ProductType => &mut self.product_type,
            Column::Tags => &mut self.tags,
            Column::Published => &mut self.published,
            Column::Option1Name => &mut self.option1_name,
            Column::Option1Value => &mut self.option1_value,
            Column::Option2Name => &mut self.option2_name,
            Column::Option2Value => &mut self.option2_value,
            Column::Option3Name => &mut self.option3_name,
            Column::Option3Value => &mut self.option3_value,
            Column::VariantSku => &mut self.variant_sku,
            Column::VariantGrams => &mut self.variant_grams,
            Column::VariantInventoryTracker => &mut self.variant_inventory_tracker,
            Column::VariantInventoryQty => &mut self.variant_inventory_qty,
            Column::VariantInventoryPolicy => &mut self.variant_inventory_policy,
            Column::VariantFulfillmentService => &mut self.variant_fulfillment_service,
            Column::VariantPrice => &mut self.variant_price,
            Column::VariantCompareAtPrice => &mut self.variant_compare_at_price,
            Column::VariantRequiresShipping => &mut self.variant_requires_shipping,
            Column::VariantTaxable => &mut self.variant_taxable,
            Column::VariantBarcode => &mut self.variant_barcode,
            Column::ImageSrc => &mut self.image_src,
            Column::ImagePosition => &mut self.image_position,
            Column::ImageAltText => &mut self.image_alt_text,
            Column::GiftCard => &mut self.gift_card,
            Column::VariantImageSrc => &mut self.variant_image_src,
            Column::VariantWeightUnit => &mut self.variant_weight_unit,
            Column::VariantTaxCode => &mut self.variant_tax_code,
        }
    }

    /// Handle used for grouping; an empty handle groups under `""`.
    #[must_use]
    pub fn handle_key(&self) -> String {
        self.handle.text().unwrap_or_default()
    }

    /// All three option value cells, slot order.
    #[must_use]
    pub fn option_values(&self) -> [&Cell; 3] {
        OPTION_SLOTS.map(|(_, value)| self.cell(value))
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        COLUMN_LAYOUT.iter().all(|c| self.cell(*c).is_empty())
    }

    /// Tab-separated cells in layout order, for diagnostics.
    #[must_use]
    pub fn to_tsv(&self) -> String {
        COLUMN_LAYOUT
            .iter()
            .map(|c| self.cell(*c).text().unwrap_or_default())
            .collect::<Vec<_>>()
            .join("\t")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_covers_every_column_once() {
        let unique: std::collections::HashSet<_> = COLUMN_LAYOUT.iter().collect();
        assert_eq!(unique.len(), COLUMN_COUNT);
    }

    #[test]
    fn from_cells_maps_positions_to_fields() {
        let mut cells = vec![Cell::Empty; COLUMN_COUNT];
        cells[0] = Cell::Text("tee".to_owned());
        cells[16] = Cell::Number(5.0);
        cells[24] = Cell::Text("https://cdn.example.com/tee.jpg".to_owned());
        cells[30] = Cell::Text("P0000000".to_owned());
        let row = ProductRow::from_cells(2, cells);

        assert_eq!(row.line, 2);
        assert_eq!(row.handle, Cell::Text("tee".to_owned()));
        assert_eq!(row.variant_inventory_qty, Cell::Number(5.0));
        assert_eq!(
            row.image_src.text().as_deref(),
            Some("https://cdn.example.com/tee.jpg")
        );
        assert_eq!(row.variant_tax_code.text().as_deref(), Some("P0000000"));
    }

    #[test]
    fn short_rows_are_padded_with_empty_cells() {
        let row = ProductRow::from_cells(3, vec![Cell::Text("tee".to_owned())]);
        assert_eq!(row.handle_key(), "tee");
        assert!(row.title.is_empty());
        assert!(row.variant_tax_code.is_empty());
    }

    #[test]
    fn extra_cells_are_ignored() {
        let mut cells = vec![Cell::Text("x".to_owned()); COLUMN_COUNT + 3];
        cells[0] = Cell::Text("tee".to_owned());
        let row = ProductRow::from_cells(4, cells);
        assert_eq!(row.variant_tax_code, Cell::Text("x".to_owned()));
    }

    #[test]
    fn whole_numbers_render_without_fraction() {
        assert_eq!(Cell::Number(42.0).text().as_deref(), Some("42"));
        assert_eq!(Cell::Number(19.99).text().as_deref(), Some("19.99"));
        assert_eq!(Cell::Text(String::new()).text(), None);
        assert!(Cell::Text(String::new()).is_empty());
        assert!(!Cell::Text(" ".to_owned()).is_empty());
    }
}
