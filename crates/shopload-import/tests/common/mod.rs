//! Shared fixtures: an in-memory recording catalog and an xlsx builder.

#![allow(dead_code)]

use std::sync::Mutex;

use rust_xlsxwriter::Workbook;
use shopload_admin::{
    AdminError, CatalogApi, Collect, CollectInput, Image, ImageInput, InventoryLevel,
    InventoryLevelInput, Product, ProductInput, Variant, VariantInput,
};
use shopload_import::{Column, ImportSettings, COLUMN_LAYOUT};

pub const COLLECTION_ID: u64 = 9_001;
pub const LOCATION_ID: u64 = 7_001;

pub fn settings() -> ImportSettings {
    ImportSettings {
        collection_id: COLLECTION_ID,
        location_id: LOCATION_ID,
        purge_concurrency: 4,
    }
}

/// One call received by [`FakeCatalog`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListProducts,
    GetProduct(u64),
    CreateProduct(ProductInput),
    DeleteProduct(u64),
    CreateImage {
        product_id: u64,
        input: ImageInput,
    },
    ListVariants(u64),
    CreateVariant {
        product_id: u64,
        input: VariantInput,
    },
    UpdateVariant {
        variant_id: u64,
        input: VariantInput,
    },
    DeleteVariant {
        product_id: u64,
        variant_id: u64,
    },
    SetInventory(InventoryLevelInput),
    CreateCollect(CollectInput),
}

impl Call {
    pub fn is_write(&self) -> bool {
        !matches!(
            self,
            Call::ListProducts | Call::GetProduct(_) | Call::ListVariants(_)
        )
    }
}

/// Which calls the fake rejects with a 422.
#[derive(Debug, Default)]
pub struct Failures {
    pub list_products: bool,
    pub delete_product_ids: Vec<u64>,
    pub create_product_handles: Vec<String>,
    pub create_image_srcs: Vec<String>,
    /// Variant creation fails when `option1` matches.
    pub create_variant_option1: Vec<String>,
    pub set_inventory: bool,
    /// Products come back without their default variant.
    pub omit_default_variant: bool,
}

#[derive(Debug)]
struct State {
    calls: Vec<Call>,
    next_id: u64,
    existing: Vec<u64>,
    failures: Failures,
}

/// Records every call and answers with incrementing ids. Each created
/// variant gets `inventory_item_id = id + 500_000`.
#[derive(Debug)]
pub struct FakeCatalog {
    state: Mutex<State>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::with(Vec::new(), Failures::default())
    }

    pub fn with(existing: Vec<u64>, failures: Failures) -> Self {
        Self {
            state: Mutex::new(State {
                calls: Vec::new(),
                next_id: 1,
                existing,
                failures,
            }),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn writes(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_write).collect()
    }

    fn record(&self, call: Call) -> (u64, std::sync::MutexGuard<'_, State>) {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        let id = state.next_id;
        state.next_id += 1;
        (id, state)
    }
}

pub fn rejected(what: &str) -> AdminError {
    AdminError::Api {
        status: 422,
        url: format!("https://fake.myshopify.com/{what}"),
        body: serde_json::json!({"errors": {"base": [format!("{what} rejected")]}}),
    }
}

fn variant(id: u64, product_id: u64, input: Option<&VariantInput>) -> Variant {
    Variant {
        id,
        product_id: Some(product_id),
        inventory_item_id: Some(id + 500_000),
        sku: input.and_then(|i| i.sku.clone()),
        price: input.and_then(|i| i.price.clone()),
        image_id: input.and_then(|i| i.image_id),
        option1: input.and_then(|i| i.option1.clone()),
        option2: input.and_then(|i| i.option2.clone()),
        option3: input.and_then(|i| i.option3.clone()),
        position: None,
    }
}

impl CatalogApi for FakeCatalog {
    async fn list_products(&self) -> Result<Vec<Product>, AdminError> {
        let (_, state) = self.record(Call::ListProducts);
        if state.failures.list_products {
            return Err(rejected("products"));
        }
        Ok(state
            .existing
            .iter()
            .map(|&id| Product {
                id,
                title: None,
                handle: None,
                status: None,
                variants: Vec::new(),
                images: Vec::new(),
                options: Vec::new(),
            })
            .collect())
    }

    async fn get_product(&self, product_id: u64) -> Result<Product, AdminError> {
        self.record(Call::GetProduct(product_id));
        Err(rejected("product"))
    }

    async fn create_product(&self, input: &ProductInput) -> Result<Product, AdminError> {
        let (id, mut state) = self.record(Call::CreateProduct(input.clone()));
        let handle = input.handle.clone().unwrap_or_default();
        if state.failures.create_product_handles.contains(&handle) {
            return Err(rejected("product"));
        }
        let variants = if state.failures.omit_default_variant {
            Vec::new()
        } else {
            let variant_id = state.next_id;
            state.next_id += 1;
            vec![variant(variant_id, id, None)]
        };
        Ok(Product {
            id,
            title: input.title.clone(),
            handle: input.handle.clone(),
            status: None,
            variants,
            images: Vec::new(),
            options: input.options.clone(),
        })
    }

    async fn delete_product(&self, product_id: u64) -> Result<(), AdminError> {
        let (_, state) = self.record(Call::DeleteProduct(product_id));
        if state.failures.delete_product_ids.contains(&product_id) {
            return Err(rejected("product"));
        }
        Ok(())
    }

    async fn create_image(&self, product_id: u64, input: &ImageInput) -> Result<Image, AdminError> {
        let (id, state) = self.record(Call::CreateImage {
            product_id,
            input: input.clone(),
        });
        if state.failures.create_image_srcs.contains(&input.src) {
            return Err(rejected("image"));
        }
        Ok(Image {
            id,
            product_id: Some(product_id),
            src: Some(input.src.clone()),
            position: input.position,
            alt: input.alt.clone(),
        })
    }

    async fn list_variants(&self, product_id: u64) -> Result<Vec<Variant>, AdminError> {
        self.record(Call::ListVariants(product_id));
        Ok(Vec::new())
    }

    async fn create_variant(
        &self,
        product_id: u64,
        input: &VariantInput,
    ) -> Result<Variant, AdminError> {
        let (id, state) = self.record(Call::CreateVariant {
            product_id,
            input: input.clone(),
        });
        let option1 = input.option1.clone().unwrap_or_default();
        if state.failures.create_variant_option1.contains(&option1) {
            return Err(rejected("variant"));
        }
        Ok(variant(id, product_id, Some(input)))
    }

    async fn update_variant(
        &self,
        variant_id: u64,
        input: &VariantInput,
    ) -> Result<Variant, AdminError> {
        self.record(Call::UpdateVariant {
            variant_id,
            input: input.clone(),
        });
        Ok(variant(variant_id, 0, Some(input)))
    }

    async fn delete_variant(&self, product_id: u64, variant_id: u64) -> Result<(), AdminError> {
        self.record(Call::DeleteVariant {
            product_id,
            variant_id,
        });
        Ok(())
    }

    async fn set_inventory_level(
        &self,
        input: &InventoryLevelInput,
    ) -> Result<InventoryLevel, AdminError> {
        let (_, state) = self.record(Call::SetInventory(input.clone()));
        if state.failures.set_inventory {
            return Err(rejected("inventory_level"));
        }
        Ok(InventoryLevel {
            inventory_item_id: input.inventory_item_id,
            location_id: input.location_id,
            available: Some(input.available),
        })
    }

    async fn create_collect(&self, input: &CollectInput) -> Result<Collect, AdminError> {
        let (id, guard) = self.record(Call::CreateCollect(input.clone()));
        drop(guard);
        Ok(Collect {
            id,
            product_id: input.product_id,
            collection_id: input.collection_id,
        })
    }
}

#[derive(Debug, Clone)]
enum Value {
    Text(String),
    Number(f64),
    Flag(bool),
}

/// One data row for [`workbook`], addressed by column.
#[derive(Debug, Clone)]
pub struct SheetRow {
    cells: Vec<(Column, Value)>,
}

pub fn row(handle: &str) -> SheetRow {
    SheetRow {
        cells: vec![(Column::Handle, Value::Text(handle.to_owned()))],
    }
}

impl SheetRow {
    pub fn text(mut self, column: Column, value: &str) -> Self {
        self.cells.push((column, Value::Text(value.to_owned())));
        self
    }

    pub fn number(mut self, column: Column, value: f64) -> Self {
        self.cells.push((column, Value::Number(value)));
        self
    }

    pub fn flag(mut self, column: Column, value: bool) -> Self {
        self.cells.push((column, Value::Flag(value)));
        self
    }

    /// A variant row: option 1 value, price and quantity.
    pub fn variant(self, color: &str, price: &str, qty: f64) -> Self {
        self.text(Column::Option1Value, color)
            .text(Column::VariantPrice, price)
            .number(Column::VariantInventoryQty, qty)
    }
}

fn column_index(column: Column) -> u16 {
    let index = COLUMN_LAYOUT
        .iter()
        .position(|c| *c == column)
        .expect("column is in the layout");
    u16::try_from(index).expect("layout fits in u16")
}

/// Builds an xlsx with a header row plus `rows` on each named worksheet.
pub fn workbook(sheets: &[(&str, Vec<SheetRow>)]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    for (name, rows) in sheets {
        let sheet = workbook.add_worksheet();
        sheet.set_name(*name).unwrap();
        for (col, column) in COLUMN_LAYOUT.iter().enumerate() {
            let col = u16::try_from(col).unwrap();
            sheet.write_string(0, col, column.header()).unwrap();
        }
        for (offset, data) in rows.iter().enumerate() {
            let line = u32::try_from(offset + 1).unwrap();
            for (column, value) in &data.cells {
                let col = column_index(*column);
                match value {
                    Value::Text(s) => sheet.write_string(line, col, s).map(|_| ()),
                    Value::Number(n) => sheet.write_number(line, col, *n).map(|_| ()),
                    Value::Flag(b) => sheet.write_boolean(line, col, *b).map(|_| ()),
                }
                .unwrap();
            }
        }
    }
    workbook.save_to_buffer().unwrap()
}

pub fn single_sheet(rows: Vec<SheetRow>) -> Vec<u8> {
    workbook(&[("Products", rows)])
}
