pub mod catalog;
pub mod client;
pub mod error;
pub mod pagination;
mod retry;
pub mod types;

pub use catalog::CatalogApi;
pub use client::{AdminClient, RetryPolicy};
pub use error::AdminError;
pub use types::{
    Collect, CollectInput, Image, ImageInput, InventoryLevel, InventoryLevelInput, Product,
    ProductInput, ProductOption, ProductStatus, Variant, VariantInput,
};
