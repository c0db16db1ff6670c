//! The remote catalog seam the importer is written against.

use std::future::Future;

use crate::client::AdminClient;
use crate::error::AdminError;
use crate::types::{
    Collect, CollectInput, Image, ImageInput, InventoryLevel, InventoryLevelInput, Product,
    ProductInput, Variant, VariantInput,
};

/// CRUD over products, variants, images, inventory levels and collection
/// membership in a remote catalog store.
///
/// [`AdminClient`] is the production implementation; tests substitute an
/// in-memory recorder.
pub trait CatalogApi: Sync {
    fn list_products(&self) -> impl Future<Output = Result<Vec<Product>, AdminError>> + Send;

    fn get_product(
        &self,
        product_id: u64,
    ) -> impl Future<Output = Result<Product, AdminError>> + Send;

    fn create_product(
        &self,
        input: &ProductInput,
    ) -> impl Future<Output = Result<Product, AdminError>> + Send;

    fn delete_product(&self, product_id: u64)
        -> impl Future<Output = Result<(), AdminError>> + Send;

    fn create_image(
        &self,
        product_id: u64,
        input: &ImageInput,
    ) -> impl Future<Output = Result<Image, AdminError>> + Send;

    fn list_variants(
        &self,
        product_id: u64,
    ) -> impl Future<Output = Result<Vec<Variant>, AdminError>> + Send;

    fn create_variant(
        &self,
        product_id: u64,
        input: &VariantInput,
    ) -> impl Future<Output = Result<Variant, AdminError>> + Send;

    fn update_variant(
        &self,
        variant_id: u64,
        input: &VariantInput,
    ) -> impl Future<Output = Result<Variant, AdminError>> + Send;

    fn delete_variant(
        &self,
        product_id: u64,
        variant_id: u64,
    ) -> impl Future<Output = Result<(), AdminError>> + Send;

    fn set_inventory_level(
        &self,
        input: &InventoryLevelInput,
    ) -> impl Future<Output = Result<InventoryLevel, AdminError>> + Send;

    fn create_collect(
        &self,
        input: &CollectInput,
    ) -> impl Future<Output = Result<Collect, AdminError>> + Send;
}

impl CatalogApi for AdminClient {
    async fn list_products(&self) -> Result<Vec<Product>, AdminError> {
        AdminClient::list_products(self).await
    }

    async fn get_product(&self, product_id: u64) -> Result<Product, AdminError> {
        AdminClient::get_product(self, product_id).await
    }

    async fn create_product(&self, input: &ProductInput) -> Result<Product, AdminError> {
        AdminClient::create_product(self, input).await
    }

    async fn delete_product(&self, product_id: u64) -> Result<(), AdminError> {
        AdminClient::delete_product(self, product_id).await
    }

    async fn create_image(&self, product_id: u64, input: &ImageInput) -> Result<Image, AdminError> {
        AdminClient::create_image(self, product_id, input).await
    }

    async fn list_variants(&self, product_id: u64) -> Result<Vec<Variant>, AdminError> {
        AdminClient::list_variants(self, product_id).await
    }

    async fn create_variant(
        &self,
        product_id: u64,
        input: &VariantInput,
    ) -> Result<Variant, AdminError> {
        AdminClient::create_variant(self, product_id, input).await
    }

    async fn update_variant(
        &self,
        variant_id: u64,
        input: &VariantInput,
    ) -> Result<Variant, AdminError> {
        AdminClient::update_variant(self, variant_id, input).await
    }

    async fn delete_variant(&self, product_id: u64, variant_id: u64) -> Result<(), AdminError> {
        AdminClient::delete_variant(self, product_id, variant_id).await
    }

    async fn set_inventory_level(
        &self,
        input: &InventoryLevelInput,
    ) -> Result<InventoryLevel, AdminError> {
        AdminClient::set_inventory_level(self, input).await
    }

    async fn create_collect(&self, input: &CollectInput) -> Result<Collect, AdminError> {
        AdminClient::create_collect(self, input).await
    }
}
