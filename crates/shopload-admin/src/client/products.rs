//! Product endpoints.

use reqwest::Method;

use super::{AdminClient, Envelope};
use crate::error::AdminError;
use crate::pagination::next_page_cursor;
use crate::types::{Product, ProductInput};

/// Largest page the list endpoint serves.
const PAGE_LIMIT: &str = "250";

/// Guard against a cursor that never terminates.
const MAX_PAGES: usize = 400;

impl AdminClient {
    /// Lists every product in the store, following `Link` cursors until the
    /// last page.
    ///
    /// # Errors
    ///
    /// Propagates any page failure, or [`AdminError::PaginationLimit`] when
    /// more than [`MAX_PAGES`] pages are served.
    pub async fn list_products(&self) -> Result<Vec<Product>, AdminError> {
        let mut products = Vec::new();
        let mut cursor: Option<String> = None;

        for _ in 0..MAX_PAGES {
            let mut query = vec![("limit", PAGE_LIMIT)];
            if let Some(page_info) = cursor.as_deref() {
                query.push(("page_info", page_info));
            }
            let url = self.endpoint("products.json", &query)?;
            let (page, link): (Vec<Product>, _) = self.get_field(&url, "products").await?;
            tracing::debug!(count = page.len(), "fetched product page");
            products.extend(page);

            cursor = next_page_cursor(link.as_deref());
            if cursor.is_none() {
                return Ok(products);
            }
        }

        Err(AdminError::PaginationLimit {
            max_pages: MAX_PAGES,
        })
    }

    /// # Errors
    ///
    /// Returns [`AdminError::Api`] with status 404 when the product is gone.
    pub async fn get_product(&self, product_id: u64) -> Result<Product, AdminError> {
        let url = self.endpoint(&format!("products/{product_id}.json"), &[])?;
        let (product, _) = self.get_field(&url, "product").await?;
        Ok(product)
    }

    /// Creates a product. The store attaches one default variant to it.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Api`] (typically 422) when the store rejects the input.
    pub async fn create_product(&self, input: &ProductInput) -> Result<Product, AdminError> {
        let url = self.endpoint("products.json", &[])?;
        let body = Envelope {
            key: "product",
            value: input,
        };
        self.send_field(Method::POST, &url, &body, "product").await
    }

    /// # Errors
    ///
    /// Returns [`AdminError`] if the request fails.
    pub async fn delete_product(&self, product_id: u64) -> Result<(), AdminError> {
        let url = self.endpoint(&format!("products/{product_id}.json"), &[])?;
        self.delete(&url).await
    }
}
