//! Product variant endpoints.

use reqwest::Method;

use super::{AdminClient, Envelope};
use crate::error::AdminError;
use crate::types::{Variant, VariantInput};

impl AdminClient {
    /// # Errors
    ///
    /// Returns [`AdminError`] if the request fails.
    pub async fn list_variants(&self, product_id: u64) -> Result<Vec<Variant>, AdminError> {
        let url = self.endpoint(&format!("products/{product_id}/variants.json"), &[])?;
        let (variants, _) = self.get_field(&url, "variants").await?;
        Ok(variants)
    }

    /// # Errors
    ///
    /// Returns [`AdminError::Api`] when the store rejects the variant, e.g. a
    /// duplicate option combination.
    pub async fn create_variant(
        &self,
        product_id: u64,
        input: &VariantInput,
    ) -> Result<Variant, AdminError> {
        let url = self.endpoint(&format!("products/{product_id}/variants.json"), &[])?;
        let body = Envelope {
            key: "variant",
            value: input,
        };
        self.send_field(Method::POST, &url, &body, "variant").await
    }

    /// # Errors
    ///
    /// Returns [`AdminError`] if the request fails.
    pub async fn update_variant(
        &self,
        variant_id: u64,
        input: &VariantInput,
    ) -> Result<Variant, AdminError> {
        let url = self.endpoint(&format!("variants/{variant_id}.json"), &[])?;
        let body = Envelope {
            key: "variant",
            value: input,
        };
        self.send_field(Method::PUT, &url, &body, "variant").await
    }

    /// # Errors
    ///
    /// Returns [`AdminError`] if the request fails.
    pub async fn delete_variant(&self, product_id: u64, variant_id: u64) -> Result<(), AdminError> {
        let url = self.endpoint(
            &format!("products/{product_id}/variants/{variant_id}.json"),
            &[],
        )?;
        self.delete(&url).await
    }
}
