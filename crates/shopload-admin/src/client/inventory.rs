//! Inventory level and collection membership endpoints.

use reqwest::Method;

use super::{AdminClient, Envelope};
use crate::error::AdminError;
use crate::types::{Collect, CollectInput, InventoryLevel, InventoryLevelInput};

impl AdminClient {
    /// Sets the absolute available quantity of an inventory item at a location.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Api`] when the item is not tracked or not stocked
    /// at the location.
    pub async fn set_inventory_level(
        &self,
        input: &InventoryLevelInput,
    ) -> Result<InventoryLevel, AdminError> {
        let url = self.endpoint("inventory_levels/set.json", &[])?;
        // This endpoint takes its fields unwrapped.
        self.send_field(Method::POST, &url, input, "inventory_level")
            .await
    }

    /// Adds a product to a custom collection.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError`] if the request fails.
    pub async fn create_collect(&self, input: &CollectInput) -> Result<Collect, AdminError> {
        let url = self.endpoint("collects.json", &[])?;
        let body = Envelope {
            key: "collect",
            value: input,
        };
        self.send_field(Method::POST, &url, &body, "collect").await
    }
}
