//! Product image endpoints.

use reqwest::Method;

use super::{AdminClient, Envelope};
use crate::error::AdminError;
use crate::types::{Image, ImageInput};

impl AdminClient {
    /// Attaches an image to a product. The store downloads `src` itself.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Api`] when the store cannot fetch or accept the image.
    pub async fn create_image(
        &self,
        product_id: u64,
        input: &ImageInput,
    ) -> Result<Image, AdminError> {
        let url = self.endpoint(&format!("products/{product_id}/images.json"), &[])?;
        let body = Envelope {
            key: "image",
            value: input,
        };
        self.send_field(Method::POST, &url, &body, "image").await
    }
}
