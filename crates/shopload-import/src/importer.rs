//! Drives block plans through a [`CatalogApi`].
//!
//! Blocks are imported in sheet order, rows in block order, one remote call
//! at a time. A failed row is recorded in the [`ImportReport`] and the run
//! moves on; only an empty upload, an unreadable workbook or a failed purge
//! end the run early.

use futures::stream::{self, StreamExt, TryStreamExt};
use serde::Serialize;
use shopload_admin::{
    CatalogApi, CollectInput, Image, ImageInput, InventoryLevelInput, Product, ProductInput,
    VariantInput,
};

use crate::error::{ImportError, StepError};
use crate::plan::{plan_worksheet, BlockPlan, RowPlan, VariantImage, VariantPlan};
use crate::report::{ImportReport, RowOutcome, RowReport, SkipReason, Step};
use crate::sheet::{read_workbook, Worksheet};

pub const EMPTY_FILE_MESSAGE: &str = "File is empty";
pub const SUCCESS_MESSAGE: &str = "File was uploaded and processed successfully";

/// Result of an upload as reported to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub message: String,
}

impl UploadResponse {
    fn new(success: bool, message: &str) -> Self {
        Self {
            success,
            message: message.to_owned(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ImportSettings {
    /// Collection every created product is added to.
    pub collection_id: u64,
    /// Location whose inventory levels are set.
    pub location_id: u64,
    /// Maximum concurrent deletes while purging.
    pub purge_concurrency: usize,
}

/// Imports product spreadsheets into a catalog.
pub struct Importer<C> {
    catalog: C,
    settings: ImportSettings,
}

/// Which variant a row's fields are written to.
#[derive(Debug, Clone, Copy)]
enum VariantTarget {
    /// The variant the store created along with the product.
    Default(u64),
    New,
}

struct StepFailure {
    step: Step,
    error: StepError,
}

impl StepFailure {
    fn into_outcome(self) -> RowOutcome {
        RowOutcome::Failed {
            step: self.step,
            error: self.error,
        }
    }
}

fn failed_at<E: Into<StepError>>(step: Step) -> impl FnOnce(E) -> StepFailure {
    move |error| StepFailure {
        step,
        error: error.into(),
    }
}

impl<C: CatalogApi> Importer<C> {
    #[must_use]
    pub fn new(catalog: C, settings: ImportSettings) -> Self {
        Self { catalog, settings }
    }

    #[must_use]
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Imports every worksheet of `file`, first deleting all existing
    /// products when `purge` is set.
    ///
    /// Returns `success: false` without touching the catalog when `file` is
    /// missing or empty. Otherwise succeeds once every row has been attempted,
    /// whether or not individual rows failed.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError::Workbook`] if the file cannot be decoded and
    /// [`ImportError::Purge`] if listing or deleting existing products fails.
    pub async fn upload(
        &self,
        file: Option<&[u8]>,
        purge: bool,
    ) -> Result<UploadResponse, ImportError> {
        self.upload_with_report(file, purge)
            .await
            .map(|(response, _)| response)
    }

    /// Same as [`Importer::upload`], also returning the per-row report.
    ///
    /// # Errors
    ///
    /// See [`Importer::upload`].
    pub async fn upload_with_report(
        &self,
        file: Option<&[u8]>,
        purge: bool,
    ) -> Result<(UploadResponse, ImportReport), ImportError> {
        let mut report = ImportReport::default();
        let bytes = match file {
            Some(bytes) if !bytes.is_empty() => bytes,
            _ => return Ok((UploadResponse::new(false, EMPTY_FILE_MESSAGE), report)),
        };

        let worksheets = read_workbook(bytes)?;

        if purge {
            report.purged = self.purge().await?;
        }

        self.import_worksheets(worksheets, &mut report).await;
        report.log_failures();
        report.log_summary();

        Ok((UploadResponse::new(true, SUCCESS_MESSAGE), report))
    }

    /// Deletes every product in the catalog, returning how many were removed.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError::Purge`] on the first failed list or delete.
    pub async fn purge(&self) -> Result<usize, ImportError> {
        let products: Vec<Product> = self
            .catalog
            .list_products()
            .await
            .map_err(ImportError::Purge)?;
        let count = products.len();
        tracing::info!(count, "deleting products");

        stream::iter(products.iter().map(|product| product.id))
            .map(|product_id| self.catalog.delete_product(product_id))
            .buffer_unordered(self.settings.purge_concurrency.max(1))
            .try_collect::<Vec<()>>()
            .await
            .map_err(ImportError::Purge)?;

        tracing::info!(count, "products deleted");
        Ok(count)
    }

    /// Imports already-decoded worksheets into `report`.
    pub async fn import_worksheets(&self, worksheets: Vec<Worksheet>, report: &mut ImportReport) {
        for worksheet in worksheets {
            report.worksheets += 1;
            for block in plan_worksheet(worksheet.rows) {
                report.blocks += 1;
                tracing::info!(
                    worksheet = %worksheet.name,
                    block = report.blocks,
                    handle = %block.handle,
                    rows = block.rows.len(),
                    "importing block"
                );
                self.import_block(&worksheet.name, block, report).await;
            }
        }
    }

    async fn import_block(&self, worksheet: &str, block: BlockPlan, report: &mut ImportReport) {
        let mut product_id: Option<u64> = None;

        for row in block.rows {
            let kind = row.plan.kind();
            let outcome = match row.plan {
                RowPlan::Primary { product, variant } => {
                    let (outcome, created) = self.import_primary(&product, &variant, report).await;
                    product_id = created;
                    outcome
                }
                RowPlan::ImageOnly { image } => match product_id {
                    None => RowOutcome::Skipped(SkipReason::ProductUnavailable),
                    Some(id) => self
                        .create_image(id, &image, Step::CreateImage, report)
                        .await
                        .map_or_else(StepFailure::into_outcome, |image| {
                            RowOutcome::ImageAttached { image_id: image.id }
                        }),
                },
                RowPlan::Variant(variant) => match product_id {
                    None => RowOutcome::Skipped(SkipReason::ProductUnavailable),
                    Some(id) => self
                        .apply_variant(id, VariantTarget::New, &variant, report)
                        .await
                        .map_or_else(StepFailure::into_outcome, |variant_id| {
                            RowOutcome::VariantCreated { variant_id }
                        }),
                },
                RowPlan::Invalid { cells } => RowOutcome::Invalid { cells },
            };

            report.rows.push(RowReport {
                worksheet: worksheet.to_owned(),
                handle: block.handle.clone(),
                line: row.line,
                index: row.index,
                kind,
                outcome,
            });
        }
    }

    /// Creates the product and applies the primary row to its default
    /// variant. The product id is returned even if a later step failed.
    async fn import_primary(
        &self,
        input: &ProductInput,
        variant: &VariantPlan,
        report: &mut ImportReport,
    ) -> (RowOutcome, Option<u64>) {
        let product = match self.catalog.create_product(input).await {
            Ok(product) => product,
            Err(err) => return (failed_at(Step::CreateProduct)(err).into_outcome(), None),
        };
        report.products_created += 1;
        tracing::debug!(product_id = product.id, handle = ?input.handle, "product created");

        let outcome = match self.finish_product(&product, variant, report).await {
            Ok(variant_id) => RowOutcome::ProductCreated {
                product_id: product.id,
                variant_id,
            },
            Err(failure) => failure.into_outcome(),
        };
        (outcome, Some(product.id))
    }

    async fn finish_product(
        &self,
        product: &Product,
        variant: &VariantPlan,
        report: &mut ImportReport,
    ) -> Result<u64, StepFailure> {
        self.catalog
            .create_collect(&CollectInput {
                product_id: product.id,
                collection_id: self.settings.collection_id,
            })
            .await
            .map_err(failed_at(Step::AddToCollection))?;

        let default_variant = product
            .variants
            .first()
            .map(|v| v.id)
            .ok_or(StepFailure {
                step: Step::UpdateDefaultVariant,
                error: StepError::MissingDefaultVariant {
                    product_id: product.id,
                },
            })?;

        self.apply_variant(
            product.id,
            VariantTarget::Default(default_variant),
            variant,
            report,
        )
        .await
    }

    /// Creates the row's images, writes the variant fields and sets its
    /// stock. Returns the variant id.
    async fn apply_variant(
        &self,
        product_id: u64,
        target: VariantTarget,
        plan: &VariantPlan,
        report: &mut ImportReport,
    ) -> Result<u64, StepFailure> {
        let row_image = match &plan.image {
            Some(input) => Some(
                self.create_image(product_id, input, Step::CreateImage, report)
                    .await?,
            ),
            None => None,
        };

        let image_id = match &plan.link {
            VariantImage::Unlinked => None,
            VariantImage::RowImage => row_image.as_ref().map(|image| image.id),
            VariantImage::Separate(input) => Some(
                self.create_image(product_id, input, Step::CreateVariantImage, report)
                    .await?
                    .id,
            ),
        };

        let fields = VariantInput {
            image_id,
            ..plan.fields.clone()
        };
        let variant = match target {
            VariantTarget::Default(variant_id) => {
                let variant = self
                    .catalog
                    .update_variant(variant_id, &fields)
                    .await
                    .map_err(failed_at(Step::UpdateDefaultVariant))?;
                report.variants_updated += 1;
                variant
            }
            VariantTarget::New => {
                let variant = self
                    .catalog
                    .create_variant(product_id, &fields)
                    .await
                    .map_err(failed_at(Step::CreateVariant))?;
                report.variants_created += 1;
                variant
            }
        };

        if let Some(available) = plan.quantity {
            let inventory_item_id = variant.inventory_item_id.ok_or(StepFailure {
                step: Step::SetInventory,
                error: StepError::MissingInventoryItem {
                    variant_id: variant.id,
                },
            })?;
            self.catalog
                .set_inventory_level(&InventoryLevelInput {
                    location_id: self.settings.location_id,
                    inventory_item_id,
                    available,
                })
                .await
                .map_err(failed_at(Step::SetInventory))?;
            report.inventory_levels_set += 1;
        }

        Ok(variant.id)
    }

    async fn create_image(
        &self,
        product_id: u64,
        input: &ImageInput,
        step: Step,
        report: &mut ImportReport,
    ) -> Result<Image, StepFailure> {
        let image = self
            .catalog
            .create_image(product_id, input)
            .await
            .map_err(failed_at(step))?;
        report.images_created += 1;
        Ok(image)
    }
}
