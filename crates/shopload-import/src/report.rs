//! Per-run import report. Row failures are collected here as values and
//! logged from the finished report.

use std::fmt;

use crate::error::StepError;
use crate::plan::RowKind;

/// The remote write a row was performing when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    CreateProduct,
    AddToCollection,
    CreateImage,
    CreateVariantImage,
    UpdateDefaultVariant,
    CreateVariant,
    SetInventory,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::CreateProduct => "create product",
            Step::AddToCollection => "add to collection",
            Step::CreateImage => "create image",
            Step::CreateVariantImage => "create variant image",
            Step::UpdateDefaultVariant => "update default variant",
            Step::CreateVariant => "create variant",
            Step::SetInventory => "set inventory level",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The block's product was never created.
    ProductUnavailable,
}

#[derive(Debug)]
pub enum RowOutcome {
    ProductCreated { product_id: u64, variant_id: u64 },
    ImageAttached { image_id: u64 },
    VariantCreated { variant_id: u64 },
    Skipped(SkipReason),
    /// Row matched no known shape; `cells` is the tab-separated row.
    Invalid { cells: String },
    Failed { step: Step, error: StepError },
}

#[derive(Debug)]
pub struct RowReport {
    pub worksheet: String,
    pub handle: String,
    /// Row number in the worksheet.
    pub line: usize,
    /// Position within the handle block.
    pub index: usize,
    pub kind: RowKind,
    pub outcome: RowOutcome,
}

impl RowReport {
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, RowOutcome::Failed { .. })
    }

    #[must_use]
    pub fn is_invalid(&self) -> bool {
        matches!(self.outcome, RowOutcome::Invalid { .. })
    }
}

/// Everything one `upload` did, row by row.
#[derive(Debug, Default)]
pub struct ImportReport {
    /// Products deleted by the purge; zero when purge was not requested.
    pub purged: usize,
    pub worksheets: usize,
    pub blocks: usize,
    pub products_created: usize,
    pub variants_created: usize,
    pub variants_updated: usize,
    pub images_created: usize,
    pub inventory_levels_set: usize,
    pub rows: Vec<RowReport>,
}

impl ImportReport {
    pub fn failures(&self) -> impl Iterator<Item = &RowReport> {
        self.rows.iter().filter(|row| row.is_failure())
    }

    pub fn invalid_rows(&self) -> impl Iterator<Item = &RowReport> {
        self.rows.iter().filter(|row| row.is_invalid())
    }

    pub fn skipped_rows(&self) -> impl Iterator<Item = &RowReport> {
        self.rows
            .iter()
            .filter(|row| matches!(row.outcome, RowOutcome::Skipped(_)))
    }

    /// Logs every invalid, skipped and failed row at `error`/`warn`.
    pub fn log_failures(&self) {
        for row in &self.rows {
            match &row.outcome {
                RowOutcome::Invalid { cells } => tracing::error!(
                    worksheet = %row.worksheet,
                    handle = %row.handle,
                    line = row.line,
                    row = %cells,
                    "invalid data row"
                ),
                RowOutcome::Skipped(reason) => tracing::warn!(
                    worksheet = %row.worksheet,
                    handle = %row.handle,
                    line = row.line,
                    kind = ?row.kind,
                    ?reason,
                    "row skipped"
                ),
                RowOutcome::Failed { step, error } => {
                    let body = error
                        .response_body()
                        .map(ToString::to_string)
                        .unwrap_or_default();
                    tracing::error!(
                        worksheet = %row.worksheet,
                        handle = %row.handle,
                        line = row.line,
                        kind = ?row.kind,
                        %step,
                        %error,
                        response_body = %body,
                        "row import failed"
                    );
                }
                RowOutcome::ProductCreated { .. }
                | RowOutcome::ImageAttached { .. }
                | RowOutcome::VariantCreated { .. } => {}
            }
        }
    }

    pub fn log_summary(&self) {
        tracing::info!(
            purged = self.purged,
            worksheets = self.worksheets,
            blocks = self.blocks,
            products = self.products_created,
            variants_created = self.variants_created,
            variants_updated = self.variants_updated,
            images = self.images_created,
            inventory_levels = self.inventory_levels_set,
            failed = self.failures().count(),
            invalid = self.invalid_rows().count(),
            skipped = self.skipped_rows().count(),
            "import finished"
        );
    }
}

#[cfg(test)]
mod tests {
    use shopload_admin::AdminError;

    use super::*;

    fn report_row(kind: RowKind, outcome: RowOutcome) -> RowReport {
        RowReport {
            worksheet: "Sheet1".to_owned(),
            handle: "tee".to_owned(),
            line: 2,
            index: 0,
            kind,
            outcome,
        }
    }

    #[test]
    fn counts_failures_invalid_and_skipped_rows_separately() {
        let report = ImportReport {
            rows: vec![
                report_row(
                    RowKind::Primary,
                    RowOutcome::Failed {
                        step: Step::CreateProduct,
                        error: StepError::Remote(AdminError::Api {
                            status: 422,
                            url: "u".to_owned(),
                            body: serde_json::json!({"errors": {"title": ["can't be blank"]}}),
                        }),
                    },
                ),
                report_row(RowKind::ImageOnly, RowOutcome::Skipped(SkipReason::ProductUnavailable)),
                report_row(
                    RowKind::Invalid,
                    RowOutcome::Invalid {
                        cells: "tee\t\t".to_owned(),
                    },
                ),
                report_row(RowKind::Variant, RowOutcome::VariantCreated { variant_id: 3 }),
            ],
            ..ImportReport::default()
        };

        assert_eq!(report.failures().count(), 1);
        assert_eq!(report.invalid_rows().count(), 1);
        assert_eq!(report.skipped_rows().count(), 1);
        report.log_failures();
        report.log_summary();
    }

    #[test]
    fn step_names_are_readable() {
        assert_eq!(Step::SetInventory.to_string(), "set inventory level");
        assert_eq!(Step::CreateVariantImage.to_string(), "create variant image");
    }
}
