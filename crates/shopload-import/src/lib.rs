//! Product spreadsheet import.
//!
//! [`sheet`] decodes a workbook into [`ProductRow`]s, [`plan`] groups them by
//! handle and classifies each row, and [`Importer`] writes the result to a
//! [`shopload_admin::CatalogApi`].

pub mod coerce;
pub mod error;
pub mod importer;
pub mod layout;
pub mod plan;
pub mod report;
pub mod sheet;

pub use error::{ImportError, StepError};
pub use importer::{ImportSettings, Importer, UploadResponse, EMPTY_FILE_MESSAGE, SUCCESS_MESSAGE};
pub use layout::{Cell, Column, ProductRow, COLUMN_COUNT, COLUMN_LAYOUT};
pub use plan::{
    classify, collect_options, group_by_handle, plan_block, plan_worksheet, BlockPlan,
    HandleBlock, PlannedRow, RowKind, RowPlan, VariantImage, VariantPlan,
};
pub use report::{ImportReport, RowOutcome, RowReport, SkipReason, Step};
pub use sheet::{read_workbook, Worksheet};
