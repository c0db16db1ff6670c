use std::io::Write;
use std::path::Path;

use anyhow::Context;
use serde_json::json;
use shopload_import::{plan_worksheet, read_workbook, BlockPlan};

/// Prints one JSON line per handle block: its options and row kinds.
pub(crate) fn run_plan(file: &Path) -> anyhow::Result<()> {
    let bytes =
        std::fs::read(file).with_context(|| format!("failed to read {}", file.display()))?;
    let worksheets = read_workbook(&bytes)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for worksheet in worksheets {
        for block in plan_worksheet(worksheet.rows) {
            writeln!(out, "{}", block_summary(&worksheet.name, &block))?;
        }
    }
    Ok(())
}

pub(crate) fn block_summary(worksheet: &str, block: &BlockPlan) -> serde_json::Value {
    let rows: Vec<_> = block
        .rows
        .iter()
        .map(|row| json!({"line": row.line, "kind": row.plan.kind()}))
        .collect();
    json!({
        "worksheet": worksheet,
        "handle": block.handle,
        "options": block.options(),
        "rows": rows,
    })
}
