//! Workbook decoding into [`ProductRow`]s.

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};

use crate::error::ImportError;
use crate::layout::{Cell, ProductRow};

/// Data rows of one worksheet, header removed.
#[derive(Debug, Clone)]
pub struct Worksheet {
    pub name: String,
    pub rows: Vec<ProductRow>,
}

/// Decodes every worksheet of an xlsx/xls/ods payload.
///
/// Row 1 of each worksheet is treated as the header and dropped.
/// Fully blank rows are skipped.
///
/// # Errors
///
/// Returns [`ImportError::Workbook`] if the payload is not a readable
/// workbook or a worksheet cannot be decoded.
pub fn read_workbook(bytes: &[u8]) -> Result<Vec<Worksheet>, ImportError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| ImportError::Workbook(e.to_string()))?;

    let mut worksheets = Vec::new();
    for name in workbook.sheet_names() {
        let range = workbook
            .worksheet_range(&name)
            .map_err(|e| ImportError::Workbook(format!("worksheet \"{name}\": {e}")))?;
        let rows = worksheet_rows(&range);
        tracing::debug!(worksheet = %name, rows = rows.len(), "worksheet decoded");
        worksheets.push(Worksheet { name, rows });
    }
    Ok(worksheets)
}

fn worksheet_rows(range: &Range<Data>) -> Vec<ProductRow> {
    // A range starts at its first used cell; leading empty columns and rows
    // are restored so positions and row numbers match the sheet.
    let (first_row, first_col) = range
        .start()
        .map_or((0, 0), |(row, col)| (row as usize, col as usize));

    range
        .rows()
        .enumerate()
        .map(|(offset, cells)| (first_row + offset, cells))
        // Sheet row 0 is the header; a blank header row is simply not in
        // the range.
        .filter(|(row, _)| *row > 0)
        .map(|(row, cells)| {
            let line = row + 1;
            let padded = std::iter::repeat_n(Cell::Empty, first_col)
                .chain(cells.iter().map(to_cell));
            ProductRow::from_cells(line, padded)
        })
        .filter(|row| !row.is_blank())
        .collect()
}

#[allow(clippy::cast_precision_loss)]
fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => {
            if s.is_empty() {
                Cell::Empty
            } else {
                Cell::Text(s.clone())
            }
        }
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
    }
}

#[cfg(test)]
mod tests {
    use rust_xlsxwriter::Workbook;

    use super::*;

    fn workbook_bytes(build: impl FnOnce(&mut Workbook)) -> Vec<u8> {
        let mut workbook = Workbook::new();
        build(&mut workbook);
        workbook.save_to_buffer().expect("workbook should serialize")
    }

    #[test]
    fn drops_header_and_types_cells() {
        let bytes = workbook_bytes(|wb| {
            let ws = wb.add_worksheet();
            ws.write_string(0, 0, "Handle").unwrap();
            ws.write_string(1, 0, "tee").unwrap();
            ws.write_string(1, 1, "Tee").unwrap();
            ws.write_boolean(1, 6, true).unwrap();
            ws.write_number(1, 16, 5.0).unwrap();
        });

        let sheets = read_workbook(&bytes).unwrap();

        assert_eq!(sheets.len(), 1);
        assert_eq!(sheets[0].rows.len(), 1);
        let row = &sheets[0].rows[0];
        assert_eq!(row.line, 2);
        assert_eq!(row.handle, Cell::Text("tee".to_owned()));
        assert_eq!(row.published, Cell::Bool(true));
        assert_eq!(row.variant_inventory_qty, Cell::Number(5.0));
        assert!(row.variant_tax_code.is_empty());
    }

    #[test]
    fn reads_every_worksheet_in_order() {
        let bytes = workbook_bytes(|wb| {
            let first = wb.add_worksheet();
            first.set_name("Shirts").unwrap();
            first.write_string(0, 0, "Handle").unwrap();
            first.write_string(1, 0, "tee").unwrap();
            let second = wb.add_worksheet();
            second.set_name("Hats").unwrap();
            second.write_string(0, 0, "Handle").unwrap();
            second.write_string(1, 0, "cap").unwrap();
            second.write_string(2, 0, "beanie").unwrap();
        });

        let sheets = read_workbook(&bytes).unwrap();

        let names: Vec<_> = sheets.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Shirts", "Hats"]);
        assert_eq!(sheets[1].rows.len(), 2);
    }

    #[test]
    fn blank_rows_are_skipped_and_line_numbers_kept() {
        let bytes = workbook_bytes(|wb| {
            let ws = wb.add_worksheet();
            ws.write_string(0, 0, "Handle").unwrap();
            ws.write_string(1, 0, "tee").unwrap();
            ws.write_string(3, 0, "tee").unwrap();
        });

        let rows = &read_workbook(&bytes).unwrap()[0].rows;

        let lines: Vec<_> = rows.iter().map(|r| r.line).collect();
        assert_eq!(lines, [2, 4]);
    }

    #[test]
    fn leading_empty_columns_keep_positions() {
        let bytes = workbook_bytes(|wb| {
            let ws = wb.add_worksheet();
            ws.write_string(0, 1, "Title").unwrap();
            ws.write_string(1, 1, "Tee").unwrap();
        });

        let row = &read_workbook(&bytes).unwrap()[0].rows[0];
        assert!(row.handle.is_empty());
        assert_eq!(row.title, Cell::Text("Tee".to_owned()));
    }

    #[test]
    fn blank_header_row_keeps_the_first_data_row() {
        let bytes = workbook_bytes(|wb| {
            let ws = wb.add_worksheet();
            ws.write_string(1, 0, "tee").unwrap();
            ws.write_string(2, 0, "cap").unwrap();
        });

        let rows = &read_workbook(&bytes).unwrap()[0].rows;

        let lines: Vec<_> = rows.iter().map(|r| r.line).collect();
        assert_eq!(lines, [2, 3]);
        assert_eq!(rows[0].handle, Cell::Text("tee".to_owned()));
    }

    #[test]
    fn garbage_is_a_workbook_error() {
        let err = read_workbook(b"not a spreadsheet").unwrap_err();
        assert!(matches!(err, ImportError::Workbook(_)));
    }
}
