use std::path::Path;

use calamine::{DataType, Reader, Xlsx, open_workbook};

use crate::muster::tools::error::{Result, ToolError};
use crate::muster::tools::model::RosterRow;

/// Header of the column holding the unit name.
pub const UNIT_COLUMN: &str = "Unit";
/// Header of the column holding the RIC code.
pub const RIC_COLUMN: &str = "RIC";

/// Reads roster rows from the first worksheet of an Excel workbook.
///
/// The first row is treated as headers and the `Unit` and `RIC` columns are
/// located by exact header match. A sheet that lacks one of the columns
/// yields rows with the corresponding field unset rather than an error, and
/// a sheet with no data rows yields an empty roster.
pub fn read_roster(path: &Path) -> Result<Vec<RosterRow>> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let range = read_first_sheet(&mut workbook)?;

    let mut rows = range.rows();
    let Some(headers) = rows.next() else {
        return Ok(Vec::new());
    };
    let unit_column = find_column(headers, UNIT_COLUMN);
    let ric_column = find_column(headers, RIC_COLUMN);

    let mut roster = Vec::new();
    for row in rows {
        roster.push(RosterRow {
            unit: unit_column.and_then(|index| non_empty_cell(row.get(index))),
            ric: ric_column.and_then(|index| non_empty_cell(row.get(index))),
        });
    }
    Ok(roster)
}

fn read_first_sheet<R: std::io::Read + std::io::Seek>(
    workbook: &mut Xlsx<R>,
) -> Result<calamine::Range<DataType>> {
    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| ToolError::InvalidWorkbook("workbook has no worksheets".into()))?;
    let range_result = workbook
        .worksheet_range(&sheet)
        .ok_or_else(|| ToolError::InvalidWorkbook(format!("missing sheet '{sheet}'")))?;
    let range = range_result.map_err(ToolError::from)?;
    Ok(range)
}

fn find_column(headers: &[DataType], name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|cell| cell_to_string(Some(cell)) == name)
}

fn non_empty_cell(cell: Option<&DataType>) -> Option<String> {
    let value = cell_to_string(cell);
    if value.is_empty() { None } else { Some(value) }
}

fn cell_to_string(cell: Option<&DataType>) -> String {
    match cell {
        Some(DataType::String(value)) => value.clone(),
        Some(DataType::Float(value)) => value.to_string(),
        Some(DataType::Int(value)) => value.to_string(),
        Some(DataType::Bool(value)) => value.to_string(),
        Some(DataType::Empty) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
