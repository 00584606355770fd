use crate::muster::tools::model::{Category, ClassifiedEntry, RosterRow};

/// Unit name assigned to rows whose `Unit` cell is empty or missing.
pub const UNKNOWN_UNIT: &str = "Unknown Unit";

/// Resolves a roster row to the unit it counts against and the category its
/// RIC code maps to.
///
/// The unit name is taken verbatim from the cell, so surrounding whitespace
/// distinguishes units. The RIC code is trimmed before the lookup; rows with
/// an unrecognised or absent code keep their unit but carry no category.
pub fn classify_row(row: RosterRow) -> ClassifiedEntry {
    let unit = match row.unit {
        Some(unit) if !unit.is_empty() => unit,
        _ => UNKNOWN_UNIT.to_string(),
    };
    let category = row
        .ric
        .as_deref()
        .and_then(|code| Category::from_ric(code.trim()));
    ClassifiedEntry { unit, category }
}
