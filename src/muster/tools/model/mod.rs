use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Personnel category derived from the RIC code of a roster row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Commissioned officers, RIC code `0004`.
    Officer,
    /// Enlisted members, RIC code `0104`.
    Enlisted,
    /// Civilian staff, RIC code `0160`.
    Civilian,
}

impl Category {
    /// Maps a trimmed RIC code onto its category. Codes outside the fixed
    /// table yield no category; the lookup is an exact string match, so
    /// numeric renderings such as `4` do not qualify.
    pub fn from_ric(code: &str) -> Option<Self> {
        match code {
            "0004" => Some(Category::Officer),
            "0104" => Some(Category::Enlisted),
            "0160" => Some(Category::Civilian),
            _ => None,
        }
    }
}

/// One roster row as read from the workbook. Cells that are empty or
/// missing from the sheet surface as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterRow {
    /// Raw content of the `Unit` cell.
    pub unit: Option<String>,
    /// Raw content of the `RIC` cell.
    pub ric: Option<String>,
}

/// A roster row after classification: the unit it counts against plus the
/// category its RIC resolved to, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedEntry {
    /// Unit name, never empty.
    pub unit: String,
    /// Category of the row, or `None` when the RIC was unrecognised.
    pub category: Option<Category>,
}

/// Per-unit personnel counts split by category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UnitCounts {
    /// Number of officer rows.
    pub officer: u32,
    /// Number of enlisted rows.
    pub enlisted: u32,
    /// Number of civilian rows.
    pub civilian: u32,
}

impl UnitCounts {
    /// Sum of all three category counts.
    pub fn total(&self) -> u32 {
        self.officer + self.enlisted + self.civilian
    }

    /// Bumps the counter matching the given category.
    pub fn increment(&mut self, category: Category) {
        match category {
            Category::Officer => self.officer += 1,
            Category::Enlisted => self.enlisted += 1,
            Category::Civilian => self.civilian += 1,
        }
    }
}

/// Aggregated counts for every unit seen in the roster. Units keep the
/// order in which they first contributed a counted row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitSummary {
    units: IndexMap<String, UnitCounts>,
}

impl UnitSummary {
    /// Records one categorised row against a unit, creating the unit entry
    /// on first sight.
    pub fn record(&mut self, unit: impl Into<String>, category: Category) {
        self.units.entry(unit.into()).or_default().increment(category);
    }

    /// Whether the summary holds no units at all.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Number of distinct units.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Counts recorded for the given unit, if present.
    pub fn get(&self, unit: &str) -> Option<&UnitCounts> {
        self.units.get(unit)
    }

    /// Unit that contributed the earliest counted row.
    pub fn first_unit(&self) -> Option<&str> {
        self.units.keys().next().map(String::as_str)
    }

    /// Iterates units with their counts in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &UnitCounts)> {
        self.units.iter().map(|(unit, counts)| (unit.as_str(), counts))
    }

    /// Total number of counted rows across all units.
    pub fn total(&self) -> u32 {
        self.units.values().map(UnitCounts::total).sum()
    }
}
