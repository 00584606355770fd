use crate::muster::tools::model::{ClassifiedEntry, UnitSummary};

/// Folds classified entries into per-unit counts.
///
/// Units enter the summary in the order their first categorised row appears.
/// Entries without a category are dropped entirely, so a unit seen only
/// through unrecognised codes never materialises.
pub fn summarize<I>(entries: I) -> UnitSummary
where
    I: IntoIterator<Item = ClassifiedEntry>,
{
    let mut summary = UnitSummary::default();
    for entry in entries {
        if let Some(category) = entry.category {
            summary.record(entry.unit, category);
        }
    }
    summary
}
