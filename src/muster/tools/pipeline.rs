use std::fs;
use std::path::Path;

use tracing::{info, instrument, warn};

use crate::muster::tools::aggregate;
use crate::muster::tools::classify;
use crate::muster::tools::error::Result;
use crate::muster::tools::io::excel_read;
use crate::muster::tools::layout::{self, Diagram, RootSelection};
use crate::muster::tools::model::UnitSummary;
use crate::muster::tools::render::pdf;
use crate::muster::tools::render::raster::{self, RasterOptions};
use crate::muster::tools::render::svg;

/// Default file names for exported charts.
pub const SVG_FILENAME: &str = "org_chart.svg";
pub const PNG_FILENAME: &str = "org_chart.png";
pub const PDF_FILENAME: &str = "org_chart.pdf";

/// Completion result of an export request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The artefact was written to the requested path.
    Written,
    /// The roster produced no units, so no file was created.
    SkippedEmpty,
}

/// Reads a roster workbook and aggregates it into per-unit counts.
#[instrument(level = "info", skip_all, fields(input = %input.display()))]
pub fn workbook_to_summary(input: &Path) -> Result<UnitSummary> {
    let roster = excel_read::read_roster(input)?;
    info!(row_count = roster.len(), "read roster rows from workbook");
    let summary = aggregate::summarize(roster.into_iter().map(classify::classify_row));
    info!(unit_count = summary.len(), "aggregated personnel counts");
    Ok(summary)
}

/// Reads a roster workbook and lays it out as a chart diagram.
#[instrument(level = "info", skip_all, fields(input = %input.display()))]
pub fn workbook_to_diagram(input: &Path, root: &RootSelection) -> Result<Diagram> {
    let summary = workbook_to_summary(input)?;
    layout::build_diagram(&summary, root)
}

/// Renders a roster workbook into an SVG chart file.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %input.display(), output = %output.display())
)]
pub fn workbook_to_svg(input: &Path, output: &Path, root: &RootSelection) -> Result<ExportOutcome> {
    let Some(markup) = chart_markup(input, root)? else {
        return Ok(ExportOutcome::SkippedEmpty);
    };
    fs::write(output, markup)?;
    info!("SVG chart written");
    Ok(ExportOutcome::Written)
}

/// Renders a roster workbook into a PNG chart file.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %input.display(), output = %output.display())
)]
pub fn workbook_to_png(
    input: &Path,
    output: &Path,
    root: &RootSelection,
    options: &RasterOptions,
) -> Result<ExportOutcome> {
    let Some(markup) = chart_markup(input, root)? else {
        return Ok(ExportOutcome::SkippedEmpty);
    };
    let png = raster::svg_to_png(&markup, options)?;
    fs::write(output, &png.bytes)?;
    info!(width = png.width, height = png.height, "PNG chart written");
    Ok(ExportOutcome::Written)
}

/// Renders a roster workbook into a single-page landscape PDF. The page
/// embeds the same raster the PNG export produces, scaled to the page width.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %input.display(), output = %output.display())
)]
pub fn workbook_to_pdf(
    input: &Path,
    output: &Path,
    root: &RootSelection,
    options: &RasterOptions,
) -> Result<ExportOutcome> {
    let Some(markup) = chart_markup(input, root)? else {
        return Ok(ExportOutcome::SkippedEmpty);
    };
    let png = raster::svg_to_png(&markup, options)?;
    let document = pdf::png_to_pdf(&png)?;
    fs::write(output, document)?;
    info!("PDF chart written");
    Ok(ExportOutcome::Written)
}

/// Lays out the chart and renders its markup, or `None` when the roster
/// yields no units at all.
#[instrument(level = "debug", skip_all)]
fn chart_markup(input: &Path, root: &RootSelection) -> Result<Option<String>> {
    let diagram = workbook_to_diagram(input, root)?;
    if diagram.is_empty() {
        warn!("roster produced no units, skipping export");
        return Ok(None);
    }
    info!(
        node_count = diagram.nodes.len(),
        edge_count = diagram.edges.len(),
        "chart laid out"
    );
    Ok(Some(svg::render_svg(&diagram)))
}
