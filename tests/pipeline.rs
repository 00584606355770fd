use std::fs;
use std::path::Path;

use muster_tools::ToolError;
use muster_tools::layout::RootSelection;
use muster_tools::pipeline::{self, ExportOutcome};
use muster_tools::render::raster::RasterOptions;
use rust_xlsxwriter::Workbook;
use tempfile::tempdir;

const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";
const PDF_SIGNATURE: &[u8] = b"%PDF-";

fn write_roster(path: &Path, rows: &[(&str, &str)]) {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Roster").expect("sheet named");
    worksheet.write_string(0, 0, "Unit").expect("header written");
    worksheet.write_string(0, 1, "RIC").expect("header written");
    for (index, (unit, ric)) in rows.iter().enumerate() {
        let row = (index + 1) as u32;
        if !unit.is_empty() {
            worksheet.write_string(row, 0, *unit).expect("unit written");
        }
        if !ric.is_empty() {
            worksheet.write_string(row, 1, *ric).expect("ric written");
        }
    }
    workbook.save(path).expect("workbook saved");
}

fn sample_rows() -> Vec<(&'static str, &'static str)> {
    vec![
        ("Unit A", "0004"),
        ("Unit B", "0104"),
        ("Unit A", "0104"),
        ("", "0160"),
        ("Unit C", "9999"),
    ]
}

fn png_dimensions(bytes: &[u8]) -> (u32, u32) {
    let width = u32::from_be_bytes(bytes[16..20].try_into().expect("width bytes"));
    let height = u32::from_be_bytes(bytes[20..24].try_into().expect("height bytes"));
    (width, height)
}

#[test]
fn summary_reflects_roster_rows() {
    let temp_dir = tempdir().expect("temporary directory");
    let input = temp_dir.path().join("roster.xlsx");
    write_roster(&input, &sample_rows());

    let summary = pipeline::workbook_to_summary(&input).expect("summary built");

    assert_eq!(summary.len(), 3);
    let units: Vec<&str> = summary.iter().map(|(unit, _)| unit).collect();
    assert_eq!(units, vec!["Unit A", "Unit B", "Unknown Unit"]);

    let unit_a = summary.get("Unit A").expect("Unit A counted");
    assert_eq!((unit_a.officer, unit_a.enlisted, unit_a.civilian), (1, 1, 0));
    let unknown = summary.get("Unknown Unit").expect("fallback unit counted");
    assert_eq!(unknown.civilian, 1);
    assert!(summary.get("Unit C").is_none());
}

#[test]
fn numeric_ric_cells_do_not_match() {
    let temp_dir = tempdir().expect("temporary directory");
    let input = temp_dir.path().join("roster.xlsx");

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.write_string(0, 0, "Unit").expect("header written");
    worksheet.write_string(0, 1, "RIC").expect("header written");
    worksheet.write_string(1, 0, "Unit D").expect("unit written");
    worksheet.write_number(1, 1, 4.0).expect("ric written");
    workbook.save(&input).expect("workbook saved");

    let summary = pipeline::workbook_to_summary(&input).expect("summary built");
    assert!(summary.is_empty());
}

#[test]
fn svg_export_writes_chart_markup() {
    let temp_dir = tempdir().expect("temporary directory");
    let input = temp_dir.path().join("roster.xlsx");
    let output = temp_dir.path().join(pipeline::SVG_FILENAME);
    write_roster(&input, &sample_rows());

    let outcome = pipeline::workbook_to_svg(&input, &output, &RootSelection::FirstSeen)
        .expect("SVG exported");
    assert_eq!(outcome, ExportOutcome::Written);

    let markup = fs::read_to_string(&output).expect("SVG file read");
    assert!(markup.starts_with("<svg"));
    assert!(markup.contains("Unit A"));
    assert!(markup.contains("1/1/0/2"));
    assert!(markup.contains("Unknown Unit"));
}

#[test]
fn png_export_writes_png_signature() {
    let temp_dir = tempdir().expect("temporary directory");
    let input = temp_dir.path().join("roster.xlsx");
    let output = temp_dir.path().join(pipeline::PNG_FILENAME);
    write_roster(&input, &sample_rows());

    let outcome = pipeline::workbook_to_png(
        &input,
        &output,
        &RootSelection::FirstSeen,
        &RasterOptions::default(),
    )
    .expect("PNG exported");
    assert_eq!(outcome, ExportOutcome::Written);

    let bytes = fs::read(&output).expect("PNG file read");
    assert!(bytes.starts_with(PNG_SIGNATURE));
    assert!(bytes.len() > PNG_SIGNATURE.len());
}

#[test]
fn raster_scale_multiplies_pixel_dimensions() {
    let temp_dir = tempdir().expect("temporary directory");
    let input = temp_dir.path().join("roster.xlsx");
    write_roster(&input, &sample_rows());

    let base_path = temp_dir.path().join("base.png");
    pipeline::workbook_to_png(
        &input,
        &base_path,
        &RootSelection::FirstSeen,
        &RasterOptions::default(),
    )
    .expect("base PNG exported");
    let base = png_dimensions(&fs::read(&base_path).expect("base PNG read"));

    let scaled_path = temp_dir.path().join("scaled.png");
    let options = RasterOptions {
        scale: 2.0,
        background: Some("white".to_string()),
    };
    pipeline::workbook_to_png(&input, &scaled_path, &RootSelection::FirstSeen, &options)
        .expect("scaled PNG exported");
    let scaled = png_dimensions(&fs::read(&scaled_path).expect("scaled PNG read"));

    assert_eq!(scaled.0, base.0 * 2);
    assert_eq!(scaled.1, base.1 * 2);
}

#[test]
fn pdf_export_writes_pdf_header() {
    let temp_dir = tempdir().expect("temporary directory");
    let input = temp_dir.path().join("roster.xlsx");
    let output = temp_dir.path().join(pipeline::PDF_FILENAME);
    write_roster(&input, &sample_rows());

    let outcome = pipeline::workbook_to_pdf(
        &input,
        &output,
        &RootSelection::FirstSeen,
        &RasterOptions::default(),
    )
    .expect("PDF exported");
    assert_eq!(outcome, ExportOutcome::Written);

    let bytes = fs::read(&output).expect("PDF file read");
    assert!(bytes.starts_with(PDF_SIGNATURE));
}

#[test]
fn empty_roster_skips_export() {
    let temp_dir = tempdir().expect("temporary directory");
    let input = temp_dir.path().join("roster.xlsx");
    write_roster(&input, &[]);

    let summary = pipeline::workbook_to_summary(&input).expect("summary built");
    assert!(summary.is_empty());

    let output = temp_dir.path().join(pipeline::PNG_FILENAME);
    let outcome = pipeline::workbook_to_png(
        &input,
        &output,
        &RootSelection::FirstSeen,
        &RasterOptions::default(),
    )
    .expect("export skipped");
    assert_eq!(outcome, ExportOutcome::SkippedEmpty);
    assert!(!output.exists());
}

#[test]
fn unmatched_rows_alone_skip_export() {
    let temp_dir = tempdir().expect("temporary directory");
    let input = temp_dir.path().join("roster.xlsx");
    write_roster(&input, &[("Unit D", "1234"), ("Unit E", "")]);

    let output = temp_dir.path().join(pipeline::SVG_FILENAME);
    let outcome = pipeline::workbook_to_svg(&input, &output, &RootSelection::FirstSeen)
        .expect("export skipped");
    assert_eq!(outcome, ExportOutcome::SkippedEmpty);
    assert!(!output.exists());
}

#[test]
fn named_root_redirects_edges() {
    let temp_dir = tempdir().expect("temporary directory");
    let input = temp_dir.path().join("roster.xlsx");
    write_roster(&input, &sample_rows());

    let root = RootSelection::Named("Unit B".to_string());
    let diagram = pipeline::workbook_to_diagram(&input, &root).expect("diagram built");

    assert_eq!(diagram.edges.len(), 2);
    for edge in &diagram.edges {
        assert_eq!(edge.source, "Unit B");
    }
}

#[test]
fn named_root_must_exist() {
    let temp_dir = tempdir().expect("temporary directory");
    let input = temp_dir.path().join("roster.xlsx");
    write_roster(&input, &sample_rows());

    let root = RootSelection::Named("Unit Z".to_string());
    let output = temp_dir.path().join(pipeline::PNG_FILENAME);
    let error =
        pipeline::workbook_to_png(&input, &output, &root, &RasterOptions::default())
            .expect_err("unknown root rejected");

    assert!(matches!(error, ToolError::UnknownRoot { unit } if unit == "Unit Z"));
    assert!(!output.exists());
}

#[test]
fn missing_workbook_is_an_error() {
    let temp_dir = tempdir().expect("temporary directory");
    let input = temp_dir.path().join("missing.xlsx");

    assert!(pipeline::workbook_to_summary(&input).is_err());
}
