use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::muster::tools::error::{Result, ToolError};
use crate::muster::tools::render::raster::EncodedPng;

/// Landscape A4 page size in PostScript points.
pub const PAGE_WIDTH_PT: f64 = 841.89;
pub const PAGE_HEIGHT_PT: f64 = 595.28;

/// Wraps a PNG-encoded chart into a single landscape A4 page and converts
/// it to PDF. The image spans the full page width, anchored at the top-left
/// corner, with its height following the raster's aspect ratio.
pub fn png_to_pdf(png: &EncodedPng) -> Result<Vec<u8>> {
    let page = page_svg(png);

    let mut opt = svg2pdf::usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();
    opt.font_family = "Arial".to_string();

    let tree = svg2pdf::usvg::Tree::from_str(&page, &opt).map_err(|_| ToolError::SvgParse)?;
    svg2pdf::to_pdf(
        &tree,
        svg2pdf::ConversionOptions::default(),
        svg2pdf::PageOptions::default(),
    )
    .map_err(|_| ToolError::PdfConvert)
}

fn page_svg(png: &EncodedPng) -> String {
    let image_width = PAGE_WIDTH_PT;
    let image_height = PAGE_WIDTH_PT * f64::from(png.height) / f64::from(png.width);
    let data = STANDARD.encode(&png.bytes);
    format!(
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" "#,
            r#"width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#,
            r#"<image x="0" y="0" width="{image_width}" height="{image_height}" "#,
            r#"href="data:image/png;base64,{data}"/>"#,
            "</svg>"
        ),
        width = PAGE_WIDTH_PT,
        height = PAGE_HEIGHT_PT,
        image_width = image_width,
        image_height = image_height,
        data = data,
    )
}
