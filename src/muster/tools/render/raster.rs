use crate::muster::tools::error::{Result, ToolError};

/// Controls rasterisation of the generated SVG.
#[derive(Debug, Clone)]
pub struct RasterOptions {
    /// Uniform scale factor applied to the SVG dimensions.
    pub scale: f32,
    /// Optional background fill behind the rendered content. Accepts
    /// `transparent`, `white`, `black`, or `#RGB`/`#RGBA`/`#RRGGBB`/
    /// `#RRGGBBAA` hex notation; unrecognised values leave the canvas
    /// untouched.
    pub background: Option<String>,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            background: None,
        }
    }
}

/// A PNG-encoded raster together with its pixel dimensions.
#[derive(Debug, Clone)]
pub struct EncodedPng {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Rasterises SVG markup and encodes the result as PNG.
pub fn svg_to_png(svg: &str, options: &RasterOptions) -> Result<EncodedPng> {
    let pixmap = svg_to_pixmap(svg, options)?;
    let bytes = pixmap.encode_png().map_err(|_| ToolError::PngEncode)?;
    Ok(EncodedPng {
        bytes,
        width: pixmap.width(),
        height: pixmap.height(),
    })
}

fn svg_to_pixmap(svg: &str, options: &RasterOptions) -> Result<tiny_skia::Pixmap> {
    let mut opt = usvg::Options::default();
    // Keep output stable-ish across environments while still using system fonts.
    opt.fontdb_mut().load_system_fonts();
    opt.font_family = "Arial".to_string();

    let tree = usvg::Tree::from_str(svg, &opt).map_err(|_| ToolError::SvgParse)?;
    let size = tree.size();
    let scale = options.scale;
    let width = (size.width() * scale).ceil().max(1.0) as u32;
    let height = (size.height() * scale).ceil().max(1.0) as u32;

    let mut pixmap = tiny_skia::Pixmap::new(width, height).ok_or(ToolError::PixmapAlloc)?;
    if let Some(background) = &options.background {
        if let Some(color) = parse_color(background) {
            pixmap.fill(color);
        }
    }
    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    Ok(pixmap)
}

pub(crate) fn parse_color(text: &str) -> Option<tiny_skia::Color> {
    let s = text.trim().to_ascii_lowercase();
    match s.as_str() {
        "transparent" => return Some(tiny_skia::Color::from_rgba8(0, 0, 0, 0)),
        "white" => return Some(tiny_skia::Color::from_rgba8(255, 255, 255, 255)),
        "black" => return Some(tiny_skia::Color::from_rgba8(0, 0, 0, 255)),
        _ => {}
    }

    let hex = s.strip_prefix('#')?;
    fn hex2(b: &[u8]) -> Option<u8> {
        let hi = (*b.first()? as char).to_digit(16)? as u8;
        let lo = (*b.get(1)? as char).to_digit(16)? as u8;
        Some((hi << 4) | lo)
    }
    fn hex1(c: u8) -> Option<u8> {
        let v = (c as char).to_digit(16)? as u8;
        Some((v << 4) | v)
    }

    let bytes = hex.as_bytes();
    match bytes.len() {
        3 => Some(tiny_skia::Color::from_rgba8(
            hex1(bytes[0])?,
            hex1(bytes[1])?,
            hex1(bytes[2])?,
            255,
        )),
        4 => Some(tiny_skia::Color::from_rgba8(
            hex1(bytes[0])?,
            hex1(bytes[1])?,
            hex1(bytes[2])?,
            hex1(bytes[3])?,
        )),
        6 => Some(tiny_skia::Color::from_rgba8(
            hex2(&bytes[0..2])?,
            hex2(&bytes[2..4])?,
            hex2(&bytes[4..6])?,
            255,
        )),
        8 => Some(tiny_skia::Color::from_rgba8(
            hex2(&bytes[0..2])?,
            hex2(&bytes[2..4])?,
            hex2(&bytes[4..6])?,
            hex2(&bytes[6..8])?,
        )),
        _ => None,
    }
}
