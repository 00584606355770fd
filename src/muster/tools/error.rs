use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ToolError>;

/// Error type covering the different failure cases that can occur when the
/// tool ingests a roster, lays out the chart, or emits artefacts.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when JSON serialization fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors bubbled up from the Excel reader implementation.
    #[error("Excel read error: {0}")]
    ExcelRead(#[from] calamine::XlsxError),

    /// Raised when a workbook does not follow the expected conventions.
    #[error("invalid workbook structure: {0}")]
    InvalidWorkbook(String),

    /// Raised when the user provides a path that does not exist.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when the requested root unit is absent from the summary.
    #[error("root unit '{unit}' does not appear in the roster")]
    UnknownRoot { unit: String },

    /// Raised when generated SVG markup fails to parse for rasterisation.
    #[error("failed to parse SVG for rendering")]
    SvgParse,

    /// Raised when the raster target buffer cannot be allocated.
    #[error("failed to allocate pixmap for raster rendering")]
    PixmapAlloc,

    /// Raised when PNG encoding of the rendered pixmap fails.
    #[error("failed to encode PNG")]
    PngEncode,

    /// Raised when PDF conversion of the rendered page fails.
    #[error("failed to convert page to PDF")]
    PdfConvert,

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
