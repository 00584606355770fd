pub mod pdf;
pub mod raster;
pub mod svg;
