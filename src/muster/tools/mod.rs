pub mod aggregate;
pub mod classify;
pub mod error;
pub mod io;
pub mod layout;
pub mod model;
pub mod pipeline;
pub mod render;

pub use error::{Result, ToolError};
