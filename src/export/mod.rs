//! Export module for saving generated artifacts to disk.
//!
//! PNG for texture images and height fields, Wavefront OBJ for models.

mod obj;
mod png;

pub use obj::{export_model_obj, ObjExportError};
pub use png::{export_height_png, export_texture_png, PngExportError, PngExportOptions};
