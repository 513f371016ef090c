//! Concrete metadata sources and sinks, chosen by file extension.

use std::path::Path;

use crate::error::MetadataError;
use crate::traits::{MetadataSink, MetadataSource};

pub mod json;
pub mod pdf;
pub mod png;

pub use self::json::JsonFormat;
pub use self::pdf::PdfFormat;
pub use self::png::PngFormat;

/// A file format that can both read and rewrite its metadata.
pub trait MetadataFormat: MetadataSource + MetadataSink {
    fn name(&self) -> &'static str;
}

/// Pick the format for `path` from its extension (case-insensitive).
pub fn for_path(path: &Path) -> Result<Box<dyn MetadataFormat>, MetadataError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("pdf") => Ok(Box::new(PdfFormat)),
        Some("json") => Ok(Box::new(JsonFormat)),
        Some("png") => Ok(Box::new(PngFormat)),
        _ => Err(MetadataError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}
