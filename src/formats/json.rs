use std::fs;
use std::path::Path;

use serde_json::{Map, Value};
use tracing::debug;

use super::MetadataFormat;
use crate::error::MetadataError;
use crate::traits::{Metadata, MetadataSink, MetadataSource};

/// A flat JSON object of metadata fields.
///
/// Non-string values load as their JSON text and are written back as strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormat;

impl MetadataSource for JsonFormat {
    fn load(&self, path: &Path) -> Result<Metadata, MetadataError> {
        let data = fs::read_to_string(path).map_err(|e| MetadataError::read(path, e))?;
        let value: Value = serde_json::from_str(&data).map_err(|e| MetadataError::read(path, e))?;
        let Value::Object(map) = value else {
            return Err(MetadataError::Parse {
                path: path.to_path_buf(),
                message: "expected a JSON object at the top level".to_string(),
            });
        };
        let metadata: Metadata = map
            .into_iter()
            .map(|(key, value)| match value {
                Value::String(s) => (key, s),
                other => (key, other.to_string()),
            })
            .collect();
        debug!(target: "formats", path = %path.display(), fields = metadata.len(), "json loaded");
        Ok(metadata)
    }
}

impl MetadataSink for JsonFormat {
    fn persist(&self, path: &Path, metadata: &Metadata) -> Result<(), MetadataError> {
        let map: Map<String, Value> = metadata
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        let mut data =
            serde_json::to_string_pretty(&Value::Object(map)).map_err(|e| MetadataError::write(path, e))?;
        data.push('\n');
        fs::write(path, data).map_err(|e| MetadataError::write(path, e))?;
        debug!(target: "formats", path = %path.display(), fields = metadata.len(), "json written");
        Ok(())
    }
}

impl MetadataFormat for JsonFormat {
    fn name(&self) -> &'static str {
        "json"
    }
}
