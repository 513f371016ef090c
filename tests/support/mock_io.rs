use std::cell::RefCell;
use std::path::{Path, PathBuf};

use metaedit::{Metadata, MetadataError, MetadataSink, MetadataSource};

/// In-memory metadata file that records every write.
#[derive(Debug, Default)]
pub struct MockMetadata {
    initial: Metadata,
    writes: RefCell<Vec<(PathBuf, Metadata)>>,
    fail_writes: bool,
}

impl MockMetadata {
    pub fn new(pairs: &[(&str, &str)]) -> Self {
        Self {
            initial: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            ..Self::default()
        }
    }

    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn writes(&self) -> Vec<(PathBuf, Metadata)> {
        self.writes.borrow().clone()
    }
}

impl MetadataSource for MockMetadata {
    fn load(&self, _path: &Path) -> Result<Metadata, MetadataError> {
        Ok(self.initial.clone())
    }
}

impl MetadataSink for MockMetadata {
    fn persist(&self, path: &Path, metadata: &Metadata) -> Result<(), MetadataError> {
        if self.fail_writes {
            return Err(MetadataError::write(path, "disk full"));
        }
        self.writes
            .borrow_mut()
            .push((path.to_path_buf(), metadata.clone()));
        Ok(())
    }
}

/// A source whose file cannot be parsed.
pub struct BrokenSource;

impl MetadataSource for BrokenSource {
    fn load(&self, path: &Path) -> Result<Metadata, MetadataError> {
        Err(MetadataError::read(path, "corrupt header"))
    }
}
