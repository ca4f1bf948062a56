//! Site catalog storage
//!
//! The catalog is a JSON array of site objects. It is read once, edited in
//! memory and written back whole.

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::error::{CreditsError, Result};
use crate::types::SiteEntry;

/// Fields every catalog entry must carry as strings.
const REQUIRED_FIELDS: [&str; 2] = ["title", "url"];

/// In-memory site catalog
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    entries: Vec<SiteEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<SiteEntry>) -> Self {
        Self { entries }
    }

    /// Read and validate a catalog file.
    ///
    /// # Errors
    /// - `CreditsError::Io` if the file cannot be read
    /// - `CreditsError::Json` if it is not valid JSON
    /// - `CreditsError::InvalidCatalog` / `MissingField` if the shape is wrong
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| CreditsError::io(path, e))?;
        let catalog = Self::from_json_str(&text)?;
        debug!(path = %path.display(), entries = catalog.len(), "loaded catalog");
        Ok(catalog)
    }

    /// Parse and validate catalog JSON.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        let Value::Array(items) = value else {
            return Err(CreditsError::InvalidCatalog(
                "top-level value must be an array".to_string(),
            ));
        };

        let mut entries = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            let Value::Object(fields) = item else {
                return Err(CreditsError::InvalidCatalog(format!(
                    "entry {index} is not an object"
                )));
            };
            for field in REQUIRED_FIELDS {
                if !fields.get(field).is_some_and(Value::is_string) {
                    return Err(CreditsError::MissingField { index, field });
                }
            }
            entries.push(SiteEntry::from_map(fields));
        }

        Ok(Self { entries })
    }

    /// Pretty-printed JSON with two-space indentation and unescaped UTF-8.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.entries)?)
    }

    /// Write the whole catalog to `path`, replacing its contents.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = self.to_json_string()?;
        fs::write(path, json).map_err(|e| CreditsError::io(path, e))?;
        debug!(path = %path.display(), entries = self.len(), "saved catalog");
        Ok(())
    }

    pub fn entries(&self) -> &[SiteEntry] {
        &self.entries
    }

    pub fn entries_mut(&mut self) -> &mut [SiteEntry] {
        &mut self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
