//! Records and option bags read from disk
//!
//! A record file is either a JSON array (an array-like record, always needing
//! an explicit `path`) or an object:
//!
//! ```json
//! { "type": "User", "id": 7, "fields": { "name": "Lucia" }, "methods": { "display_name": "Lucia M." } }
//! ```

use std::path::Path;

use indexmap::IndexMap;
use inplace_fields::{FieldReadable, FieldValue, MapRecord, Options};
use serde::Deserialize;

use crate::error::{CliError, Result};

/// Description of a domain object
#[derive(Debug, Clone, Deserialize)]
pub struct RecordDescription {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub id: Option<FieldValue>,
    /// A value object with no identity at all
    #[serde(default)]
    pub anonymous: bool,
    #[serde(default)]
    pub fields: IndexMap<String, FieldValue>,
    #[serde(default)]
    pub methods: IndexMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RecordFile {
    Array(Vec<FieldValue>),
    Object(RecordDescription),
}

/// A record ready to hand to the renderer
#[derive(Debug, Clone)]
pub enum LoadedRecord {
    Array(Vec<FieldValue>),
    Map(MapRecord),
}

impl LoadedRecord {
    pub fn as_readable(&self) -> &dyn FieldReadable {
        match self {
            LoadedRecord::Array(values) => values,
            LoadedRecord::Map(record) => record,
        }
    }
}

impl From<RecordFile> for LoadedRecord {
    fn from(file: RecordFile) -> Self {
        match file {
            RecordFile::Array(values) => LoadedRecord::Array(values),
            RecordFile::Object(desc) => {
                let mut record = if desc.anonymous {
                    MapRecord::anonymous(desc.type_name)
                } else {
                    MapRecord::new(desc.type_name)
                };
                match desc.id {
                    Some(id) if !id.is_blank() => record = record.with_id(id),
                    _ => {}
                }
                for (name, value) in desc.fields {
                    record.set(name, value);
                }
                for (name, result) in desc.methods {
                    record = record.method(name, result);
                }
                LoadedRecord::Map(record)
            }
        }
    }
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a record description from a JSON file.
pub fn load_record(path: &Path) -> Result<LoadedRecord> {
    let text = read(path)?;
    let file: RecordFile = serde_json::from_str(&text).map_err(|source| CliError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(file.into())
}

/// Read an options bag; `.json` files parse as JSON, anything else as YAML.
pub fn load_options(path: &Path) -> Result<Options> {
    let text = read(path)?;
    if path.extension().and_then(|e| e.to_str()) == Some("json") {
        serde_json::from_str(&text).map_err(|source| CliError::Json {
            path: path.to_path_buf(),
            source,
        })
    } else {
        serde_yaml_ng::from_str(&text).map_err(|source| CliError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }
}
