//! Reading Composition documents from disk.
//!
//! Accepts the shapes `kubectl get compositions -o yaml|json` produces: a
//! single Composition, a multi-document YAML stream, or a `List` wrapper
//! with `items`. JSON goes through the YAML decoder.

use crate::errors::LoadError;
use crate::model::Composition;
use serde::Deserialize;
use serde_yaml::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const COMPOSITION_KIND: &str = "Composition";

const EXTENSIONS: &[&str] = &["yaml", "yml", "json"];

/// Load compositions from a file, or from every YAML/JSON file directly
/// inside a directory (sorted by file name).
pub fn load_path(path: &Path) -> Result<Vec<Composition>, LoadError> {
    let files = if path.is_dir() {
        let files = list_documents(path)?;
        if files.is_empty() {
            return Err(LoadError::Empty {
                path: path.to_path_buf(),
            });
        }
        files
    } else {
        vec![path.to_path_buf()]
    };

    let mut out = Vec::new();
    for file in files {
        let text = std::fs::read_to_string(&file).map_err(|source| LoadError::Read {
            path: file.clone(),
            source,
        })?;
        let comps = decode_stream(&text, &file)?;
        debug!(file = %file.display(), compositions = comps.len(), "loaded documents");
        out.extend(comps);
    }
    Ok(out)
}

/// Load compositions from several paths, keeping argument order.
pub fn load_paths<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<Composition>, LoadError> {
    let mut out = Vec::new();
    for p in paths {
        out.extend(load_path(p.as_ref())?);
    }
    Ok(out)
}

/// Decode compositions from an in-memory document stream.
pub fn load_str(text: &str) -> Result<Vec<Composition>, LoadError> {
    decode_stream(text, Path::new("<input>"))
}

fn list_documents(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let read_err = |source| LoadError::Read {
        path: dir.to_path_buf(),
        source,
    };
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_err)? {
        let path = entry.map_err(read_err)?.path();
        let wanted = path.is_file()
            && path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| EXTENSIONS.contains(&e));
        if wanted {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn decode_stream(text: &str, path: &Path) -> Result<Vec<Composition>, LoadError> {
    let decode_err = |document, source| LoadError::Decode {
        path: path.to_path_buf(),
        document,
        source,
    };

    let mut out = Vec::new();
    for (document, de) in serde_yaml::Deserializer::from_str(text).enumerate() {
        let value = Value::deserialize(de).map_err(|e| decode_err(document, e))?;
        if value.is_null() {
            continue;
        }
        for item in flatten_list(value) {
            match kind_of(&item) {
                Some(kind) if kind != COMPOSITION_KIND => {
                    debug!(document, kind = %kind, "skipping non-composition document");
                }
                _ => {
                    let comp: Composition =
                        serde_yaml::from_value(item).map_err(|e| decode_err(document, e))?;
                    out.push(comp);
                }
            }
        }
    }
    Ok(out)
}

fn kind_of(value: &Value) -> Option<String> {
    value.get("kind")?.as_str().map(str::to_string)
}

/// `List`, `CompositionList` and friends unwrap to their items.
fn flatten_list(value: Value) -> Vec<Value> {
    let is_list = kind_of(&value).is_some_and(|k| k.ends_with("List"));
    if !is_list {
        return vec![value];
    }
    match value {
        Value::Mapping(mut map) => match map.remove("items") {
            Some(Value::Sequence(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}
