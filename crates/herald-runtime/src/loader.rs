//! Handler manifest loader.
//!
//! Scans one directory (non-recursive) for `*.json` handler manifests and
//! parses each file individually. A file that cannot be read or parsed logs
//! a warning naming the file and the reason and is excluded from the result;
//! it never aborts the scan of the remaining files. A missing directory is a
//! valid configuration (optional handler categories) and yields an empty
//! result.
//!
//! There is no caching: re-invoke [`load_dir`] to rescan.

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::{debug, warn};

/// One successfully parsed handler manifest, not yet shape-validated.
#[derive(Debug, Clone)]
pub struct LoadedModule {
    /// The file name within the handler directory.
    pub file: String,
    /// The parsed manifest.
    pub value: Value,
}

/// Loads every parseable `*.json` manifest in `dir`.
///
/// Entries are sorted by file name before loading so that last-write-wins
/// on duplicate command identifiers does not depend on the platform's
/// directory listing order.
pub fn load_dir(dir: &Path) -> Vec<LoadedModule> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            debug!(dir = %dir.display(), "Handler directory not found, skipping");
            return Vec::new();
        }
        Err(err) => {
            warn!(dir = %dir.display(), error = %err, "Failed to read handler directory");
            return Vec::new();
        }
    };

    let mut names: Vec<String> = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().map(|kind| kind.is_file()).unwrap_or(false))
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name.ends_with(".json"))
        .collect();
    names.sort();

    let mut modules = Vec::with_capacity(names.len());
    for name in names {
        let path = dir.join(&name);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(file = %name, error = %err, "Failed to read handler file");
                continue;
            }
        };
        match serde_json::from_str::<Value>(&raw) {
            Ok(value) => modules.push(LoadedModule { file: name, value }),
            Err(err) => warn!(file = %name, error = %err, "Failed to parse handler file"),
        }
    }

    modules
}
