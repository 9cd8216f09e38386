use crate::errors::{Error, Result};
use crate::export::Hierarchy;
use crate::io;
use std::path::Path;

/// Write the hierarchy as indented UTF-8 JSON, creating parent directories.
pub fn write_hierarchy(hierarchy: &Hierarchy, path: &Path) -> Result<()> {
    let mut json = hierarchy.to_json_pretty()?;
    json.push('\n');
    io::write_file(path, &json)
}

/// Load a previously exported file as an untyped tree. Files with the wrong
/// nesting still load.
pub fn load_hierarchy(path: &Path) -> Result<serde_json::Value> {
    if !io::file_exists(path) {
        return Err(Error::OutputMissing {
            path: path.to_path_buf(),
        });
    }
    let contents = io::read_file(path)?;
    Ok(serde_json::from_str(&contents)?)
}
