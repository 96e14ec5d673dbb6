use crate::error::KineticError;
use kinetik_schemas::file_formats::NetworkFile;
use std::fs;
use std::path::Path;

/// Reads a network file, choosing JSON or YAML by extension (YAML otherwise).
pub fn load_network(path: &Path) -> Result<NetworkFile, KineticError> {
    let display = path.display().to_string();
    let content = fs::read_to_string(path).map_err(|e| KineticError::FileIO(display.clone(), e))?;

    let is_json = path
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        serde_json::from_str(&content).map_err(|e| KineticError::Json(display, e))
    } else {
        serde_yaml::from_str(&content).map_err(|e| KineticError::YamlParsing(display, e))
    }
}
