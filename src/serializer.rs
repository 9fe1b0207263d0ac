//! Serialization of documentation documents to JSON or YAML.
//!
//! Any of the documents produced by [`crate::views`] can be written out with these helpers.

use anyhow::{Context, Result};
use log::debug;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Serializes a document to YAML.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn serialize_yaml<T: Serialize>(doc: &T) -> Result<String> {
    debug!("Serializing document to YAML");
    serde_yaml::to_string(doc).context("Failed to serialize document to YAML")
}

/// Serializes a document to pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn serialize_json<T: Serialize>(doc: &T) -> Result<String> {
    debug!("Serializing document to JSON");
    serde_json::to_string_pretty(doc).context("Failed to serialize document to JSON")
}

/// Writes string content to a file, creating parent directories as needed and replacing
/// any existing file.
pub fn write_to_file(content: &str, path: &Path) -> Result<()> {
    debug!("Writing content to file: {}", path.display());

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    fs::write(path, content)
        .with_context(|| format!("Failed to write to file: {}", path.display()))?;

    debug!("Successfully wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lister::ResourceEntry;
    use crate::views::ResourceListing;
    use tempfile::TempDir;

    fn create_test_listing() -> ResourceListing {
        ResourceListing {
            api_version: "1.0".to_string(),
            swagger_version: "1.2".to_string(),
            base_path: "http://localhost/api-docs".to_string(),
            apis: vec![ResourceEntry::from_prefix("users")],
        }
    }

    #[test]
    fn test_serialize_json_uses_swagger_field_names() {
        let json = serialize_json(&create_test_listing()).unwrap();

        assert!(json.contains("\"apiVersion\""));
        assert!(json.contains("\"swaggerVersion\": \"1.2\""));
        assert!(json.contains("\"basePath\""));
        assert!(json.contains('\n'), "JSON should be pretty-printed");

        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["apis"][0]["name"], "users");
    }

    #[test]
    fn test_serialize_yaml() {
        let yaml = serialize_yaml(&create_test_listing()).unwrap();

        assert!(yaml.contains("swaggerVersion:"));
        assert!(yaml.contains("/users"));
    }

    #[test]
    fn test_write_to_file_creates_directories() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("subdir").join("nested").join("listing.json");

        write_to_file("{}", &file_path).unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "{}");
    }

    #[test]
    fn test_write_to_file_overwrites_existing() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("listing.yaml");

        write_to_file("initial content", &file_path).unwrap();
        write_to_file("new content", &file_path).unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "new content");
    }
}
