//! Configuration loading, parsing, and validation.
//!
//! This module handles all aspects of configuration:
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//!
//! # Example
//!
//! ```
//! use recce::config::{load_config, validate};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join("recce.yml"), "title: test").unwrap();
//!
//! let config = load_config(temp.path(), None).unwrap();
//! validate(&config).unwrap();
//! assert_eq!(config.title, Some("test".to_string()));
//! ```
//!
//! # Configuration File Location
//!
//! Recce reads a single `recce.yml` from the project root. The root is
//! discovered by walking up from the working directory (or taken from
//! `--project`), and `--config PATH` bypasses discovery entirely.

pub mod loader;
pub mod schema;

// Schema re-exports
pub use schema::{validate, RecceConfig};

// Loader re-exports
pub use loader::{
    find_config, find_project_root, load_config, load_config_file, parse_config, CONFIG_FILE,
};

#[cfg(test)]
mod tests {
    #[test]
    fn serde_yaml_parses_basic_yaml() {
        let yaml = "title: test\nwritable_paths: [tmp]";
        let parsed: serde_yaml::Value = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(parsed["title"], "test");
        assert_eq!(parsed["writable_paths"][0], "tmp");
    }

    #[test]
    fn serde_yaml_handles_nested_structures() {
        let yaml = r#"
          database:
            host: localhost
            username: installer
        "#;
        let parsed: serde_yaml::Value = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(parsed["database"]["host"], "localhost");
        assert_eq!(parsed["database"]["username"], "installer");
    }
}
