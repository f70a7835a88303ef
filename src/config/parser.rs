use super::Manifest;
use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub struct Parser;

impl Parser {
    pub fn new() -> Self {
        Self
    }

    /// Find the manifest starting from the current directory.
    pub fn find_manifest_file(&self) -> Result<PathBuf> {
        let current_dir = std::env::current_dir()?;
        Self::find_manifest_in_dir(&current_dir)
    }

    pub fn find_manifest_in_dir(dir: &Path) -> Result<PathBuf> {
        let manifest_path = dir.join("convoy.yaml");
        if manifest_path.exists() {
            return Ok(manifest_path);
        }

        // Try alternate name
        let alt_path = dir.join("convoy.yml");
        if alt_path.exists() {
            return Ok(alt_path);
        }

        // Try parent directory
        if let Some(parent) = dir.parent() {
            return Self::find_manifest_in_dir(parent);
        }

        Err(Error::Config(
            "Could not find convoy.yaml in current directory or any parent".to_string(),
        ))
    }

    /// Load a manifest from a file path.
    pub fn load_manifest<P: AsRef<Path>>(&self, path: P) -> Result<Manifest> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            Error::Config(format!(
                "Failed to read manifest '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;

        self.parse_manifest(&content)
    }

    /// Parse a manifest from a YAML string.
    pub fn parse_manifest(&self, content: &str) -> Result<Manifest> {
        let manifest: Manifest = serde_yaml::from_str(content)
            .map_err(|e| Error::Parse(format!("Failed to parse YAML manifest: {}", e)))?;

        Ok(manifest)
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_manifest() {
        let yaml = r#"
name: blog
remote: local

services:
  web:
    image: images:debian/12
    depends_on:
      - db
    networks: [frontend]

  db:
    image: images:debian/12

networks:
  frontend: {}
"#;

        let parser = Parser::new();
        let manifest = parser.parse_manifest(yaml).unwrap();

        assert_eq!(manifest.services.len(), 2);
        assert_eq!(manifest.name, Some("blog".to_string()));
        assert!(manifest.networks.contains_key("frontend"));
        assert_eq!(
            manifest.services["web"].dependency_names(),
            vec!["db".to_string()]
        );
    }

    #[test]
    fn test_find_manifest_walks_parents() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join("convoy.yaml"), "name: x\n").unwrap();

        let found = Parser::find_manifest_in_dir(&nested).unwrap();
        assert_eq!(found, dir.path().join("convoy.yaml"));
    }

    #[test]
    fn test_parse_error_is_reported() {
        let parser = Parser::new();
        let result = parser.parse_manifest("services: [not, a, map]");
        assert!(matches!(result, Err(Error::Parse(_))));
    }
}
