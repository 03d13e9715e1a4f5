//! Project configuration (`headerlint.toml`).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::error::{HeaderLintError, Result};
use crate::identity::RepositoryIdentity;

/// Default config file name, looked up in the project root.
pub const CONFIG_FILE: &str = "headerlint.toml";

/// Optional per-project settings. Every key may be omitted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields, default)]
pub struct HeaderLintConfig {
    /// `owner/name`; overrides `composer.json` and the git remote.
    pub repository: Option<String>,

    /// Holder named in the regenerated licence files. Defaults to the
    /// repository owner.
    pub copyright_holder: Option<String>,

    /// File extensions checked when walking directories.
    pub extensions: Vec<String>,

    pub regenerate_license_files: bool,
}

impl Default for HeaderLintConfig {
    fn default() -> Self {
        Self {
            repository: None,
            copyright_holder: None,
            extensions: vec!["php".to_string()],
            regenerate_license_files: true,
        }
    }
}

impl HeaderLintConfig {
    pub fn parse(raw: &str, path: &Path) -> Result<Self> {
        toml::from_str(raw).map_err(|e| HeaderLintError::Config {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Load an explicit config file. A missing file is an error here.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| HeaderLintError::Config {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::parse(&raw, path)
    }

    /// Load `headerlint.toml` from `root`, falling back to defaults when the
    /// file does not exist.
    pub fn load_from_root(root: &Path) -> Result<Self> {
        let path = Self::default_path(root);
        if !path.is_file() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load(&path)
    }

    pub fn default_path(root: &Path) -> PathBuf {
        root.join(CONFIG_FILE)
    }

    pub fn copyright_holder_for(&self, repo: &RepositoryIdentity) -> String {
        self.copyright_holder
            .clone()
            .unwrap_or_else(|| repo.owner().to_string())
    }

    /// Whether `path` has one of the configured extensions (case-insensitive).
    pub fn matches_extension(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        self.extensions
            .iter()
            .any(|wanted| wanted.trim_start_matches('.').eq_ignore_ascii_case(ext))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HeaderLintConfig::parse("", Path::new("headerlint.toml")).expect("empty");
        assert_eq!(config, HeaderLintConfig::default());
        assert!(config.regenerate_license_files);
        assert_eq!(config.extensions, vec!["php"]);
    }

    #[test]
    fn test_parse_all_keys() {
        let raw = r#"
repository = "foo/bar"
copyright_holder = "Foo Inc."
extensions = ["php", "phtml"]
regenerate_license_files = false
"#;
        let config = HeaderLintConfig::parse(raw, Path::new("x.toml")).expect("parse");
        assert_eq!(config.repository.as_deref(), Some("foo/bar"));
        assert_eq!(config.copyright_holder.as_deref(), Some("Foo Inc."));
        assert!(!config.regenerate_license_files);
        assert!(config.matches_extension(Path::new("views/a.PHTML")));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = HeaderLintConfig::parse("colour = true", Path::new("x.toml"))
            .expect_err("unknown key");
        assert!(matches!(err, HeaderLintError::Config { .. }));
    }

    #[test]
    fn test_holder_defaults_to_owner() {
        let repo = RepositoryIdentity::parse("foo/bar").expect("valid");
        assert_eq!(HeaderLintConfig::default().copyright_holder_for(&repo), "foo");
    }

    #[test]
    fn test_matches_extension() {
        let config = HeaderLintConfig::default();
        assert!(config.matches_extension(Path::new("src/A.php")));
        assert!(!config.matches_extension(Path::new("src/A.js")));
        assert!(!config.matches_extension(Path::new("Makefile")));
    }

    #[test]
    fn test_load_from_root() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert_eq!(
            HeaderLintConfig::load_from_root(dir.path()).expect("defaults"),
            HeaderLintConfig::default()
        );
        std::fs::write(dir.path().join(CONFIG_FILE), "repository = \"a/b\"\n").expect("write");
        let config = HeaderLintConfig::load_from_root(dir.path()).expect("load");
        assert_eq!(config.repository.as_deref(), Some("a/b"));
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(HeaderLintConfig::load(&dir.path().join("nope.toml")).is_err());
    }
}
