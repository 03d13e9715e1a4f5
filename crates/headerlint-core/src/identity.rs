//! Repository identity (`owner/name`) used to template expected tag content.
//!
//! Resolved once per run, before any file is checked, then shared read-only.

use std::path::Path;
use std::process::Command;

use serde::{Deserialize, Serialize};

use crate::domain::error::{HeaderLintError, Result};

/// Validated `owner/name` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RepositoryIdentity {
    owner: String,
    name: String,
}

impl RepositoryIdentity {
    pub fn parse(value: &str) -> Result<Self> {
        let invalid = |reason: &str| HeaderLintError::InvalidRepository {
            value: value.to_string(),
            reason: reason.to_string(),
        };

        if value.chars().any(char::is_whitespace) {
            return Err(invalid("must not contain whitespace"));
        }
        let (owner, name) = value
            .split_once('/')
            .ok_or_else(|| invalid("expected owner/name"))?;
        if owner.is_empty() || name.is_empty() {
            return Err(invalid("owner and name must not be empty"));
        }
        if name.contains('/') {
            return Err(invalid("expected exactly one '/'"));
        }

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `https://github.com/<owner>/<name>`
    pub fn github_url(&self) -> String {
        format!("https://github.com/{self}")
    }
}

impl std::fmt::Display for RepositoryIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl TryFrom<String> for RepositoryIdentity {
    type Error = HeaderLintError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<RepositoryIdentity> for String {
    fn from(id: RepositoryIdentity) -> Self {
        id.to_string()
    }
}

#[derive(Debug, Deserialize)]
struct ComposerManifest {
    name: Option<String>,
}

/// Resolve the identity for the project at `root`.
///
/// Sources, first hit wins: `explicit` (CLI flag / env), `configured`
/// (config file), `composer.json` `name`, git `remote.origin.url`.
/// A hit that fails validation is an error, not a fallthrough.
pub fn resolve_identity(
    root: &Path,
    explicit: Option<&str>,
    configured: Option<&str>,
) -> Result<RepositoryIdentity> {
    if let Some(value) = explicit {
        tracing::debug!(source = "explicit", repository = %value, "repository identity");
        return RepositoryIdentity::parse(value);
    }
    if let Some(value) = configured {
        tracing::debug!(source = "config", repository = %value, "repository identity");
        return RepositoryIdentity::parse(value);
    }
    if let Some(value) = read_composer_name(root)? {
        tracing::debug!(source = "composer.json", repository = %value, "repository identity");
        return RepositoryIdentity::parse(&value);
    }
    if let Some(url) = git_origin_url(root) {
        if let Some(value) = parse_remote_url(&url) {
            tracing::debug!(source = "git", repository = %value, "repository identity");
            return RepositoryIdentity::parse(&value);
        }
        tracing::debug!(url = %url, "git remote is not a GitHub URL");
    }

    Err(HeaderLintError::RepositoryUnresolved {
        tried: "--repository, config, composer.json, git remote.origin.url".to_string(),
    })
}

fn read_composer_name(root: &Path) -> Result<Option<String>> {
    let path = root.join("composer.json");
    if !path.is_file() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(&path)?;
    let manifest: ComposerManifest = serde_json::from_str(&content)?;
    Ok(manifest.name)
}

fn git_origin_url(root: &Path) -> Option<String> {
    let output = Command::new("git")
        .args(["config", "--get", "remote.origin.url"])
        .current_dir(root)
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let url = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!url.is_empty()).then_some(url)
}

/// Extract `owner/name` from a GitHub SSH or HTTPS remote URL.
pub fn parse_remote_url(url: &str) -> Option<String> {
    let path = url
        .strip_prefix("git@github.com:")
        .or_else(|| url.strip_prefix("ssh://git@github.com/"))
        .or_else(|| url.strip_prefix("https://github.com/"))
        .or_else(|| url.strip_prefix("http://github.com/"))?;
    let path = path.trim_end_matches('/');
    let path = path.strip_suffix(".git").unwrap_or(path);
    Some(path.to_string())
}
