//! Collects the files a run checks.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use headerlint_core::HeaderLintConfig;

/// Directory names never descended into.
const SKIPPED_DIRS: [&str; 1] = ["vendor"];

/// Expand `paths` into a sorted, deduplicated file list. Files named
/// explicitly are always kept; files found by walking a directory must carry
/// one of the configured extensions.
pub fn collect_files(paths: &[PathBuf], config: &HeaderLintConfig) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        let meta = std::fs::metadata(path).with_context(|| format!("stat {:?}", path))?;
        if meta.is_dir() {
            walk_dir(path, config, &mut files)?;
        } else {
            files.push(path.clone());
        }
    }
    files.sort();
    files.dedup();
    Ok(files)
}

fn walk_dir(dir: &Path, config: &HeaderLintConfig, out: &mut Vec<PathBuf>) -> Result<()> {
    let entries = std::fs::read_dir(dir).with_context(|| format!("read dir {:?}", dir))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("read dir {:?}", dir))?;
        let path = entry.path();
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            if !is_skipped_dir(&path) {
                walk_dir(&path, config, out)?;
            }
        } else if file_type.is_file() && config.matches_extension(&path) {
            out.push(path);
        }
    }
    Ok(())
}

fn is_skipped_dir(path: &Path) -> bool {
    match path.file_name().and_then(|n| n.to_str()) {
        Some(name) => name.starts_with('.') || SKIPPED_DIRS.contains(&name),
        None => false,
    }
}
