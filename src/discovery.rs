//! Source discovery: turn the paths given on the command line into the list
//! of `.py` files to lex.
//!
//! Directories are walked with the `ignore` crate, so `.gitignore` and
//! `.ignore` rules apply and hidden entries are skipped.  Directory names in
//! [`SKIPPED_DIRS`] are never entered, ignored or not.

use anyhow::{Context, Result};
use ignore::WalkBuilder;
use std::path::{Component, Path, PathBuf};

/// Virtual environments and tool caches: full of third-party code nobody
/// asked to lex.
pub const SKIPPED_DIRS: &[&str] = &[
    "venv",
    "env",
    "virtualenv",
    "__pycache__",
    "site-packages",
    "build",
    "dist",
    "node_modules",
];

/// Expand `paths` into source files.  Explicit file paths are kept whatever
/// their extension; directories contribute the `.py` files beneath them.
/// A path component equal to one of `exclude` drops the file.
///
/// The result is sorted and free of duplicates.
pub fn collect_sources(paths: &[PathBuf], exclude: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_file() {
            files.push(path.clone());
        } else {
            files.extend(
                walk_python_files(path, exclude)
                    .with_context(|| format!("failed to walk {}", path.display()))?,
            );
        }
    }
    files.sort();
    files.dedup();
    Ok(files)
}

fn walk_python_files(root: &Path, exclude: &[String]) -> Result<Vec<PathBuf>> {
    let walker = WalkBuilder::new(root)
        .hidden(true)
        .git_ignore(true)
        .require_git(false)
        .build();

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("py") {
            continue;
        }
        if is_skipped(path.strip_prefix(root).unwrap_or(path), exclude) {
            continue;
        }
        files.push(path.to_path_buf());
    }
    Ok(files)
}

fn is_skipped(relative: &Path, exclude: &[String]) -> bool {
    relative.components().any(|component| {
        let Component::Normal(name) = component else {
            return false;
        };
        let name = name.to_string_lossy();
        SKIPPED_DIRS.contains(&name.as_ref()) || exclude.iter().any(|e| *e == name)
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
