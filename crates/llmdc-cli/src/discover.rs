//! Resolves CLI positional arguments (files or directories) into a
//! flat, sorted list of input files with an admitted extension.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

const ADMITTED_EXTENSIONS: [&str; 3] = ["md", "markdown", "llmd"];

fn has_admitted_extension(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()).is_some_and(|ext| ADMITTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

fn walk(dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
    let entries = std::fs::read_dir(dir).with_context(|| format!("reading directory {}", dir.display()))?;
    let mut children: Vec<PathBuf> = entries.filter_map(|e| e.ok()).map(|e| e.path()).collect();
    children.sort();

    for child in children {
        if child.is_dir() {
            walk(&child, out)?;
        } else if has_admitted_extension(&child) {
            out.push(child);
        }
    }
    Ok(())
}

/// Expand each positional path into the files it names: a file is
/// taken as-is (admitted-extension check still applies), a directory
/// is walked recursively.
pub fn discover_inputs(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    for path in paths {
        if !path.exists() {
            anyhow::bail!("no such file or directory: {}", path.display());
        }
        if path.is_dir() {
            walk(path, &mut out)?;
        } else if has_admitted_extension(path) {
            out.push(path.clone());
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_files_with_unadmitted_extensions() {
        assert!(!has_admitted_extension(Path::new("notes.txt")));
        assert!(has_admitted_extension(Path::new("notes.md")));
        assert!(has_admitted_extension(Path::new("notes.MARKDOWN")));
        assert!(has_admitted_extension(Path::new("notes.llmd")));
    }
}
