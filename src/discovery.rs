//! Template discovery and loading.
//!
//! Each requested path becomes one group: a file is taken as-is, a directory
//! is searched recursively for the configured extensions (minus excluded
//! folders). Groups keep the order the paths were requested in; files inside
//! a directory are sorted.

use crate::error::{ConfigError, LintError};
use crate::models::Source;
use glob::{glob, Pattern};
use rayon::prelude::*;
use std::fs;
use std::path::{Component, Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    pub real_path: PathBuf,
    pub display_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathGroup {
    pub requested: String,
    pub files: Vec<DiscoveredFile>,
}

impl PathGroup {
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Resolve requested paths to template files, grouped by requested path.
pub fn discover(
    paths: &[String],
    exclude: &[String],
    extensions: &[String],
) -> Result<Vec<PathGroup>, LintError> {
    let mut groups: Vec<PathGroup> = Vec::new();
    for requested in paths {
        let p = Path::new(requested);
        let found = if p.is_file() {
            let real_path = canonical(p)?;
            vec![DiscoveredFile {
                real_path,
                display_path: requested.clone(),
            }]
        } else if p.is_dir() {
            scan_dir(requested, exclude, extensions)?
        } else {
            tracing::warn!(path = requested.as_str(), "path does not exist; skipped");
            continue;
        };
        if found.is_empty() {
            tracing::debug!(path = requested.as_str(), "no templates found");
            continue;
        }
        match groups.iter_mut().find(|g| &g.requested == requested) {
            // A path requested twice contributes each file once.
            Some(g) => {
                for f in found {
                    if !g.files.iter().any(|known| known.real_path == f.real_path) {
                        g.files.push(f);
                    }
                }
            }
            None => groups.push(PathGroup {
                requested: requested.clone(),
                files: found,
            }),
        }
    }
    tracing::debug!(
        groups = groups.len(),
        files = groups.iter().map(PathGroup::len).sum::<usize>(),
        "discovery complete"
    );
    Ok(groups)
}

fn canonical(p: &Path) -> Result<PathBuf, LintError> {
    fs::canonicalize(p).map_err(|source| LintError::Io {
        path: p.to_path_buf(),
        source,
    })
}

fn scan_dir(
    requested: &str,
    exclude: &[String],
    extensions: &[String],
) -> Result<Vec<DiscoveredFile>, LintError> {
    let root = canonical(Path::new(requested))?;
    let prefix = requested.trim_end_matches('/');
    let mut real_paths: Vec<PathBuf> = Vec::new();
    for ext in extensions {
        let pattern = format!(
            "{}/**/*.{}",
            Pattern::escape(&root.to_string_lossy()),
            ext.trim_start_matches('.')
        );
        let entries = glob(&pattern).map_err(|e| ConfigError::InvalidPattern {
            pattern: pattern.clone(),
            message: e.to_string(),
        })?;
        for entry in entries {
            match entry {
                Ok(p) if p.is_file() => real_paths.push(p),
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(
                        path = %e.path().display(),
                        error = %e.error(),
                        "unreadable; skipped"
                    );
                }
            }
        }
    }
    real_paths.sort();
    real_paths.dedup();

    let mut out = Vec::new();
    for real_path in real_paths {
        let rel = pathdiff::diff_paths(&real_path, &root).unwrap_or_else(|| real_path.clone());
        if is_excluded(&rel, exclude) {
            tracing::trace!(file = %rel.display(), "excluded");
            continue;
        }
        let rel_str = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/");
        out.push(DiscoveredFile {
            display_path: format!("{}/{}", prefix, rel_str),
            real_path,
        });
    }
    Ok(out)
}

/// An exclude entry names a folder (or folder path) below the requested root.
fn is_excluded(rel: &Path, exclude: &[String]) -> bool {
    let Some(dir) = rel.parent() else {
        return false;
    };
    exclude.iter().any(|ex| {
        let ex = ex.trim_matches('/');
        if ex.is_empty() {
            return false;
        }
        dir.starts_with(ex)
            || dir
                .components()
                .any(|c| matches!(c, Component::Normal(n) if n == ex))
    })
}

/// Read every discovered file. Reads run in parallel; the result keeps
/// discovery order. Bytes that are not UTF-8 are replaced, not rejected.
pub fn load_sources(groups: &[PathGroup]) -> Result<Vec<Source>, LintError> {
    let files: Vec<&DiscoveredFile> = groups.iter().flat_map(|g| g.files.iter()).collect();
    files
        .par_iter()
        .map(|f| {
            let bytes = fs::read(&f.real_path).map_err(|source| LintError::Io {
                path: f.real_path.clone(),
                source,
            })?;
            let content = String::from_utf8_lossy(&bytes).into_owned();
            Ok(Source::new(content, f.real_path.clone(), f.display_path.clone()))
        })
        .collect()
}
