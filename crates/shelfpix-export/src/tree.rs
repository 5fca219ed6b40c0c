//! Filtered directory tree export
//!
//! Copies a repository tree while skipping heavyweight content (build
//! outputs, dependency caches, large image assets) so the result stays
//! under an upload size limit. A keep list can pull individual files
//! back in, such as logos that would otherwise match an image pattern.

use crate::{ExportError, ExportResult};
use std::fs;
use std::path::{Component, Path};
use walkdir::WalkDir;

/// Filtering rules for [`export_tree`]
///
/// Three pattern forms are supported:
/// - `*.ext` matches any file whose name ends in `.ext`
/// - `dir/sub/*.ext` matches such files only under that directory
/// - any other pattern matches when it equals a path component of the
///   entry's relative path
///
/// A keep pattern overrides all excludes when it appears as a
/// substring of the file name. File-name and extension comparisons
/// ignore case; directory patterns compare exactly.
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    pub excludes: Vec<String>,
    pub keeps: Vec<String>,
}

impl ExportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.excludes.push(pattern.into());
        self
    }

    pub fn keep(mut self, pattern: impl Into<String>) -> Self {
        self.keeps.push(pattern.into());
        self
    }

    fn is_excluded(&self, rel: &Path, is_dir: bool) -> bool {
        let file_name = rel
            .file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        if !is_dir
            && self
                .keeps
                .iter()
                .any(|k| file_name.contains(&k.to_lowercase()))
        {
            return false;
        }

        self.excludes
            .iter()
            .any(|p| pattern_matches(p, rel, &file_name, is_dir))
    }
}

fn pattern_matches(pattern: &str, rel: &Path, file_name: &str, is_dir: bool) -> bool {
    if let Some(ext) = pattern.strip_prefix("*.") {
        return !is_dir && file_name.ends_with(&format!(".{}", ext.to_lowercase()));
    }

    if let Some((prefix, glob)) = pattern.rsplit_once('/')
        && let Some(ext) = glob.strip_prefix("*.")
    {
        return !is_dir
            && rel.starts_with(prefix)
            && file_name.ends_with(&format!(".{}", ext.to_lowercase()));
    }

    rel.components()
        .any(|c| matches!(c, Component::Normal(n) if n.to_string_lossy() == *pattern))
}

/// Summary of a completed export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportSummary {
    /// Number of files copied
    pub files: u64,
    /// Total bytes copied
    pub bytes: u64,
}

/// Copy `src` to `dst`, skipping entries matched by `options`
///
/// Excluded directories are pruned without descending into them. `dst`
/// is created if missing; existing files in it are overwritten.
pub fn export_tree<P: AsRef<Path>, Q: AsRef<Path>>(
    src: P,
    dst: Q,
    options: &ExportOptions,
) -> ExportResult<ExportSummary> {
    let src = src.as_ref();
    let dst = dst.as_ref();
    fs::create_dir_all(dst)?;

    let mut summary = ExportSummary { files: 0, bytes: 0 };

    let walker = WalkDir::new(src).min_depth(1).into_iter();
    for entry in walker.filter_entry(|e| {
        let rel = match e.path().strip_prefix(src) {
            Ok(rel) => rel,
            Err(_) => return false,
        };
        !options.is_excluded(rel, e.file_type().is_dir())
    }) {
        let entry = entry?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .map_err(|_| ExportError::InvalidPath(entry.path().display().to_string()))?;
        let target = dst.join(rel);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else if entry.file_type().is_file() {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            let copied = fs::copy(entry.path(), &target)?;
            summary.files += 1;
            summary.bytes += copied;
        }
    }

    Ok(summary)
}

/// Total size in bytes of all files under `path`
pub fn dir_size<P: AsRef<Path>>(path: P) -> ExportResult<u64> {
    let mut total = 0;
    for entry in WalkDir::new(path) {
        let entry = entry?;
        if entry.file_type().is_file() {
            total += entry.metadata()?.len();
        }
    }
    Ok(total)
}
