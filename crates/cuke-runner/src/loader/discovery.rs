//! Enumerates `.feature` files beneath a resource root.

use std::path::{Path, PathBuf};

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::error::LoadError;

fn is_feature_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("feature"))
}

fn process_dir_entry(entry: &DirEntry) -> Option<PathBuf> {
    if entry.file_type().is_file() && is_feature_file(entry.path()) {
        Some(entry.path().to_path_buf())
    } else {
        None
    }
}

fn convert_walkdir_error(err: walkdir::Error) -> Option<LoadError> {
    if err.loop_ancestor().is_some() {
        return None;
    }
    let path = err
        .path()
        .map_or_else(PathBuf::new, Path::to_path_buf);
    let message = err.to_string();
    let source = err
        .into_io_error()
        .unwrap_or_else(|| std::io::Error::other(message));
    Some(LoadError::Io { path, source })
}

/// Collect feature files below `target`, sorted by path.
///
/// A missing target yields no files. A target that is itself a feature file
/// yields just that file.
pub(super) fn collect_feature_files(target: &Path) -> Result<Vec<PathBuf>, LoadError> {
    if !target.exists() {
        return Ok(Vec::new());
    }
    if target.is_file() {
        return Ok(if is_feature_file(target) {
            vec![target.to_path_buf()]
        } else {
            Vec::new()
        });
    }

    let mut files = Vec::new();
    for next in WalkDir::new(target).follow_links(false).sort_by_file_name() {
        match next {
            Ok(entry) => files.extend(process_dir_entry(&entry)),
            Err(err) => {
                if let Some(err) = convert_walkdir_error(err) {
                    return Err(err);
                }
            }
        }
    }

    files.sort();
    Ok(files)
}

/// Render `path` relative to `base` as a slash-separated UTF-8 path.
///
/// Only plain segments are accepted, so the result addresses the same file
/// when read back through a capability handle on `base`.
pub(super) fn resource_path(base: &Path, path: &Path) -> Result<Utf8PathBuf, LoadError> {
    let relative = path.strip_prefix(base).unwrap_or(path);
    let utf8 = Utf8Path::from_path(relative)
        .ok_or_else(|| LoadError::NonUtf8Path(path.to_path_buf()))?;
    let mut segments = Vec::new();
    for component in utf8.components() {
        match component {
            Utf8Component::Normal(segment) => segments.push(segment),
            Utf8Component::CurDir => {}
            _ => return Err(LoadError::OutsideBase(utf8.to_path_buf())),
        }
    }
    Ok(Utf8PathBuf::from(segments.join("/")))
}

#[cfg(test)]
mod tests {
    use super::{collect_feature_files, resource_path};
    use crate::error::LoadError;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap_or_else(|e| panic!("create {parent:?}: {e}"));
        }
        fs::write(&path, "Feature: x\n").unwrap_or_else(|e| panic!("write {path:?}: {e}"));
    }

    fn names(base: &Path, target: &Path) -> Vec<String> {
        collect_feature_files(target)
            .unwrap_or_else(|e| panic!("collect: {e}"))
            .iter()
            .map(|p| {
                resource_path(base, p)
                    .unwrap_or_else(|e| panic!("relative path: {e}"))
                    .into_string()
            })
            .collect()
    }

    #[test]
    fn collects_sorted_feature_files_recursively() {
        let dir = TempDir::new().unwrap_or_else(|e| panic!("tempdir: {e}"));
        touch(dir.path(), "b/second.feature");
        touch(dir.path(), "a.feature");
        touch(dir.path(), "b/first.FEATURE");
        touch(dir.path(), "b/notes.txt");

        assert_eq!(
            names(dir.path(), dir.path()),
            ["a.feature", "b/first.FEATURE", "b/second.feature"]
        );
    }

    #[test]
    fn missing_target_yields_nothing() {
        let dir = TempDir::new().unwrap_or_else(|e| panic!("tempdir: {e}"));
        let files = collect_feature_files(&dir.path().join("gibber/ish"))
            .unwrap_or_else(|e| panic!("collect: {e}"));
        assert!(files.is_empty());
    }

    #[test]
    fn file_target_yields_itself() {
        let dir = TempDir::new().unwrap_or_else(|e| panic!("tempdir: {e}"));
        touch(dir.path(), "x/only.feature");
        assert_eq!(
            names(dir.path(), &dir.path().join("x/only.feature")),
            ["x/only.feature"]
        );
    }

    #[test]
    fn parent_segments_are_not_resource_paths() {
        let dir = TempDir::new().unwrap_or_else(|e| panic!("tempdir: {e}"));
        let base = dir.path().join("base");
        let outside = dir.path().join("base/../other/x.feature");
        assert!(matches!(
            resource_path(&base, &outside),
            Err(LoadError::OutsideBase(_))
        ));
    }

    #[test]
    fn non_feature_file_target_yields_nothing() {
        let dir = TempDir::new().unwrap_or_else(|e| panic!("tempdir: {e}"));
        touch(dir.path(), "readme.md");
        let files = collect_feature_files(&dir.path().join("readme.md"))
            .unwrap_or_else(|e| panic!("collect: {e}"));
        assert!(files.is_empty());
    }
}
