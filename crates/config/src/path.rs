//! Resolution of declared directories against the configuration root.

use std::path;

use relative_path::RelativePath;

use crate::ErrorKind;
use crate::LoadError;

/// Check that `declared` can be used as a path at all.
///
/// Existence on disk is not checked; the build may create the directory later.
pub(crate) fn validate(declared: &str, line: usize) -> Result<(), LoadError> {
    if declared.is_empty() {
        return Err(LoadError::new(
            ErrorKind::PathResolutionError,
            line,
            "path is empty",
        ));
    }
    if declared.contains('\0') {
        return Err(LoadError::new(
            ErrorKind::PathResolutionError,
            line,
            "path contains a NUL byte",
        ));
    }
    Ok(())
}

/// Resolve `declared` against `base`.
///
/// Absolute declarations are normalized in place. Relative ones are joined logically: `..` pops
/// a component of `base` instead of being looked up on disk.
pub fn resolve(base: &path::Path, declared: &str) -> path::PathBuf {
    let as_path = path::Path::new(declared);
    if as_path.is_absolute() {
        normalize(as_path)
    } else {
        RelativePath::new(declared).to_logical_path(base)
    }
}

/// Make `root` absolute and free of `.`/`..` without consulting the filesystem beyond the
/// working directory.
pub(crate) fn absolute_root(root: &path::Path) -> Result<path::PathBuf, LoadError> {
    let root = if root.is_absolute() {
        root.to_owned()
    } else {
        std::path::absolute(root).map_err(|e| {
            LoadError::new(
                ErrorKind::PathResolutionError,
                0,
                format!("cannot make `{}` absolute: {e}", root.display()),
            )
        })?
    };
    Ok(normalize(&root))
}

/// Lexically drop `.` and fold `..` into its parent. `..` at the filesystem root stays there.
///
/// Only meaningful for absolute paths; a leading `..` on a relative path would be lost.
fn normalize(path: &path::Path) -> path::PathBuf {
    let mut normalized = path::PathBuf::new();
    for component in path.components() {
        match component {
            path::Component::CurDir => {}
            path::Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    normalized
}

/// Render `path` for the text format: relative to `root` when it lives under it.
pub fn display_relative(root: &path::Path, path: &path::Path) -> String {
    match path.strip_prefix(root) {
        Ok(rel) if rel.as_os_str().is_empty() => ".".to_owned(),
        Ok(rel)
            if rel
                .components()
                .any(|c| matches!(c, path::Component::ParentDir)) =>
        {
            path.display().to_string()
        }
        Ok(rel) => match relative_path::RelativePathBuf::from_path(rel) {
            Ok(rel) => rel.into_string(),
            Err(_) => path.display().to_string(),
        },
        Err(_) => path.display().to_string(),
    }
}
