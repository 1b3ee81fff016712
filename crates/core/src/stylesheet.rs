use std::ffi;
use std::path;

use crate::Source;
use crate::SourcePath;

/// One compilation unit: a sass source and the CSS file it produces.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[cfg_attr(not(feature = "unstable"), non_exhaustive)]
pub struct Stylesheet {
    pub source: SourcePath,
    pub target: path::PathBuf,
}

pub fn is_sass_file(file_path: &path::Path) -> bool {
    let ext = file_path.extension();
    ext == Some(ffi::OsStr::new("scss")) || ext == Some(ffi::OsStr::new("sass"))
}

/// Partials are only pulled in through `@import` and never compiled on their own.
pub fn is_partial(file_path: &path::Path) -> bool {
    file_path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('_'))
}

/// Mirror `file_path`'s position under `source_root` into `dest_root`, as a `.css` file.
pub fn derive_css_path(
    source_root: &path::Path,
    dest_root: &path::Path,
    file_path: &path::Path,
) -> Option<path::PathBuf> {
    let rel_src = file_path.strip_prefix(source_root).ok()?;
    let mut dest_file_path = dest_root.join(rel_src);
    dest_file_path.set_extension("css");
    Some(dest_file_path)
}

/// Every non-partial sass file in `source`, paired with its output under `dest_root`.
pub fn stylesheets(source: &Source, dest_root: &path::Path) -> Vec<Stylesheet> {
    source
        .iter()
        .filter_map(|p| compile_unit(source, dest_root, &p))
        .collect()
}

/// The stylesheet `file_path` compiles to, if it is a non-ignored, non-partial sass file under
/// `source`'s root.
pub fn stylesheet_for(
    source: &Source,
    dest_root: &path::Path,
    file_path: &path::Path,
) -> Option<Stylesheet> {
    if !source.includes_file(file_path) {
        log::trace!("{}: ignored", file_path.display());
        return None;
    }
    compile_unit(source, dest_root, file_path)
}

fn compile_unit(
    source: &Source,
    dest_root: &path::Path,
    file_path: &path::Path,
) -> Option<Stylesheet> {
    if !is_sass_file(file_path) {
        return None;
    }
    if is_partial(file_path) {
        log::trace!("{}: partial, not compiled", file_path.display());
        return None;
    }
    let target = derive_css_path(source.root(), dest_root, file_path)?;
    let source_path = SourcePath::from_root(source.root(), file_path)?;
    Some(Stylesheet {
        source: source_path,
        target,
    })
}
