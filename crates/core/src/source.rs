use crate::Result;
use crate::Status;

/// A directory tree of build inputs, filtered by gitignore-style patterns.
///
/// The root need not exist yet; iterating a missing root yields nothing.
#[derive(Debug, Clone)]
pub struct Source {
    root: std::path::PathBuf,
    ignore: ignore::gitignore::Gitignore,
}

impl Source {
    pub fn new<'i>(
        root: &std::path::Path,
        ignores: impl IntoIterator<Item = &'i str>,
    ) -> Result<Self> {
        let mut ignore = ignore::gitignore::GitignoreBuilder::new(root);
        for line in ignores.into_iter() {
            ignore.add_line(None, line).map_err(|e| {
                Status::new("Invalid ignore entry")
                    .with_source(e)
                    .context_with(|c| c.insert("Pattern", line.to_owned()))
            })?;
        }
        let ignore = ignore
            .build()
            .map_err(|e| Status::new("Invalid ignore entry").with_source(e))?;

        let source = Self {
            root: root.to_owned(),
            ignore,
        };
        Ok(source)
    }

    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    /// Whether `file`, or any directory between it and the root, is not ignored.
    pub fn includes_file(&self, file: &std::path::Path) -> bool {
        self.includes_path(file, false)
    }

    /// Included files under the root, in file-name order.
    pub fn iter(&self) -> impl Iterator<Item = std::path::PathBuf> + '_ {
        walkdir::WalkDir::new(&self.root)
            .min_depth(1)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |e| self.includes_entry(e))
            .filter_map(|e| match e {
                Ok(e) => Some(e),
                Err(e) => {
                    log::debug!("Skipping unreadable entry: {e}");
                    None
                }
            })
            .filter(|e| e.file_type().is_file())
            .map(move |e| e.path().to_path_buf())
    }

    fn includes_path(&self, path: &std::path::Path, is_dir: bool) -> bool {
        if path == self.root {
            return true;
        }

        let parent = path.parent();
        if let Some(parent) = parent {
            if parent.starts_with(&self.root) && !self.includes_path(parent, true) {
                return false;
            }
        }

        self.includes_path_leaf(path, is_dir)
    }

    fn includes_path_leaf(&self, path: &std::path::Path, is_dir: bool) -> bool {
        match self.ignore.matched(path, is_dir) {
            ignore::Match::None => true,
            ignore::Match::Ignore(glob) => {
                log::trace!("{:?}: ignored {:?}", path, glob.original());
                false
            }
            ignore::Match::Whitelist(glob) => {
                log::trace!("{:?}: allowed {:?}", path, glob.original());
                true
            }
        }
    }

    fn includes_entry(&self, entry: &walkdir::DirEntry) -> bool {
        let file = entry.path();

        // Parents were already checked on the way down.
        let is_dir = entry.file_type().is_dir();
        self.includes_path_leaf(file, is_dir)
    }
}
