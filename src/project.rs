use std::path;

use cinder_config::BuildConfiguration;
use cinder_core::Source;
use cinder_core::Stylesheet;

use crate::error::Result;

/// A loaded configuration bound to the source tree it describes.
#[derive(Debug, Clone)]
pub struct Project {
    config: BuildConfiguration,
    source: Source,
}

impl Project {
    pub fn from_config(config: BuildConfiguration) -> Result<Self> {
        log::trace!("Project configuration: {config:?}");
        let source = Source::new(config.sass_source_dir(), [".*"])?;
        Ok(Self { config, source })
    }

    pub fn config(&self) -> &BuildConfiguration {
        &self.config
    }

    pub fn into_config(self) -> BuildConfiguration {
        self.config
    }

    /// Sass sources that compile to their own CSS file, in file-name order.
    pub fn stylesheets(&self) -> Vec<Stylesheet> {
        let sheets = cinder_core::stylesheets(&self.source, self.config.css_output_dir());
        log::debug!(
            "Found {} stylesheet(s) under {}",
            sheets.len(),
            self.config.sass_source_dir().display()
        );
        sheets
    }

    /// The stylesheet an absolute `file` compiles to, if the project would compile it.
    pub fn stylesheet_for(&self, file: &path::Path) -> Option<Stylesheet> {
        cinder_core::stylesheet_for(&self.source, self.config.css_output_dir(), file)
    }

    /// Directories searched for `@import`: the sass source directory first, then each additional
    /// import path in declaration order.
    pub fn load_paths(&self) -> Vec<path::PathBuf> {
        let mut paths = vec![self.config.sass_source_dir().to_owned()];
        for path in self.config.resolved_import_paths() {
            if paths.contains(&path) {
                log::debug!("Skipping duplicate load path {}", path.display());
                continue;
            }
            paths.push(path);
        }
        paths
    }
}
