#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod error;
mod project;

pub use cinder_config::BuildConfiguration;
pub use cinder_config::Loader;
pub use cinder_config::OutputStyle;
pub use cinder_core::Stylesheet;

pub use crate::error::Error;
pub use crate::project::Project;
