use crate::args;
use crate::error::Result;

/// Load and validate the configuration
#[derive(Clone, Debug, PartialEq, Eq, clap::Args)]
pub(crate) struct CheckArgs {
    #[command(flatten, next_help_heading = "Config")]
    pub(crate) config: args::ConfigArgs,
}

impl CheckArgs {
    pub(crate) fn run(&self) -> Result<()> {
        let config = self.config.load_config()?;
        let project = cinder::Project::from_config(config)?;
        let config = project.config();
        let root = config.root();

        log::info!("Project root {}", dunce::simplified(root).display());
        log::info!(
            "Compiling {} into {}",
            args::show(root, config.sass_source_dir()),
            args::show(root, config.css_output_dir())
        );
        for path in project.load_paths().iter().skip(1) {
            if !path.is_dir() {
                log::warn!(
                    "Import path {} does not exist yet",
                    args::show(root, path)
                );
            }
        }
        log::info!(
            "{} stylesheet(s), output style `{}`",
            project.stylesheets().len(),
            config.output_style()
        );
        log::info!("Configuration OK");

        Ok(())
    }
}
