use std::env;
use std::path;

use anyhow::Context as _;
use cinder::BuildConfiguration;
use cinder::Loader;
use cinder::OutputStyle;

use crate::check;
use crate::debug;
use crate::error::Result;

#[derive(Clone, Debug, clap::Parser)]
#[command(about, version, propagate_version = true)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Command,

    #[command(flatten)]
    pub(crate) verbose: clap_verbosity_flag::Verbosity<clap_verbosity_flag::InfoLevel>,

    #[command(flatten)]
    pub(crate) color: colorchoice_clap::Color,
}

#[derive(Clone, Debug, PartialEq, Eq, clap::Subcommand)]
pub(crate) enum Command {
    Check(check::CheckArgs),

    #[command(subcommand)]
    Debug(debug::DebugCommands),
}

impl Command {
    pub(crate) fn run(&self) -> Result<()> {
        match self {
            Self::Check(cmd) => cmd.run(),
            Self::Debug(cmd) => cmd.run(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, clap::Args)]
pub(crate) struct ConfigArgs {
    /// Config file to use [default: nearest config.rb]
    #[arg(short, long, value_name = "FILE")]
    pub(crate) config: Option<path::PathBuf>,

    /// Skip unrecognized options instead of failing
    #[arg(long)]
    pub(crate) lenient: bool,

    /// Override `output_style`
    #[arg(
        long,
        value_name = "STYLE",
        value_parser = clap::builder::PossibleValuesParser::new(OutputStyle::variants().iter().copied())
    )]
    pub(crate) style: Option<String>,

    /// Generate site-root-absolute asset paths (`relative_assets = false`)
    #[arg(long)]
    pub(crate) absolute_assets: bool,
}

impl ConfigArgs {
    pub(crate) fn load_config(&self) -> Result<BuildConfiguration> {
        let loader = Loader::new().lenient(self.lenient);

        let mut config = if let Some(config_path) = self.config.as_deref() {
            loader.load_file(config_path).with_context(|| {
                anyhow::format_err!("Error reading config file {}", config_path.display())
            })?
        } else {
            let cwd = env::current_dir().context("Failed to read the current directory")?;
            loader.load_cwd(cwd)?
        };

        if let Some(style) = self.style.as_deref() {
            let style: OutputStyle = style.parse()?;
            log::debug!("Overriding config `output_style` with `{style}`");
            config = config.with_output_style(style);
        }
        if self.absolute_assets {
            log::debug!("Overriding config `relative_assets` with `false`");
            config = config.with_relative_assets(false);
        }

        Ok(config)
    }
}

/// Render `path` for humans: relative to the project root when possible.
pub(crate) fn show(root: &path::Path, path: &path::Path) -> String {
    cinder_config::path::display_relative(dunce::simplified(root), dunce::simplified(path))
}
