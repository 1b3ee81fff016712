use anyhow::Context as _;

use crate::args;
use crate::error::Result;

/// Print project debug information
#[derive(Clone, Debug, PartialEq, Eq, clap::Subcommand)]
pub(crate) enum DebugCommands {
    /// Prints the loaded config
    Config {
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,

        #[command(flatten, next_help_heading = "Config")]
        config: args::ConfigArgs,
    },

    /// Prints each stylesheet and the CSS file it compiles to
    Files {
        /// Only map these source files [default: every stylesheet]
        #[arg(value_name = "FILE")]
        files: Vec<std::path::PathBuf>,

        #[command(flatten, next_help_heading = "Config")]
        config: args::ConfigArgs,
    },

    /// Prints the directories searched for `@import`, in order
    LoadPaths {
        #[command(flatten, next_help_heading = "Config")]
        config: args::ConfigArgs,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum Format {
    /// The `key = value` declaration format
    Text,
    Yaml,
    Json,
}

impl DebugCommands {
    pub(crate) fn run(&self) -> Result<()> {
        match self {
            Self::Config { format, config } => {
                let config = config.load_config()?;
                match format {
                    Format::Text => print!("{config}"),
                    Format::Yaml => print!("{}", serde_yaml::to_string(&config)?),
                    Format::Json => println!("{}", serde_json::to_string_pretty(&config)?),
                }
            }
            Self::Files { files, config } => {
                let config = config.load_config()?;
                let project = cinder::Project::from_config(config)?;
                let root = project.config().root();
                let sheets = if files.is_empty() {
                    project.stylesheets()
                } else {
                    let mut sheets = Vec::with_capacity(files.len());
                    for file in files {
                        let abs = std::path::absolute(file).with_context(|| {
                            anyhow::format_err!("Failed to resolve {}", file.display())
                        })?;
                        match project.stylesheet_for(&abs) {
                            Some(sheet) => sheets.push(sheet),
                            None => anyhow::bail!(
                                "{} is not a stylesheet of this project",
                                file.display()
                            ),
                        }
                    }
                    sheets
                };
                for sheet in sheets {
                    println!(
                        "{} -> {}",
                        args::show(root, &sheet.source.abs_path),
                        args::show(root, &sheet.target)
                    );
                }
            }
            Self::LoadPaths { config } => {
                let config = config.load_config()?;
                let project = cinder::Project::from_config(config)?;
                let root = project.config().root();
                for path in project.load_paths() {
                    println!("{}", args::show(root, &path));
                }
            }
        }

        Ok(())
    }
}
