use std::path;

use crate::path::absolute_root;
use crate::path::resolve;
use crate::path::validate;
use crate::syntax;
use crate::syntax::Value;
use crate::BuildConfiguration;
use crate::ErrorKind;
use crate::LoadError;
use crate::OutputStyle;
use crate::Result;
use crate::Status;

/// Where a project keeps its declarations, probed in order within each directory.
pub const PROJECT_FILES: &[&str] = &[
    "config/compass.rb",
    ".compass/config.rb",
    "config/compass.config",
    "config.rb",
    "src/config.rb",
];

/// Reads declarations into a [`BuildConfiguration`].
///
/// Strict by default: an unrecognized option fails the load. A lenient loader logs and skips it
/// instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Loader {
    lenient: bool,
}

impl Loader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lenient(mut self, yes: bool) -> Self {
        self.lenient = yes;
        self
    }

    pub fn is_lenient(&self) -> bool {
        self.lenient
    }

    /// Parse and validate `content`, resolving relative directories against `root`.
    pub fn load_str(
        &self,
        content: &str,
        root: &path::Path,
    ) -> Result<BuildConfiguration, LoadError> {
        let root = absolute_root(root)?;
        let mut config = BuildConfiguration::with_root(root);
        let mut declared = Declared::default();

        for statement in syntax::parse(content)? {
            let syntax::Statement { line, key, value } = statement;
            let applied = match key {
                "http_path" => expect_str(&value, line).map(|s| config.http_path = s),
                "css_dir" => expect_path(&value, line).map(|s| declared.css_dir = Some(s)),
                "sass_dir" => expect_path(&value, line).map(|s| declared.sass_dir = Some(s)),
                "images_dir" => expect_path(&value, line).map(|s| declared.images_dir = Some(s)),
                "javascripts_dir" => {
                    expect_path(&value, line).map(|s| declared.javascripts_dir = Some(s))
                }
                "add_import_path" => {
                    expect_path(&value, line).map(|s| config.additional_import_paths.push(s))
                }
                "output_style" => parse_style(&value, line).map(|s| config.output_style = s),
                "relative_assets" => parse_bool(&value, line).map(|b| config.relative_assets = b),
                _ if self.is_lenient() => {
                    log::warn!("Ignoring unknown option `{key}` on line {line}");
                    Ok(())
                }
                _ => Err(LoadError::new(
                    ErrorKind::UnknownOption,
                    line,
                    "not a recognized option",
                )),
            };
            applied.map_err(|e| e.with_key(key))?;
        }

        declared.apply(&mut config);
        Ok(config)
    }

    pub fn load_file<P: Into<path::PathBuf>>(&self, path: P) -> Result<BuildConfiguration> {
        self.load_file_internal(path.into())
    }

    fn load_file_internal(&self, path: path::PathBuf) -> Result<BuildConfiguration> {
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Status::new("Failed to read config")
                .with_source(e)
                .context_with(|c| c.insert("Path", path.display().to_string()))
        })?;

        let mut root = path.clone();
        root.pop(); // Remove filename
        if root == path::Path::new("") {
            root = path::Path::new(".").to_owned();
        }

        let config = self.load_str(&content, &root).map_err(|e| {
            Status::new("Failed to parse config")
                .with_source(e)
                .context_with(|c| c.insert("Path", path.display().to_string()))
        })?;
        Ok(config)
    }

    /// Load the nearest project file at or above `cwd`, or defaults rooted at `cwd`.
    pub fn load_cwd<P: Into<path::PathBuf>>(&self, cwd: P) -> Result<BuildConfiguration> {
        self.load_cwd_internal(cwd.into())
    }

    fn load_cwd_internal(&self, cwd: path::PathBuf) -> Result<BuildConfiguration> {
        match find_project_file(&cwd) {
            Some(file_path) => {
                log::debug!("Using config file `{}`", file_path.display());
                self.load_file(file_path)
            }
            None => {
                log::warn!("No config.rb file found in current directory, using default config.");
                let root = absolute_root(&cwd).map_err(|e| {
                    Status::new("Failed to resolve project root")
                        .with_source(e)
                        .context_with(|c| c.insert("Path", cwd.display().to_string()))
                })?;
                Ok(BuildConfiguration::with_root(root))
            }
        }
    }
}

/// Directories are resolved once every line is read so a later `sass_dir` cannot leave an
/// earlier declaration resolved against a stale value.
#[derive(Default)]
struct Declared {
    css_dir: Option<String>,
    sass_dir: Option<String>,
    images_dir: Option<String>,
    javascripts_dir: Option<String>,
}

impl Declared {
    fn apply(self, config: &mut BuildConfiguration) {
        let root = config.root.clone();
        if let Some(dir) = self.css_dir {
            config.css_output_dir = resolve(&root, &dir);
        }
        if let Some(dir) = self.sass_dir {
            config.sass_source_dir = resolve(&root, &dir);
        }
        if let Some(dir) = self.images_dir {
            config.images_dir = resolve(&root, &dir);
        }
        if let Some(dir) = self.javascripts_dir {
            config.javascripts_dir = resolve(&root, &dir);
        }
    }
}

fn expect_str(value: &Value, line: usize) -> Result<String, LoadError> {
    match value {
        Value::Str(s) => Ok(s.clone()),
        other => Err(LoadError::new(
            ErrorKind::Syntax,
            line,
            format!("expected a quoted string, found `{}`", other.describe()),
        )),
    }
}

fn expect_path(value: &Value, line: usize) -> Result<String, LoadError> {
    let declared = expect_str(value, line)?;
    validate(&declared, line)?;
    Ok(declared)
}

fn parse_style(value: &Value, line: usize) -> Result<OutputStyle, LoadError> {
    let style = match value {
        Value::Symbol(s) | Value::Str(s) => s.parse().ok(),
        Value::Bare(_) => None,
    };
    style.ok_or_else(|| {
        LoadError::new(
            ErrorKind::InvalidEnumValue,
            line,
            format!(
                "`{}` is not one of :{}",
                value.describe(),
                OutputStyle::variants().join(", :")
            ),
        )
    })
}

fn parse_bool(value: &Value, line: usize) -> Result<bool, LoadError> {
    match value {
        Value::Bare(b) if b == "true" => Ok(true),
        Value::Bare(b) if b == "false" => Ok(false),
        other => Err(LoadError::new(
            ErrorKind::InvalidBooleanValue,
            line,
            format!("expected `true` or `false`, found `{}`", other.describe()),
        )),
    }
}

fn find_project_file<P: Into<path::PathBuf>>(dir: P) -> Option<path::PathBuf> {
    find_project_file_internal(dir.into())
}

fn find_project_file_internal(dir: path::PathBuf) -> Option<path::PathBuf> {
    let mut dir = dir;
    loop {
        if let Some(found) = PROJECT_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
        {
            return Some(found);
        }
        let hit_bottom = !dir.pop();
        if hit_bottom {
            return None;
        }
    }
}
