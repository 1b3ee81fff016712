use std::fmt;
use std::path;

use crate::path::display_relative;
use crate::path::resolve;
use crate::syntax::quote;
use crate::Loader;
use crate::OutputStyle;
use crate::Result;

pub const DEFAULT_HTTP_PATH: &str = "/";
pub const DEFAULT_CSS_DIR: &str = "stylesheets";
pub const DEFAULT_SASS_DIR: &str = "sass";
pub const DEFAULT_IMAGES_DIR: &str = "images";
pub const DEFAULT_JAVASCRIPTS_DIR: &str = "javascripts";

/// Settings a stylesheet build runs with.
///
/// Every directory is absolute: it was either declared absolute or resolved against
/// [`BuildConfiguration::root`], the directory the declarations were loaded from.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub struct BuildConfiguration {
    pub(crate) root: path::PathBuf,
    pub(crate) http_path: String,
    pub(crate) css_output_dir: path::PathBuf,
    pub(crate) sass_source_dir: path::PathBuf,
    pub(crate) images_dir: path::PathBuf,
    pub(crate) javascripts_dir: path::PathBuf,
    pub(crate) additional_import_paths: Vec<String>,
    pub(crate) output_style: OutputStyle,
    pub(crate) relative_assets: bool,
}

impl BuildConfiguration {
    /// Defaults for a project rooted at `root`, which must already be absolute.
    pub(crate) fn with_root(root: path::PathBuf) -> Self {
        Self {
            http_path: DEFAULT_HTTP_PATH.to_owned(),
            css_output_dir: resolve(&root, DEFAULT_CSS_DIR),
            sass_source_dir: resolve(&root, DEFAULT_SASS_DIR),
            images_dir: resolve(&root, DEFAULT_IMAGES_DIR),
            javascripts_dir: resolve(&root, DEFAULT_JAVASCRIPTS_DIR),
            additional_import_paths: Vec::new(),
            output_style: OutputStyle::default(),
            relative_assets: true,
            root,
        }
    }

    /// Parse declarations as if they were read from a file in `root`.
    pub fn from_str_in(
        content: &str,
        root: impl AsRef<path::Path>,
    ) -> Result<Self, crate::LoadError> {
        Loader::new().load_str(content, root.as_ref())
    }

    pub fn from_file<P: Into<path::PathBuf>>(path: P) -> Result<Self> {
        Loader::new().load_file(path)
    }

    pub fn from_cwd<P: Into<path::PathBuf>>(cwd: P) -> Result<Self> {
        Loader::new().load_cwd(cwd)
    }

    pub fn root(&self) -> &path::Path {
        &self.root
    }

    pub fn http_path(&self) -> &str {
        &self.http_path
    }

    pub fn css_output_dir(&self) -> &path::Path {
        &self.css_output_dir
    }

    pub fn sass_source_dir(&self) -> &path::Path {
        &self.sass_source_dir
    }

    pub fn images_dir(&self) -> &path::Path {
        &self.images_dir
    }

    pub fn javascripts_dir(&self) -> &path::Path {
        &self.javascripts_dir
    }

    /// Import paths exactly as declared, in declaration order.
    pub fn additional_import_paths(&self) -> &[String] {
        &self.additional_import_paths
    }

    /// Import paths resolved against the parent of the sass source directory.
    pub fn resolved_import_paths(&self) -> Vec<path::PathBuf> {
        let base = self.sass_source_dir.parent().unwrap_or(&self.sass_source_dir);
        self.additional_import_paths
            .iter()
            .map(|declared| resolve(base, declared))
            .collect()
    }

    pub fn output_style(&self) -> OutputStyle {
        self.output_style
    }

    pub fn relative_assets(&self) -> bool {
        self.relative_assets
    }

    pub fn with_output_style(mut self, style: OutputStyle) -> Self {
        self.output_style = style;
        self
    }

    pub fn with_relative_assets(mut self, relative: bool) -> Self {
        self.relative_assets = relative;
        self
    }
}

/// Renders the configuration in the declaration format it was loaded from.
///
/// Loading the output with the same root yields an equal value.
impl fmt::Display for BuildConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dir = |p: &path::Path| quote(&display_relative(&self.root, p));
        writeln!(f, "http_path = {}", quote(&self.http_path))?;
        writeln!(f, "css_dir = {}", dir(&self.css_output_dir))?;
        writeln!(f, "sass_dir = {}", dir(&self.sass_source_dir))?;
        writeln!(f, "images_dir = {}", dir(&self.images_dir))?;
        writeln!(f, "javascripts_dir = {}", dir(&self.javascripts_dir))?;
        writeln!(f, "output_style = :{}", self.output_style)?;
        for import in &self.additional_import_paths {
            writeln!(f, "add_import_path {}", quote(import))?;
        }
        writeln!(f, "relative_assets = {}", self.relative_assets)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ErrorKind;

    fn project() -> &'static path::Path {
        path::Path::new("/project")
    }

    #[test]
    fn empty_input_is_all_defaults() {
        let config = BuildConfiguration::from_str_in("", project()).unwrap();
        assert_eq!(config.root(), project());
        assert_eq!(config.http_path(), "/");
        assert_eq!(config.css_output_dir(), project().join("stylesheets"));
        assert_eq!(config.sass_source_dir(), project().join("sass"));
        assert_eq!(config.images_dir(), project().join("images"));
        assert_eq!(config.javascripts_dir(), project().join("javascripts"));
        assert!(config.additional_import_paths().is_empty());
        assert_eq!(config.output_style(), OutputStyle::Compact);
        assert!(config.relative_assets());
    }

    #[test]
    fn comments_only_is_all_defaults() {
        let config =
            BuildConfiguration::from_str_in("# nothing here\n\n# css_dir = \"x\"\n", project())
                .unwrap();
        assert_eq!(config, BuildConfiguration::with_root(project().to_owned()));
    }

    #[test]
    fn sass_dir_resolves_against_root() {
        let config = BuildConfiguration::from_str_in("sass_dir = \"src\"", project()).unwrap();
        assert_eq!(config.sass_source_dir(), path::Path::new("/project/src"));
    }

    #[test]
    fn parent_relative_dirs() {
        let config = BuildConfiguration::from_str_in(
            "css_dir = \"../demo/css\"\nimages_dir = \"../demo/css/img\"",
            "/work/compass",
        )
        .unwrap();
        assert_eq!(config.css_output_dir(), path::Path::new("/work/demo/css"));
        assert_eq!(config.images_dir(), path::Path::new("/work/demo/css/img"));
    }

    #[test]
    fn output_style_accepts_symbol_and_string() {
        let config =
            BuildConfiguration::from_str_in("output_style = \"compressed\"", project()).unwrap();
        assert_eq!(config.output_style(), OutputStyle::Compressed);

        let config =
            BuildConfiguration::from_str_in("output_style = :expanded", project()).unwrap();
        assert_eq!(config.output_style(), OutputStyle::Expanded);
    }

    #[test]
    fn output_style_rejects_unknown() {
        let err = BuildConfiguration::from_str_in("output_style = \"ugly\"", project())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidEnumValue);
        assert_eq!(err.key(), Some("output_style"));
        assert_eq!(err.line(), 1);
    }

    #[test]
    fn relative_assets_parses_bare_booleans() {
        let config =
            BuildConfiguration::from_str_in("relative_assets = true", project()).unwrap();
        assert!(config.relative_assets());

        let config =
            BuildConfiguration::from_str_in("relative_assets = false", project()).unwrap();
        assert!(!config.relative_assets());
    }

    #[test]
    fn relative_assets_rejects_other_tokens() {
        for line in [
            "relative_assets = \"yes\"",
            "relative_assets = \"true\"",
            "relative_assets = yes",
            "relative_assets = :true",
        ] {
            let err = BuildConfiguration::from_str_in(line, project()).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidBooleanValue, "{line}");
        }
    }

    #[test]
    fn import_paths_accumulate_in_order() {
        let config =
            BuildConfiguration::from_str_in("add_import_path \"../sass\"", project()).unwrap();
        assert_eq!(config.additional_import_paths(), ["../sass"]);

        let config = BuildConfiguration::from_str_in(
            "add_import_path \"../sass\"\nadd_import_path \"vendor\"",
            project(),
        )
        .unwrap();
        assert_eq!(config.additional_import_paths(), ["../sass", "vendor"]);
    }

    #[test]
    fn import_paths_resolve_against_sass_parent() {
        let config = BuildConfiguration::from_str_in(
            "add_import_path \"../sass\"\nsass_dir = \"styles/src\"",
            project(),
        )
        .unwrap();
        assert_eq!(
            config.resolved_import_paths(),
            vec![path::PathBuf::from("/project/sass")]
        );
    }

    #[test]
    fn unknown_option_is_rejected() {
        let err = BuildConfiguration::from_str_in(
            "http_path = \"/\"\nfonts_dir = \"fonts\"",
            project(),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownOption);
        assert_eq!(err.key(), Some("fonts_dir"));
        assert_eq!(err.line(), 2);
    }

    #[test]
    fn path_requires_string() {
        let err = BuildConfiguration::from_str_in("css_dir = :css", project()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax);
        assert_eq!(err.key(), Some("css_dir"));
    }

    #[test]
    fn empty_path_is_rejected() {
        let err = BuildConfiguration::from_str_in("images_dir = \"\"", project()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PathResolutionError);
        assert_eq!(err.key(), Some("images_dir"));

        let err =
            BuildConfiguration::from_str_in("add_import_path ''", project()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PathResolutionError);
    }

    #[test]
    fn last_assignment_wins() {
        let config = BuildConfiguration::from_str_in(
            "output_style = :nested\noutput_style = :compressed",
            project(),
        )
        .unwrap();
        assert_eq!(config.output_style(), OutputStyle::Compressed);
    }

    #[test]
    fn display_round_trips() {
        let original = BuildConfiguration::from_str_in(
            r#"
http_path = "/static/"
css_dir = "../demo/css"
sass_dir = "src"
images_dir = "../demo/css/img"
javascripts_dir = "javascripts"
output_style = :compressed
add_import_path "../sass"
add_import_path "vendor \"quoted\""
relative_assets = false
"#,
            project(),
        )
        .unwrap();
        let rendered = original.to_string();
        let reloaded = BuildConfiguration::from_str_in(&rendered, project()).unwrap();
        assert_eq!(reloaded, original);
    }

    #[cfg(unix)]
    #[test]
    fn display_round_trips_absolute_with_parent_dirs() {
        let original =
            BuildConfiguration::from_str_in("css_dir = \"/project/../x\"", project()).unwrap();
        assert_eq!(original.css_output_dir(), path::Path::new("/x"));
        let rendered = original.to_string();
        assert!(rendered.contains("css_dir = \"/x\"\n"), "{rendered}");
        let reloaded = BuildConfiguration::from_str_in(&rendered, project()).unwrap();
        assert_eq!(reloaded, original);
    }

    #[cfg(unix)]
    #[test]
    fn root_with_parent_dir_resolves_from_real_parent() {
        let config = BuildConfiguration::from_str_in(
            "css_dir = \"../demo/css\"",
            "/work/site/sub/..",
        )
        .unwrap();
        assert_eq!(config.root(), path::Path::new("/work/site"));
        assert_eq!(config.css_output_dir(), path::Path::new("/work/demo/css"));
    }

    #[test]
    fn display_defaults() {
        let config = BuildConfiguration::with_root(project().to_owned());
        assert_eq!(
            config.to_string(),
            "http_path = \"/\"
css_dir = \"stylesheets\"
sass_dir = \"sass\"
images_dir = \"images\"
javascripts_dir = \"javascripts\"
output_style = :compact
relative_assets = true
"
        );
    }

    #[test]
    fn overrides_return_new_value() {
        let config = BuildConfiguration::with_root(project().to_owned());
        let overridden = config
            .clone()
            .with_output_style(OutputStyle::Nested)
            .with_relative_assets(false);
        assert_eq!(config.output_style(), OutputStyle::Compact);
        assert_eq!(overridden.output_style(), OutputStyle::Nested);
        assert!(!overridden.relative_assets());
    }

    #[test]
    fn test_from_file_ok() {
        let result = BuildConfiguration::from_file("tests/fixtures/config/config.rb").unwrap();
        let root = std::path::absolute("tests/fixtures/config").unwrap();
        assert_eq!(result.root(), root);
        assert_eq!(result.sass_source_dir(), root.join("src"));
        assert_eq!(result.output_style(), OutputStyle::Compact);
        assert_eq!(result.additional_import_paths(), ["../sass"]);
    }

    #[test]
    fn test_from_file_empty() {
        let result = BuildConfiguration::from_file("tests/fixtures/config/empty.rb").unwrap();
        let root = std::path::absolute("tests/fixtures/config").unwrap();
        assert_eq!(result, BuildConfiguration::with_root(root));
    }

    #[test]
    fn test_from_file_invalid_syntax() {
        let result = BuildConfiguration::from_file("tests/fixtures/config/invalid_syntax.rb");
        assert!(result.is_err());
    }

    #[test]
    fn test_from_file_not_found() {
        let result = BuildConfiguration::from_file("tests/fixtures/config/does_not_exist.rb");
        assert!(result.is_err());
    }
}
