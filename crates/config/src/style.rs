use std::fmt;
use std::str::FromStr;

/// Formatting density of the generated CSS.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(not(feature = "unstable"), non_exhaustive)]
pub enum OutputStyle {
    Nested,
    Expanded,
    #[default]
    Compact,
    Compressed,
}

impl OutputStyle {
    pub fn variants() -> &'static [&'static str] {
        &["nested", "expanded", "compact", "compressed"]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Nested => "nested",
            Self::Expanded => "expanded",
            Self::Compact => "compact",
            Self::Compressed => "compressed",
        }
    }
}

impl fmt::Display for OutputStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("`{0}` is not one of nested, expanded, compact, compressed")]
pub struct UnknownOutputStyle(String);

impl FromStr for OutputStyle {
    type Err = UnknownOutputStyle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nested" => Ok(Self::Nested),
            "expanded" => Ok(Self::Expanded),
            "compact" => Ok(Self::Compact),
            "compressed" => Ok(Self::Compressed),
            other => Err(UnknownOutputStyle(other.to_owned())),
        }
    }
}
