use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw resolver configuration as read from a YAML or JSON file.
///
/// Nothing here is validated; see [`Settings`](super::Settings) for the
/// checked form the resolver consumes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// One of `production`, `profile`, `development`, `debug`, `trace`
    pub mode: Option<String>,
    pub pages: PagesConfig,
    /// Common headers. `None` selects the default no-cache headers, an empty
    /// list disables common headers.
    pub headers: Option<Vec<HeaderDecl>>,
    /// Type manifest fed to the handler registry
    pub types: Vec<TypeDecl>,
}

/// The `pages:` block.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PagesConfig {
    pub package: String,
    pub automapping: bool,
    pub autobinding: bool,
    pub template_extensions: Vec<String>,
    pub skip_dirs: Vec<String>,
    pub page: Vec<RouteDeclRaw>,
    pub excludes: Vec<ExcludeDecl>,
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            package: String::new(),
            automapping: true,
            autobinding: true,
            template_extensions: default_template_extensions(),
            skip_dirs: default_skip_dirs(),
            page: Vec::new(),
            excludes: Vec::new(),
        }
    }
}

pub(crate) fn default_template_extensions() -> Vec<String> {
    vec![".htm".to_string(), ".jsp".to_string()]
}

pub(crate) fn default_skip_dirs() -> Vec<String> {
    vec!["WEB-INF".to_string()]
}

/// One `page:` declaration. Both attributes are optional here so a missing
/// one is reported by name instead of as a parse error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteDeclRaw {
    pub path: Option<String>,
    #[serde(rename = "type")]
    pub type_name: Option<String>,
    #[serde(default)]
    pub headers: Vec<HeaderDecl>,
}

/// A header declaration: `{ name, type, value }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HeaderDecl {
    pub name: Option<String>,
    /// `string` (default), `integer` or `date`
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub value: Option<ScalarValue>,
}

/// A YAML scalar that may be written with or without quotes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScalarValue {
    Integer(i64),
    Text(String),
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::Integer(v) => write!(f, "{v}"),
            ScalarValue::Text(v) => f.write_str(v),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExcludeDecl {
    /// One or more patterns separated by commas or whitespace
    pub pattern: Option<String>,
}

/// A type manifest entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDecl {
    pub name: String,
    /// `false` declares a loadable type that is not a page
    #[serde(default = "default_true")]
    pub page: bool,
    #[serde(default)]
    pub fields: Vec<FieldDecl>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub value_type: String,
}

fn default_true() -> bool {
    true
}

/// Top-level shape of a standalone manifest file (`--types`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TypeManifest {
    #[serde(default)]
    pub types: Vec<TypeDecl>,
}
