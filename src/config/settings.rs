use super::types::{
    default_skip_dirs, default_template_extensions, HeaderDecl, ResolverConfig,
};
use crate::error::ResolveError;
use crate::headers::{HeaderValue, PageHeaders};
use crate::mode::Mode;

/// An explicitly configured route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDecl {
    pub path: String,
    /// Type name, relative to the package unless the package is empty
    pub type_name: String,
    /// Per-route headers, merged over the common headers
    pub headers: PageHeaders,
}

impl RouteDecl {
    pub fn new(path: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            type_name: type_name.into(),
            headers: PageHeaders::new(),
        }
    }

    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl Into<HeaderValue>) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// Validated resolver settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub mode: Mode,
    pub package: String,
    pub automapping: bool,
    pub autobinding: bool,
    pub common_headers: PageHeaders,
    pub explicit_routes: Vec<RouteDecl>,
    /// Raw exclusion pattern strings
    pub exclusions: Vec<String>,
    /// Extensions of resources considered for automapping, with the dot
    pub template_extensions: Vec<String>,
    /// Directory names never scanned
    pub skip_dirs: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            package: String::new(),
            automapping: true,
            autobinding: true,
            common_headers: PageHeaders::default_common(),
            explicit_routes: Vec::new(),
            exclusions: Vec::new(),
            template_extensions: default_template_extensions(),
            skip_dirs: default_skip_dirs(),
        }
    }
}

impl Settings {
    /// Default settings for `mode` and `package`.
    #[must_use]
    pub fn new(mode: Mode, package: &str) -> Self {
        Self {
            mode,
            package: package.to_string(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_route(mut self, route: RouteDecl) -> Self {
        self.explicit_routes.push(route);
        self
    }

    #[must_use]
    pub fn with_exclusion(mut self, pattern: impl Into<String>) -> Self {
        self.exclusions.push(pattern.into());
        self
    }

    #[must_use]
    pub fn with_common_headers(mut self, headers: PageHeaders) -> Self {
        self.common_headers = headers;
        self
    }

    #[must_use]
    pub fn with_automapping(mut self, enabled: bool) -> Self {
        self.automapping = enabled;
        self
    }

    /// Apply the `PAGEROUTER_MODE` environment override.
    #[must_use]
    pub fn with_env_override(mut self) -> Self {
        self.mode = self.mode.with_env_override();
        self
    }

    /// True if `path` ends in one of the template extensions.
    #[must_use]
    pub fn is_template(&self, path: &str) -> bool {
        self.template_extensions
            .iter()
            .any(|ext| path.ends_with(ext.as_str()))
    }
}

fn parse_headers(decls: &[HeaderDecl]) -> Result<PageHeaders, ResolveError> {
    let mut headers = PageHeaders::new();
    for decl in decls {
        let name = decl
            .name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .ok_or(ResolveError::MissingRequiredAttribute {
                element: "header".to_string(),
                attribute: "name",
            })?;
        let raw = decl
            .value
            .as_ref()
            .ok_or_else(|| ResolveError::MissingRequiredAttribute {
                element: format!("header '{name}'"),
                attribute: "value",
            })?
            .to_string();
        let value = HeaderValue::parse(name, decl.kind.as_deref(), &raw)?;
        headers.insert(name.trim(), value);
    }
    Ok(headers)
}

impl TryFrom<&ResolverConfig> for Settings {
    type Error = ResolveError;

    fn try_from(config: &ResolverConfig) -> Result<Self, Self::Error> {
        let pages = &config.pages;
        let mode = config.mode.as_deref().map(Mode::parse).unwrap_or_default();

        let common_headers = match &config.headers {
            Some(decls) => parse_headers(decls)?,
            None => PageHeaders::default_common(),
        };

        let explicit_routes = pages
            .page
            .iter()
            .map(|raw| {
                let path = raw
                    .path
                    .as_deref()
                    .filter(|p| !p.trim().is_empty())
                    .ok_or(ResolveError::MissingRequiredAttribute {
                        element: "page".to_string(),
                        attribute: "path",
                    })?;
                let type_name = raw
                    .type_name
                    .as_deref()
                    .filter(|t| !t.trim().is_empty())
                    .ok_or_else(|| ResolveError::MissingRequiredAttribute {
                        element: format!("page '{path}'"),
                        attribute: "type",
                    })?;
                Ok(RouteDecl {
                    path: path.trim().to_string(),
                    type_name: type_name.trim().to_string(),
                    headers: parse_headers(&raw.headers)?,
                })
            })
            .collect::<Result<Vec<_>, ResolveError>>()?;

        let exclusions = pages
            .excludes
            .iter()
            .map(|decl| {
                decl.pattern
                    .clone()
                    .ok_or(ResolveError::MissingRequiredAttribute {
                        element: "excludes".to_string(),
                        attribute: "pattern",
                    })
            })
            .collect::<Result<Vec<_>, ResolveError>>()?;

        Ok(Settings {
            mode,
            package: pages.package.clone(),
            automapping: pages.automapping,
            autobinding: pages.autobinding,
            common_headers,
            explicit_routes,
            exclusions,
            template_extensions: pages.template_extensions.clone(),
            skip_dirs: pages.skip_dirs.clone(),
        })
    }
}

impl TryFrom<ResolverConfig> for Settings {
    type Error = ResolveError;

    fn try_from(config: ResolverConfig) -> Result<Self, Self::Error> {
        Settings::try_from(&config)
    }
}
