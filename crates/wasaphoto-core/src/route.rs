//! Route declarations
//!
//! [`RouteDef`] is what the application writes down; [`RouteRecord`] is the
//! flattened form the table keeps, with absolute paths and parent links.

use crate::location::encode_component;
use crate::{Error, Result};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

/// Opaque identifier of the view component rendered for a route
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ViewId(Cow<'static, str>);

impl ViewId {
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-route metadata
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteMeta {
    /// Only authenticated sessions may enter this route or its children
    pub requires_auth: bool,
    /// Free-form flags for views (page titles, layout hints)
    pub extra: BTreeMap<String, String>,
}

impl RouteMeta {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.extra.get(key).map(|s| s.as_str())
    }
}

/// A route as declared by the application
#[derive(Debug, Clone)]
pub struct RouteDef {
    /// Pattern; relative to the parent when nested and not starting with `/`
    pub path: String,
    pub name: Option<String>,
    pub view: ViewId,
    pub meta: RouteMeta,
    pub children: Vec<RouteDef>,
}

impl RouteDef {
    pub fn new(path: impl Into<String>, view: ViewId) -> Self {
        Self {
            path: path.into(),
            name: None,
            view,
            meta: RouteMeta::default(),
            children: Vec::new(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn requires_auth(mut self) -> Self {
        self.meta.requires_auth = true;
        self
    }

    pub fn meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.meta.extra.insert(key.into(), value.into());
        self
    }

    pub fn children(mut self, children: Vec<RouteDef>) -> Self {
        self.children = children;
        self
    }
}

/// A flattened route held by the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRecord {
    /// Position in the table, in declaration order (parents first)
    pub index: usize,
    /// Absolute path pattern
    pub path: String,
    pub name: Option<String>,
    pub view: ViewId,
    pub meta: RouteMeta,
    /// Index of the enclosing record for nested declarations
    pub parent: Option<usize>,
}

impl RouteRecord {
    /// Names of the `:param` and `*wildcard` segments, in path order
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.path.split('/').filter_map(|seg| {
            seg.strip_prefix(':').or_else(|| {
                seg.strip_prefix('*')
                    .map(|name| if name.is_empty() { "*" } else { name })
            })
        })
    }

    /// Substitute parameters into the pattern
    ///
    /// Values are percent-encoded; wildcard values keep their `/`.
    pub fn fill(&self, params: &[(&str, &str)]) -> Result<String> {
        let lookup = |name: &str| {
            params
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| *v)
                .ok_or_else(|| Error::MissingParam {
                    route: self.name.clone().unwrap_or_else(|| self.path.clone()),
                    param: name.to_string(),
                })
        };

        let mut segments = Vec::new();
        for seg in self.path.split('/').filter(|s| !s.is_empty()) {
            if let Some(name) = seg.strip_prefix(':') {
                segments.push(encode_component(lookup(name)?));
            } else if let Some(name) = seg.strip_prefix('*') {
                let name = if name.is_empty() { "*" } else { name };
                let value = lookup(name)?;
                let encoded: Vec<String> = value
                    .split('/')
                    .filter(|s| !s.is_empty())
                    .map(encode_component)
                    .collect();
                segments.push(encoded.join("/"));
            } else {
                segments.push(seg.to_string());
            }
        }
        Ok(format!("/{}", segments.join("/")))
    }
}

/// Join a nested path onto its parent's absolute path
pub(crate) fn join_paths(parent: &str, child: &str) -> String {
    if child.starts_with('/') {
        return child.to_string();
    }
    let parent = parent.trim_end_matches('/');
    if child.is_empty() {
        return if parent.is_empty() {
            "/".to_string()
        } else {
            parent.to_string()
        };
    }
    format!("{}/{}", parent, child)
}
