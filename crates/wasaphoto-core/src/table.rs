//! Route table
//!
//! Built once from declarations, immutable afterwards. Path matching is
//! delegated to the `wasaphoto-router` trie; the table adds names, views,
//! metadata and the matched record chain.

use crate::location::{decode_component, Location, Query};
use crate::route::{join_paths, RouteDef, RouteRecord, ViewId};
use crate::{Error, Result};
use std::collections::HashMap;
use std::sync::Arc;
use wasaphoto_router::Router;

/// A location resolved against the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute {
    /// Path with query and hash, as it would appear after `#`
    pub full_path: String,
    /// Path only
    pub path: String,
    /// Name of the matched record, if it has one
    pub name: Option<String>,
    /// Decoded path parameters, in path order
    pub params: Vec<(String, String)>,
    pub query: Query,
    pub hash: Option<String>,
    matched: Vec<Arc<RouteRecord>>,
}

impl ResolvedRoute {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Matched records from the outermost ancestor to the matched record
    ///
    /// Never empty: only [`RouteTable::resolve`] builds a `ResolvedRoute`.
    pub fn matched(&self) -> &[Arc<RouteRecord>] {
        &self.matched
    }

    /// The matched record itself (last in the chain)
    pub fn record(&self) -> &RouteRecord {
        &self.matched[self.matched.len() - 1]
    }

    pub fn view(&self) -> &ViewId {
        &self.record().view
    }

    /// Whether any record in the chain is protected
    pub fn requires_auth(&self) -> bool {
        crate::guard::requires_auth(&self.matched)
    }
}

/// Immutable set of routes
#[derive(Debug)]
pub struct RouteTable {
    records: Vec<Arc<RouteRecord>>,
    router: Router<usize>,
    names: HashMap<String, usize>,
}

impl RouteTable {
    /// Flatten, validate and index the declarations
    ///
    /// Fails on malformed patterns, duplicate paths and duplicate names.
    pub fn new(defs: Vec<RouteDef>) -> Result<Self> {
        let mut flat = Vec::new();
        flatten(defs, None, "/", &mut flat);

        let mut router = Router::new();
        let mut names = HashMap::new();
        for record in &flat {
            router.insert(&record.path, record.index)?;
            if let Some(name) = &record.name {
                if names.insert(name.clone(), record.index).is_some() {
                    return Err(Error::DuplicateName(name.clone()));
                }
            }
        }

        tracing::debug!(routes = flat.len(), "route table built");

        Ok(Self {
            records: flat.into_iter().map(Arc::new).collect(),
            router,
            names,
        })
    }

    /// Resolve a location to a route and its matched record chain
    pub fn resolve(&self, location: impl Into<Location>) -> Result<ResolvedRoute> {
        let location = location.into();
        let found = self
            .router
            .find(&location.path)
            .ok_or_else(|| Error::NotFound(location.path.clone()))?;

        let index = *found.value;
        let params = found
            .params
            .into_iter()
            .map(|(k, v)| (k, decode_component(&v, false)))
            .collect();
        let matched = self.chain(index);
        let record = &self.records[index];

        tracing::debug!(path = %location.path, route = %record.path, "resolved");

        Ok(ResolvedRoute {
            full_path: location.full_path(),
            name: record.name.clone(),
            path: location.path,
            params,
            query: location.query,
            hash: location.hash,
            matched,
        })
    }

    /// Build the path of a named route
    ///
    /// # Example
    /// ```
    /// use wasaphoto_core::{Revision, RouteTable};
    ///
    /// let table = RouteTable::for_revision(Revision::Guarded).unwrap();
    /// let path = table.resolve_named("profile", &[("profileId", "42")]).unwrap();
    /// assert_eq!(path, "/profile/42");
    /// ```
    pub fn resolve_named(&self, name: &str, params: &[(&str, &str)]) -> Result<String> {
        let record = self
            .get(name)
            .ok_or_else(|| Error::UnknownRoute(name.to_string()))?;
        record.fill(params)
    }

    /// Look up a record by name
    pub fn get(&self, name: &str) -> Option<&RouteRecord> {
        self.names.get(name).map(|&i| self.records[i].as_ref())
    }

    /// All records in declaration order, parents before children
    pub fn records(&self) -> impl Iterator<Item = &RouteRecord> {
        self.records.iter().map(|r| r.as_ref())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn chain(&self, index: usize) -> Vec<Arc<RouteRecord>> {
        let mut chain = Vec::new();
        let mut cursor = Some(index);
        while let Some(i) = cursor {
            let record = &self.records[i];
            chain.push(Arc::clone(record));
            cursor = record.parent;
        }
        chain.reverse();
        chain
    }
}

fn flatten(defs: Vec<RouteDef>, parent: Option<usize>, base: &str, out: &mut Vec<RouteRecord>) {
    for def in defs {
        let index = out.len();
        let path = join_paths(base, &def.path);
        out.push(RouteRecord {
            index,
            path: path.clone(),
            name: def.name,
            view: def.view,
            meta: def.meta,
            parent,
        });
        flatten(def.children, Some(index), &path, out);
    }
}
