//! wasaphoto-router: Zero-dependency segment trie path matcher
//!
//! Matches client-side paths (the part after `#` in hash history) against
//! the patterns declared by the route table in `wasaphoto-core`.
//!
//! ## Path Syntax
//! - `:name` - Named parameter (captures one segment)
//! - `*` or `*name` - Wildcard (captures remaining path, last segment only)
//!
//! ## Priority
//! 1. Exact static match (highest)
//! 2. Parameter match
//! 3. Wildcard match (lowest)
//!
//! Empty segments are dropped on both insert and lookup, so `/stream/`
//! and `/stream` are the same path.
//!
//! ## Example
//! ```
//! use wasaphoto_router::Router;
//!
//! let mut router = Router::new();
//! router.insert("/stream", 0).unwrap();
//! router.insert("/profile/:profileId", 1).unwrap();
//!
//! let m = router.find("/profile/42").unwrap();
//! assert_eq!(*m.value, 1);
//! assert_eq!(m.param("profileId"), Some("42"));
//! ```

use std::collections::HashMap;
use std::fmt;

/// Route match result
#[derive(Debug, Clone, PartialEq)]
pub struct Match<'r, T> {
    /// The value stored for the matched pattern
    pub value: &'r T,
    /// Captured path parameters as (name, value) pairs, in path order
    pub params: Vec<(String, String)>,
}

impl<T> Match<'_, T> {
    /// Look up a captured parameter by name
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Get params as HashMap for convenient access
    pub fn params_map(&self) -> HashMap<String, String> {
        self.params.iter().cloned().collect()
    }
}

/// Reasons a pattern cannot be inserted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertError {
    /// The same pattern (modulo parameter names) is already registered
    Duplicate(String),
    /// A parameter at this position already exists under another name
    ConflictingParam {
        pattern: String,
        existing: String,
        new: String,
    },
    /// A wildcard segment was followed by more segments
    WildcardNotLast(String),
    /// `:` with no name
    EmptyParam(String),
}

impl fmt::Display for InsertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InsertError::Duplicate(p) => write!(f, "pattern already registered: {}", p),
            InsertError::ConflictingParam {
                pattern,
                existing,
                new,
            } => write!(
                f,
                "parameter :{} in {} conflicts with existing parameter :{}",
                new, pattern, existing
            ),
            InsertError::WildcardNotLast(p) => {
                write!(f, "wildcard must be the last segment: {}", p)
            }
            InsertError::EmptyParam(p) => write!(f, "empty parameter name in {}", p),
        }
    }
}

impl std::error::Error for InsertError {}

/// Trie node for path segment matching
#[derive(Debug)]
struct Node<T> {
    /// Static children (key = path segment)
    children: HashMap<String, Node<T>>,
    /// Parameter child (:id)
    param_child: Option<Box<ParamNode<T>>>,
    /// Wildcard child (*path)
    wildcard_child: Option<Box<WildcardNode<T>>>,
    /// Value if this is a terminal node
    value: Option<T>,
}

impl<T> Default for Node<T> {
    fn default() -> Self {
        Self {
            children: HashMap::new(),
            param_child: None,
            wildcard_child: None,
            value: None,
        }
    }
}

#[derive(Debug)]
struct ParamNode<T> {
    name: String,
    node: Node<T>,
}

#[derive(Debug)]
struct WildcardNode<T> {
    name: String,
    value: T,
}

/// Zero-dependency segment trie
///
/// One trie for the whole table; client-side navigation has no methods.
#[derive(Debug)]
pub struct Router<T> {
    root: Node<T>,
    len: usize,
}

impl<T> Default for Router<T> {
    fn default() -> Self {
        Self {
            root: Node::default(),
            len: 0,
        }
    }
}

impl<T> Router<T> {
    /// Create a new router
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a pattern
    ///
    /// # Example
    /// ```
    /// use wasaphoto_router::{InsertError, Router};
    ///
    /// let mut router = Router::new();
    /// router.insert("/users/:id", 0).unwrap();
    /// assert!(matches!(
    ///     router.insert("/users/:id", 1),
    ///     Err(InsertError::Duplicate(_))
    /// ));
    /// ```
    pub fn insert(&mut self, pattern: &str, value: T) -> Result<(), InsertError> {
        let segments = split(pattern);
        if let Some(pos) = segments.iter().position(|s| s.starts_with('*')) {
            if pos + 1 != segments.len() {
                return Err(InsertError::WildcardNotLast(pattern.to_string()));
            }
        }
        Self::insert_node(&mut self.root, &segments, pattern, value)?;
        self.len += 1;
        Ok(())
    }

    fn insert_node(
        node: &mut Node<T>,
        segments: &[&str],
        pattern: &str,
        value: T,
    ) -> Result<(), InsertError> {
        if segments.is_empty() {
            if node.value.is_some() {
                return Err(InsertError::Duplicate(pattern.to_string()));
            }
            node.value = Some(value);
            return Ok(());
        }

        let segment = segments[0];
        let rest = &segments[1..];

        if let Some(name) = segment.strip_prefix(':') {
            if name.is_empty() {
                return Err(InsertError::EmptyParam(pattern.to_string()));
            }
            let param = node.param_child.get_or_insert_with(|| {
                Box::new(ParamNode {
                    name: name.to_string(),
                    node: Node::default(),
                })
            });
            if param.name != name {
                return Err(InsertError::ConflictingParam {
                    pattern: pattern.to_string(),
                    existing: param.name.clone(),
                    new: name.to_string(),
                });
            }
            Self::insert_node(&mut param.node, rest, pattern, value)
        } else if let Some(name) = segment.strip_prefix('*') {
            if node.wildcard_child.is_some() {
                return Err(InsertError::Duplicate(pattern.to_string()));
            }
            let wildcard_name = if name.is_empty() { "*" } else { name };
            node.wildcard_child = Some(Box::new(WildcardNode {
                name: wildcard_name.to_string(),
                value,
            }));
            Ok(())
        } else {
            let child = node.children.entry(segment.to_string()).or_default();
            Self::insert_node(child, rest, pattern, value)
        }
    }

    /// Find a matching pattern for a concrete path
    ///
    /// Returns `None` if nothing matches. Parameter values are returned
    /// exactly as they appear in the path; decoding is the caller's job.
    pub fn find(&self, path: &str) -> Option<Match<'_, T>> {
        let segments = split(path);
        let mut params = Vec::new();
        Self::find_node(&self.root, &segments, &mut params)
    }

    fn find_node<'r>(
        node: &'r Node<T>,
        segments: &[&str],
        params: &mut Vec<(String, String)>,
    ) -> Option<Match<'r, T>> {
        if segments.is_empty() {
            return node.value.as_ref().map(|value| Match {
                value,
                params: params.clone(),
            });
        }

        let segment = segments[0];
        let rest = &segments[1..];

        // Priority 1: exact static match
        if let Some(child) = node.children.get(segment) {
            if let Some(m) = Self::find_node(child, rest, params) {
                return Some(m);
            }
        }

        // Priority 2: parameter match
        if let Some(ref param) = node.param_child {
            params.push((param.name.clone(), segment.to_string()));
            if let Some(m) = Self::find_node(&param.node, rest, params) {
                return Some(m);
            }
            params.pop();
        }

        // Priority 3: wildcard, captures everything left
        if let Some(ref wildcard) = node.wildcard_child {
            params.push((wildcard.name.clone(), segments.join("/")));
            return Some(Match {
                value: &wildcard.value,
                params: params.clone(),
            });
        }

        None
    }

    /// Number of registered patterns
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

fn split(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}
