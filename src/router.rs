//! Router tree.
//!
//! A [`Router`] owns an ordered registry of `(prefix, handler, basename)` entries and a set of
//! child routers, each mounted under a path segment of its parent. The tree is assembled
//! with a [`RouterBuilder`] once at startup and is read-only afterwards.
//!
//! Nested routers follow the usual nested-resource URL layout: a child mounted at
//! `accounts` with lookup `account` serves its own entries below
//! `/accounts/{account_pk}/`.
//!
//! ```
//! use router_swagger::handler::{HandlerType, HttpMethod};
//! use router_swagger::router::RouterBuilder;
//! use std::sync::Arc;
//!
//! let profile = Arc::new(HandlerType::new("ProfileViewSet").with_detail_methods(vec![HttpMethod::Get]));
//! let router = RouterBuilder::new()
//!     .mount("accounts", RouterBuilder::new().register("profile", profile, "profile"))
//!     .build()
//!     .unwrap();
//!
//! let accounts = router.child("accounts").unwrap();
//! let patterns = accounts.partial_urls(&[accounts.entry("profile").unwrap()]);
//! assert_eq!(patterns[0].path, "/accounts/{accounts_pk}/profile/{pk}/");
//! ```

use crate::error::{Error, Result};
use crate::handler::{ExtraAction, HandlerType, HttpMethod, Parameter};
use log::debug;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

/// One registered route of a router.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistryEntry {
    /// Path segment the handler is registered under
    pub prefix: String,
    pub handler: Arc<HandlerType>,
    /// Base used to name the generated URL patterns
    pub basename: String,
}

/// An immutable router node.
#[derive(Debug, Clone)]
pub struct Router {
    registry: Vec<RegistryEntry>,
    children: BTreeMap<String, Router>,
    /// URL prefix shared by every pattern of this router, empty or ending in '/'
    base: String,
    trailing_slash: bool,
}

impl Router {
    /// Registry entries in registration order
    pub fn registry(&self) -> &[RegistryEntry] {
        &self.registry
    }

    /// Registry entry registered directly on this router under `prefix`
    pub fn entry(&self, prefix: &str) -> Option<&RegistryEntry> {
        self.registry.iter().find(|entry| entry.prefix == prefix)
    }

    /// Child router mounted under `segment`
    pub fn child(&self, segment: &str) -> Option<&Router> {
        self.children.get(segment)
    }

    /// URL prefix of this router relative to the root
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Flattened registry of this router and all descendants.
    ///
    /// Nested prefixes are joined with their mount segments, so an entry `profile` on the
    /// child mounted at `accounts` is reported as `accounts/profile`. Own entries come first,
    /// then children in mount-segment order.
    pub fn full_registry(&self) -> Vec<(String, &RegistryEntry)> {
        let mut entries: Vec<(String, &RegistryEntry)> = self
            .registry
            .iter()
            .map(|entry| (entry.prefix.clone(), entry))
            .collect();

        for (segment, child) in &self.children {
            for (prefix, entry) in child.full_registry() {
                entries.push((format!("{}/{}", segment, prefix), entry));
            }
        }

        entries
    }

    /// Generate the URL patterns of the given entries only.
    pub fn partial_urls(&self, entries: &[&RegistryEntry]) -> Vec<UrlPattern> {
        let mut patterns = Vec::new();

        for entry in entries {
            let handler = &entry.handler;
            let lookup = format!("{{{}}}", handler.lookup_field);

            if !handler.collection_methods.is_empty() {
                patterns.push(UrlPattern {
                    path: self.join(&[entry.prefix.as_str()]),
                    name: format!("{}-list", entry.basename),
                    handler: Arc::clone(handler),
                    operations: handler
                        .collection_methods
                        .iter()
                        .map(|method| RouteOperation::collection(*method))
                        .collect(),
                    parameters: Vec::new(),
                    description: None,
                });
            }

            if !handler.detail_methods.is_empty() {
                patterns.push(UrlPattern {
                    path: self.join(&[entry.prefix.as_str(), lookup.as_str()]),
                    name: format!("{}-detail", entry.basename),
                    handler: Arc::clone(handler),
                    operations: handler
                        .detail_methods
                        .iter()
                        .map(|method| RouteOperation::detail(*method))
                        .collect(),
                    parameters: Vec::new(),
                    description: None,
                });
            }

            for action in &handler.extra_actions {
                patterns.push(self.action_pattern(entry, action, &lookup));
            }
        }

        debug!(
            "Generated {} URL patterns under '/{}' for {} entries",
            patterns.len(),
            self.base,
            entries.len()
        );
        patterns
    }

    fn action_pattern(&self, entry: &RegistryEntry, action: &ExtraAction, lookup: &str) -> UrlPattern {
        let path = if action.detail {
            self.join(&[entry.prefix.as_str(), lookup, action.url_segment()])
        } else {
            self.join(&[entry.prefix.as_str(), action.url_segment()])
        };

        UrlPattern {
            path,
            name: format!("{}-{}", entry.basename, action.url_segment().replace('_', "-")),
            handler: Arc::clone(&entry.handler),
            operations: action
                .methods
                .iter()
                .map(|method| RouteOperation {
                    method: *method,
                    action: action.name.clone(),
                })
                .collect(),
            parameters: action.parameters.clone(),
            description: action.description.clone(),
        }
    }

    fn join(&self, parts: &[&str]) -> String {
        let mut path = format!("/{}", self.base);
        let tail: Vec<&str> = parts.iter().copied().filter(|part| !part.is_empty()).collect();
        path.push_str(&tail.join("/"));
        if self.trailing_slash && !path.ends_with('/') {
            path.push('/');
        }
        if !self.trailing_slash && path.len() > 1 && path.ends_with('/') && tail.is_empty() {
            path.pop();
        }
        path
    }
}

/// A generated URL pattern bound to a handler type.
#[derive(Debug, Clone, PartialEq)]
pub struct UrlPattern {
    /// Path template with `{name}` placeholders, always starting with '/'
    pub path: String,
    /// Pattern name, e.g. `users-list`
    pub name: String,
    pub handler: Arc<HandlerType>,
    pub operations: Vec<RouteOperation>,
    /// Parameters declared by an extra action
    pub parameters: Vec<Parameter>,
    pub description: Option<String>,
}

impl UrlPattern {
    /// Names of the `{…}` placeholders in the path, in order
    pub fn path_parameters(&self) -> Vec<&str> {
        self.path
            .split('/')
            .filter_map(|segment| segment.strip_prefix('{')?.strip_suffix('}'))
            .collect()
    }
}

/// A method bound to the handler action that serves it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteOperation {
    pub method: HttpMethod,
    /// Action name, e.g. `list` or `partial_update`
    pub action: String,
}

impl RouteOperation {
    fn collection(method: HttpMethod) -> Self {
        let action = match method {
            HttpMethod::Get => "list".to_string(),
            HttpMethod::Post => "create".to_string(),
            other => other.as_str().to_lowercase(),
        };
        Self { method, action }
    }

    fn detail(method: HttpMethod) -> Self {
        let action = match method {
            HttpMethod::Get => "retrieve".to_string(),
            HttpMethod::Put => "update".to_string(),
            HttpMethod::Patch => "partial_update".to_string(),
            HttpMethod::Delete => "destroy".to_string(),
            other => other.as_str().to_lowercase(),
        };
        Self { method, action }
    }
}

/// Mutable description of a router, turned into a [`Router`] by [`RouterBuilder::build`].
#[derive(Debug, Clone)]
pub struct RouterBuilder {
    registry: Vec<RegistryEntry>,
    children: Vec<ChildMount>,
    trailing_slash: bool,
}

#[derive(Debug, Clone)]
struct ChildMount {
    segment: String,
    lookup: String,
    router: RouterBuilder,
}

impl RouterBuilder {
    pub fn new() -> Self {
        Self {
            registry: Vec::new(),
            children: Vec::new(),
            trailing_slash: true,
        }
    }

    /// Whether generated paths end in '/'. Only the root setting is used; children inherit it.
    pub fn trailing_slash(mut self, trailing_slash: bool) -> Self {
        self.trailing_slash = trailing_slash;
        self
    }

    pub fn register(
        mut self,
        prefix: impl Into<String>,
        handler: Arc<HandlerType>,
        basename: impl Into<String>,
    ) -> Self {
        self.registry.push(RegistryEntry {
            prefix: prefix.into(),
            handler,
            basename: basename.into(),
        });
        self
    }

    /// Mount `router` under `segment`, using the segment itself as the lookup name
    pub fn mount(self, segment: impl Into<String>, router: RouterBuilder) -> Self {
        let segment = segment.into();
        let lookup = segment.clone();
        self.mount_with_lookup(segment, lookup, router)
    }

    /// Mount `router` under `segment`; its URLs are nested below `{segment}/{{lookup}_pk}/`
    pub fn mount_with_lookup(
        mut self,
        segment: impl Into<String>,
        lookup: impl Into<String>,
        router: RouterBuilder,
    ) -> Self {
        self.children.push(ChildMount {
            segment: segment.into(),
            lookup: lookup.into(),
            router,
        });
        self
    }

    /// Validate the tree and freeze it.
    ///
    /// Fails with a configuration error when a mount segment is empty, contains '/', or is
    /// used twice among siblings, or when a prefix is registered twice on the same router.
    pub fn build(self) -> Result<Router> {
        let trailing_slash = self.trailing_slash;
        self.build_at(String::new(), trailing_slash)
    }

    fn build_at(self, base: String, trailing_slash: bool) -> Result<Router> {
        let mut prefixes = HashSet::new();
        for entry in &self.registry {
            if !prefixes.insert(entry.prefix.as_str()) {
                return Err(Error::configuration(format!(
                    "prefix '{}' is registered twice under '/{}'",
                    entry.prefix, base
                )));
            }
        }

        let mut children = BTreeMap::new();
        for mount in self.children {
            if mount.segment.is_empty() || mount.segment.contains('/') {
                return Err(Error::configuration(format!(
                    "invalid mount segment '{}' under '/{}'",
                    mount.segment, base
                )));
            }
            if children.contains_key(&mount.segment) {
                return Err(Error::configuration(format!(
                    "mount segment '{}' is used twice under '/{}'",
                    mount.segment, base
                )));
            }

            let child_base = format!("{}{}/{{{}_pk}}/", base, mount.segment, mount.lookup);
            let child = mount.router.build_at(child_base, trailing_slash)?;
            children.insert(mount.segment, child);
        }

        Ok(Router {
            registry: self.registry,
            children,
            base,
            trailing_slash,
        })
    }
}

impl Default for RouterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
