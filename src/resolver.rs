use crate::error::{Error, Result};
use crate::router::{RegistryEntry, Router, UrlPattern};
use log::debug;

/// A resolved route and the URL patterns belonging to it alone
#[derive(Debug, Clone, PartialEq)]
pub struct RouteDescriptor {
    /// Mount segments walked to reach the owning router
    pub mounts: Vec<String>,
    pub entry: RegistryEntry,
    pub patterns: Vec<UrlPattern>,
}

/// Resolve a slash-separated resource path such as `accounts/profile`.
///
/// Every segment but the last selects a child router by mount segment; the last one selects
/// an entry registered directly on the router reached. Any miss is `NotFound`.
pub fn resolve(router: &Router, path: &str) -> Result<RouteDescriptor> {
    let trimmed = path.trim_matches('/');
    let mut segments: Vec<&str> = trimmed.split('/').collect();
    // split always yields at least one item
    let route_name = segments.pop().unwrap_or_default();

    let mut current = router;
    for segment in &segments {
        current = current.child(segment).ok_or_else(|| {
            debug!("No router mounted at '{}' while resolving '{}'", segment, path);
            Error::not_found(trimmed)
        })?;
    }

    let entry = current.entry(route_name).ok_or_else(|| {
        debug!("No route '{}' while resolving '{}'", route_name, path);
        Error::not_found(trimmed)
    })?;

    Ok(RouteDescriptor {
        mounts: segments.iter().map(|s| s.to_string()).collect(),
        entry: entry.clone(),
        patterns: current.partial_urls(&[entry]),
    })
}
