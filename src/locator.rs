use crate::error::{Error, Result};
use crate::router::Router;
use log::debug;
use std::sync::Arc;

/// A configured router, as listed in the API router settings
#[derive(Debug, Clone)]
pub struct RouterDescriptor {
    /// Identifier the router was configured under
    pub name: String,
    pub router: Arc<Router>,
}

/// Hands out the router serving a given API version.
///
/// Only a single unversioned API is supported: the first configured router serves it and
/// any explicit version is rejected.
#[derive(Debug, Clone, Default)]
pub struct RouterLocator {
    routers: Vec<RouterDescriptor>,
}

impl RouterLocator {
    pub fn new(routers: Vec<RouterDescriptor>) -> Self {
        Self { routers }
    }

    /// Locator serving a single router
    pub fn single(name: impl Into<String>, router: Router) -> Self {
        Self::new(vec![RouterDescriptor {
            name: name.into(),
            router: Arc::new(router),
        }])
    }

    pub fn routers(&self) -> &[RouterDescriptor] {
        &self.routers
    }

    /// Router for `version`; `None` and the empty string select the default API.
    pub fn locate(&self, version: Option<&str>) -> Result<Arc<Router>> {
        if let Some(version) = version.filter(|v| !v.is_empty()) {
            return Err(Error::UnsupportedVersion(version.to_string()));
        }

        let descriptor = self
            .routers
            .first()
            .ok_or_else(|| Error::configuration("no API routers are configured"))?;

        debug!("Located router '{}'", descriptor.name);
        Ok(Arc::clone(&descriptor.router))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::RouterBuilder;

    #[test]
    fn test_default_version_returns_first_router() {
        let first = RouterBuilder::new().build().unwrap();
        let second = RouterBuilder::new().build().unwrap();
        let locator = RouterLocator::new(vec![
            RouterDescriptor {
                name: "first".to_string(),
                router: Arc::new(first),
            },
            RouterDescriptor {
                name: "second".to_string(),
                router: Arc::new(second),
            },
        ]);

        let located = locator.locate(None).unwrap();
        assert!(Arc::ptr_eq(&located, &locator.routers()[0].router));
        assert!(Arc::ptr_eq(&locator.locate(Some("")).unwrap(), &located));
    }

    #[test]
    fn test_explicit_version_is_unsupported() {
        let locator = RouterLocator::single("api", RouterBuilder::new().build().unwrap());

        match locator.locate(Some("v2")) {
            Err(Error::UnsupportedVersion(version)) => assert_eq!(version, "v2"),
            other => panic!("expected UnsupportedVersion, got {:?}", other),
        }
    }

    #[test]
    fn test_explicit_version_is_unsupported_without_routers() {
        let locator = RouterLocator::default();
        assert!(matches!(locator.locate(Some("v1")), Err(Error::UnsupportedVersion(_))));
    }

    #[test]
    fn test_missing_configuration() {
        let locator = RouterLocator::default();
        assert!(matches!(locator.locate(None), Err(Error::Configuration(_))));
    }
}
