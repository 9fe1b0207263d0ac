use crate::router::Router;
use serde::{Deserialize, Serialize};

/// One entry of the resource listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceEntry {
    /// `"/" + prefix`
    pub path: String,
    /// Prefix with every '/' replaced by '-'
    pub name: String,
}

impl ResourceEntry {
    pub fn from_prefix(prefix: &str) -> Self {
        Self {
            path: format!("/{}", prefix),
            name: prefix.replace('/', "-"),
        }
    }
}

/// Top-level registry entries of `router`, in registration order. Child routers are ignored.
pub fn list_resources(router: &Router) -> Vec<ResourceEntry> {
    router
        .registry()
        .iter()
        .map(|entry| ResourceEntry::from_prefix(&entry.prefix))
        .collect()
}

/// Every registry entry of the tree, nested prefixes joined with their mount segments
pub fn list_all_resources(router: &Router) -> Vec<ResourceEntry> {
    router
        .full_registry()
        .iter()
        .map(|(prefix, _)| ResourceEntry::from_prefix(prefix))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::HandlerType;
    use crate::router::RouterBuilder;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn handler(name: &str) -> Arc<HandlerType> {
        Arc::new(HandlerType::new(name))
    }

    #[test]
    fn test_single_entry() {
        let router = RouterBuilder::new()
            .register("users", handler("UserView"), "users")
            .build()
            .unwrap();

        assert_eq!(
            list_resources(&router),
            vec![ResourceEntry {
                path: "/users".to_string(),
                name: "users".to_string(),
            }]
        );
    }

    #[test]
    fn test_slashes_become_dashes_and_children_are_ignored() {
        let router = RouterBuilder::new()
            .register("users", handler("UserView"), "users")
            .register("admin/logs", handler("LogView"), "logs")
            .mount(
                "accounts",
                RouterBuilder::new().register("profile", handler("ProfileView"), "profile"),
            )
            .build()
            .unwrap();

        let listed = list_resources(&router);
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[1].path, "/admin/logs");
        assert_eq!(listed[1].name, "admin-logs");
    }

    #[test]
    fn test_list_all_resources_includes_nested() {
        let router = RouterBuilder::new()
            .register("users", handler("UserView"), "users")
            .mount(
                "accounts",
                RouterBuilder::new().register("profile", handler("ProfileView"), "profile"),
            )
            .build()
            .unwrap();

        let names: Vec<String> = list_all_resources(&router).into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["users".to_string(), "accounts-profile".to_string()]);
    }
}
