//! Router Swagger - Swagger 1.2 documentation for nested router trees.
//!
//! This library renders the documents a Swagger UI consumes (resource listing, per-resource
//! API declarations and UI client configuration) by walking an in-memory router tree whose
//! entries point at declared handler types.
//!
//! # Architecture
//!
//! 1. [`config`] - Loads settings, handlers, models and router definitions from YAML/JSON
//! 2. [`router`] - Immutable router tree and URL pattern generation
//! 3. [`locator`] - Hands out the router serving the (single, unversioned) API
//! 4. [`lister`] - Resource listing entries from a router's registry
//! 5. [`resolver`] - Resolves `a/b/c` resource paths through nested routers
//! 6. [`docgen`] - Turns URL patterns into Swagger operations and models
//! 7. [`views`] - The UI, listing and declaration endpoints with status mapping
//! 8. [`serializer`] - Writes documents as JSON or YAML
//!
//! # Example Usage
//!
//! ```
//! use router_swagger::config::ApiConfig;
//! use router_swagger::views::{DocsRequest, DocsService};
//!
//! let config = ApiConfig::from_yaml_str(r#"
//! api_routers: [{router: main}]
//! routers:
//!   main:
//!     registry: [{prefix: users, handler: UserView}]
//! handlers:
//!   UserView:
//!     collection_methods: [get]
//! "#).unwrap();
//!
//! let service = DocsService::from_config(&config).unwrap();
//! let response = service.handle(&DocsRequest::new("http://localhost:8000", "/api-docs/users"));
//! assert_eq!(response.status, 200);
//! assert_eq!(response.body["apis"][0]["path"], "/users/");
//! ```

pub mod cli;
pub mod config;
pub mod docgen;
pub mod error;
pub mod handler;
pub mod lister;
pub mod locator;
pub mod permissions;
pub mod resolver;
pub mod router;
pub mod schema_generator;
pub mod serializer;
pub mod type_resolver;
pub mod views;
