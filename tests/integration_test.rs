use pretty_assertions::assert_eq;
use router_swagger::{
    config::ApiConfig,
    error::Error,
    handler::{HandlerType, HttpMethod},
    lister::{list_resources, ResourceEntry},
    locator::RouterLocator,
    permissions::Principal,
    resolver::resolve,
    router::RouterBuilder,
    serializer::{serialize_json, serialize_yaml},
    views::{DocsRequest, DocsService},
};
use std::path::Path;
use std::sync::Arc;

/// Helper function to load the fixture configuration
fn fixture_config() -> ApiConfig {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/api.yaml");
    ApiConfig::load(&path).expect("Failed to load fixture configuration")
}

fn fixture_service() -> DocsService {
    DocsService::from_config(&fixture_config()).expect("Failed to build service")
}

#[test]
fn test_single_resource_scenario() {
    let router = RouterBuilder::new()
        .register("users", Arc::new(HandlerType::new("UserView")), "users")
        .build()
        .unwrap();

    assert_eq!(
        list_resources(&router),
        vec![ResourceEntry {
            path: "/users".to_string(),
            name: "users".to_string(),
        }]
    );
    assert_eq!(resolve(&router, "users").unwrap().entry.handler.name, "UserView");
    assert!(matches!(resolve(&router, "users/extra"), Err(Error::NotFound(_))));
}

#[test]
fn test_nested_resource_scenario() {
    let profile = Arc::new(HandlerType::new("ProfileView").with_detail_methods(vec![HttpMethod::Get]));
    let root = RouterBuilder::new()
        .mount("accounts", RouterBuilder::new().register("profile", profile, "profile"))
        .build()
        .unwrap();

    assert_eq!(resolve(&root, "accounts/profile").unwrap().entry.handler.name, "ProfileView");
    assert!(matches!(resolve(&root, "profile"), Err(Error::NotFound(_))));
}

#[test]
fn test_non_default_version_is_always_unsupported() {
    let service = fixture_service();
    for version in ["v1", "2", "latest"] {
        assert!(matches!(
            service.resource_listing("http://h/api-docs/", Some(version)),
            Err(Error::UnsupportedVersion(_))
        ));
        assert!(matches!(
            service.api_declaration("users", "http://h", Some(version)),
            Err(Error::UnsupportedVersion(_))
        ));
    }

    let empty = RouterLocator::default();
    assert!(matches!(empty.locate(Some("v1")), Err(Error::UnsupportedVersion(_))));
}

#[test]
fn test_fixture_resource_listing() {
    let listing = fixture_service()
        .resource_listing("http://localhost:8000/docs/api-docs/", None)
        .unwrap();

    assert_eq!(listing.api_version, "1.0");
    assert_eq!(listing.swagger_version, "1.2");
    assert_eq!(listing.base_path, "http://localhost:8000/docs/api-docs");
    let paths: Vec<&str> = listing.apis.iter().map(|e| e.path.as_str()).collect();
    assert_eq!(paths, vec!["/users", "/groups"]);
}

#[test]
fn test_fixture_deeply_nested_declaration() {
    let declaration = fixture_service()
        .api_declaration("accounts/teams/members", "http://localhost:8000", None)
        .unwrap();

    assert_eq!(declaration.base_path, "http://localhost:8000/api");
    assert_eq!(declaration.apis.len(), 1);
    let api = &declaration.apis[0];
    assert_eq!(api.path, "/accounts/{account_pk}/teams/{team_pk}/members/");

    let list = &api.operations[0];
    assert_eq!(list.nickname, "list");
    let params: Vec<&str> = list.parameters.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(params, vec!["account_pk", "team_pk"]);
    assert_eq!(
        declaration.models.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["Group", "User"]
    );
}

#[test]
fn test_fixture_custom_lookup_field() {
    let declaration = fixture_service()
        .api_declaration("accounts/profile", "http://localhost:8000", None)
        .unwrap();

    let api = &declaration.apis[0];
    assert_eq!(api.path, "/accounts/{account_pk}/profile/{slug}/");
    let methods: Vec<&str> = api.operations.iter().map(|op| op.method.as_str()).collect();
    assert_eq!(methods, vec!["GET", "PATCH"]);
    assert!(api.operations[0].response_messages.iter().any(|m| m.code == 404));

    // Profile references User, which references Group
    assert_eq!(declaration.models.len(), 3);
    assert_eq!(declaration.models["Profile"].required, vec!["owner"]);
}

#[test]
fn test_fixture_extra_action() {
    let declaration = fixture_service()
        .api_declaration("users", "http://localhost:8000", None)
        .unwrap();

    let paths: Vec<&str> = declaration.apis.iter().map(|api| api.path.as_str()).collect();
    assert_eq!(paths, vec!["/users/", "/users/{pk}/", "/users/{pk}/set_password/"]);

    let set_password = &declaration.apis[2].operations[0];
    assert_eq!(set_password.method, "POST");
    assert_eq!(set_password.nickname, "set_password");
    let password = set_password
        .parameters
        .iter()
        .find(|p| p.name == "password")
        .expect("password parameter");
    assert_eq!(password.param_type, "form");
    assert!(set_password.parameters.iter().all(|p| p.param_type != "body"));
}

#[test]
fn test_every_missing_segment_is_not_found() {
    let service = fixture_service();
    for path in [
        "missing",
        "users/extra",
        "profile",
        "accounts/members",
        "accounts/teams",
        "accounts/teams/missing",
        "teams/members",
    ] {
        match service.api_declaration(path, "http://h", None) {
            Err(Error::NotFound(_)) => {}
            other => panic!("expected NotFound for '{}', got {:?}", path, other.map(|d| d.apis.len())),
        }
    }
}

#[test]
fn test_declaration_is_deterministic() {
    let service = fixture_service();
    let first = serialize_json(&service.api_declaration("users", "http://h", None).unwrap()).unwrap();
    let second = serialize_json(&service.api_declaration("users", "http://h", None).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_http_surface() {
    let service = fixture_service();
    let host = "https://api.example.com";

    let anonymous_ui = service.handle(&DocsRequest::new(host, "/"));
    assert_eq!(anonymous_ui.status, 200);
    assert_eq!(anonymous_ui.body["api_key"], "demo-key");
    assert_eq!(
        anonymous_ui.body["enabled_methods"],
        serde_json::json!(["get", "post", "patch", "delete"])
    );

    let listing = service.handle(&DocsRequest::new(host, "/api-docs/"));
    assert_eq!(listing.status, 200);
    assert_eq!(listing.body["apis"][1]["name"], "groups");

    let declaration = service.handle(&DocsRequest::new(host, "/api-docs/accounts/profile"));
    assert_eq!(declaration.status, 200);
    assert_eq!(declaration.body["models"]["User"]["properties"]["joined"]["format"], "date-time");
    assert_eq!(declaration.body["models"]["User"]["properties"]["role"]["enum"][0], "admin");

    let missing = service.handle(&DocsRequest::new(host, "/api-docs/accounts/nothing"));
    assert_eq!(missing.status, 404);
    assert!(missing.body["detail"].is_string());
}

#[test]
fn test_ui_requires_superuser_when_configured() {
    let mut config = fixture_config();
    config.swagger.is_superuser = true;
    config.swagger.is_authenticated = true;
    let service = DocsService::from_config(&config).unwrap();

    let request = DocsRequest::new("http://h", "/").with_principal(Principal::authenticated());
    assert_eq!(service.handle(&request).status, 403);

    let request = DocsRequest::new("http://h", "/").with_principal(Principal::superuser());
    assert_eq!(service.handle(&request).status, 200);
}

#[test]
fn test_declaration_serializes_to_yaml() {
    let declaration = fixture_service()
        .api_declaration("groups", "http://localhost:8000", None)
        .unwrap();
    let yaml = serialize_yaml(&declaration).unwrap();

    assert!(yaml.contains("basePath:"));
    assert!(yaml.contains("nickname: list"));
    assert!(yaml.contains("models:"));
}
