//! The checked-in `user_api` fixture is real generator output. These tests
//! keep it byte-identical to what the generator emits today, then compile it
//! into this test binary and serve it through the generated `AbstractApi`.

use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use abstractapi::generator::{generate_project, GenerateOptions, GeneratorConfig};
use abstractapi::server::SystemParam;
use serde_json::json;
use tempfile::TempDir;

mod common;
use common::http::{parse_response, request, send_request, ParsedResponse};
use common::test_server::setup_may_runtime;

#[path = "fixtures/user_api/src/abstract_api/mod.rs"]
mod abstract_api;
#[path = "fixtures/user_api/src/model/mod.rs"]
mod model;
#[path = "fixtures/user_api/src/schema/mod.rs"]
mod schema;

use abstract_api::api::DELETE_user__id::DELETE_user__id;
use abstract_api::api::GET_user__id::GET_user__id;
use abstract_api::api::POST_user::POST_user;
use abstract_api::server::{request_contract, AbstractApi};
use abstract_api::utility::ErrorParam;
use model::r#enum::Role::Role;
use model::table::User::User;

/// Set to rewrite the checked-in fixture after an intentional template change.
const UPDATE_ENV: &str = "ABSTRACTAPI_UPDATE_FIXTURES";

fn fixture_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/user_api")
}

#[test]
fn test_checked_in_fixture_matches_generator() {
    let fixture = fixture_dir();
    let out = TempDir::new().unwrap();
    let opts = GenerateOptions {
        spec: fixture.join("api.yaml"),
        models: Some(fixture.join("models.json")),
        schemas: Some(fixture.join("schemas.json")),
        output: out.path().to_path_buf(),
        config: GeneratorConfig::default(),
        dry_run: false,
    };
    let output = generate_project(&opts).unwrap();
    assert_eq!(output.files.len(), 7);

    let mut paths: Vec<String> = output.files.iter().map(|f| f.file_path.clone()).collect();
    paths.push("abstract_api/manifest.json".to_string());
    for rel in paths {
        let generated = fs::read_to_string(out.path().join(&rel)).unwrap();
        let checked_in = fixture.join("src").join(&rel);
        if std::env::var_os(UPDATE_ENV).is_some() {
            fs::write(&checked_in, &generated).unwrap();
            continue;
        }
        let expected = fs::read_to_string(&checked_in)
            .unwrap_or_else(|e| panic!("reading {}: {e}", checked_in.display()));
        assert_eq!(generated, expected, "{rel} drifted from the generator; rerun with {UPDATE_ENV}=1");
    }
}

fn lookup_user(id: i64, tenant: Option<String>, tags: Option<Vec<String>>) -> User {
    User {
        id,
        name: tenant.unwrap_or_else(|| "anonymous".to_string()),
        role: Role::Member,
        tags: tags.unwrap_or_default(),
    }
}

struct GeneratedServer {
    api: AbstractApi,
    addr: SocketAddr,
}

impl GeneratedServer {
    fn start() -> Self {
        setup_may_runtime();
        let mut api = AbstractApi::new();
        api.init(SystemParam::with_port(0)).unwrap();
        api.app().wait_ready().unwrap();
        let port = api.app().addr().unwrap().port();

        api.implement(GET_user__id::new(|req, error| match req.paths.id {
            7 => Ok(lookup_user(7, req.headers.x_tenant, req.query.tags)),
            _ => Err(error(ErrorParam::new(404).message("no such user")).into()),
        }))
        .unwrap();
        api.implement(POST_user::new(|req, _| {
            let body = req.body;
            if body.r#type.as_deref() == Some("ghost") {
                return Ok(None);
            }
            Ok(Some(User {
                id: 1,
                name: body.name,
                role: body.role,
                tags: body.profile.map(|p| vec![p.bio]).unwrap_or_default(),
            }))
        }))
        .unwrap();
        api.implement(DELETE_user__id::new(|req, _| Ok(req.paths.id == 7)))
            .unwrap();

        Self {
            api,
            addr: SocketAddr::from(([127, 0, 0, 1], port)),
        }
    }

    fn send(&self, raw: &str) -> ParsedResponse {
        parse_response(&send_request(&self.addr, raw))
    }
}

impl Drop for GeneratedServer {
    fn drop(&mut self) {
        self.api.stop();
    }
}

#[test]
fn test_generated_get_decodes_every_section() {
    let server = GeneratedServer::start();
    let res = server.send(&request("GET", "/user/%37?tags=a,b", &["x-tenant: acme"], None));
    assert_eq!(res.status, 200);
    assert_eq!(
        res.json(),
        json!({"id": 7, "name": "acme", "role": "member", "tags": ["a", "b"]})
    );

    let res = server.send(&request("GET", "/user/7", &[], None));
    assert_eq!(res.json()["name"], "anonymous");
}

#[test]
fn test_generated_error_helper_sets_status() {
    let server = GeneratedServer::start();
    let res = server.send(&request("GET", "/user/8", &[], None));
    assert_eq!(res.status, 404);
    assert_eq!(res.json(), json!({"code": 404, "message": "no such user", "data": ""}));
}

#[test]
fn test_generated_post_validates_enum_and_nested_schema() {
    let server = GeneratedServer::start();
    let res = server.send(&request(
        "POST",
        "/user",
        &[],
        Some(r#"{"name":"ada","role":"admin","profile":{"bio":"math"},"type":"staff"}"#),
    ));
    assert_eq!(res.status, 200);
    assert_eq!(
        res.json(),
        json!({"id": 1, "name": "ada", "role": "admin", "tags": ["math"]})
    );

    let res = server.send(&request("POST", "/user", &[], Some(r#"{"name":"ada","role":"root"}"#)));
    assert_eq!(res.status, 400);
    assert_eq!(res.body, "role must be a valid Role value");

    let res = server.send(&request(
        "POST",
        "/user",
        &[],
        Some(r#"{"name":"ada","role":"member","profile":{"bio":1}}"#),
    ));
    assert_eq!(res.status, 400);
    assert!(res.body.starts_with("profile: "), "{}", res.body);

    let res = server.send(&request(
        "POST",
        "/user",
        &[],
        Some(r#"{"name":"ada","role":"member","type":"ghost"}"#),
    ));
    assert_eq!(res.status, 200);
    assert_eq!(res.body, "null");
}

#[test]
fn test_generated_delete_and_path_validation() {
    let server = GeneratedServer::start();
    let res = server.send(&request("DELETE", "/user/7", &[], None));
    assert_eq!(res.status, 200);
    assert_eq!(res.json(), json!(true));

    let res = server.send(&request("DELETE", "/user/abc", &[], None));
    assert_eq!(res.status, 400);
    assert_eq!(res.body, "id must be an integer number");
}

#[test]
fn test_generated_request_contract_lookup() {
    let sections = request_contract("GET /user/:id").unwrap();
    assert_eq!(sections.len(), 3);
    assert_eq!(sections[0].rules[0].key, "id");
    assert!(request_contract("PUT /user/:id").is_none());
}
