use std::fs;
use std::path::Path;

use abstractapi::generator::{generate_project, GenerateOptions, GenerationMode, GeneratorConfig};
use serde_json::{json, Value};
use tempfile::TempDir;

const API_YAML: &str = r#"
api:
  - method: get
    path: /user/:id
    paths:
      - key: id
        type: { type: native, native_type: integer }
    return:
      type: { type: table, table_name: User }
  - method: post
    path: /user
    body:
      - key: name
        type: { type: native, native_type: string }
      - key: role
        type: { type: enum, enum_name: Role }
      - key: tags
        type: { type: native, native_type: string }
        required: false
        array: true
    return:
      type: { type: table, table_name: User }
      required: false
"#;

const MODELS_JSON: &str = r#"{
  "User": "./model/table/User",
  "Role": "./model/enum/Role"
}"#;

fn write_inputs(dir: &Path) -> GenerateOptions {
    let spec = dir.join("api.yaml");
    let models = dir.join("models.json");
    fs::write(&spec, API_YAML).unwrap();
    fs::write(&models, MODELS_JSON).unwrap();
    GenerateOptions {
        spec,
        models: Some(models),
        schemas: None,
        output: dir.join("src"),
        config: GeneratorConfig::default(),
        dry_run: false,
    }
}

fn read(dir: &Path, rel: &str) -> String {
    fs::read_to_string(dir.join(rel)).unwrap_or_else(|e| panic!("reading {rel}: {e}"))
}

#[test]
fn test_generate_project_writes_artifacts_and_manifest() {
    let dir = TempDir::new().unwrap();
    let opts = write_inputs(dir.path());
    let output = generate_project(&opts).unwrap();
    assert_eq!(output.files.len(), 6);

    let src = dir.path().join("src");
    for artifact in &output.files {
        assert_eq!(read(&src, &artifact.file_path), artifact.content);
    }

    let manifest: Value = serde_json::from_str(&read(&src, "abstract_api/manifest.json")).unwrap();
    assert_eq!(
        manifest,
        json!({
            "GET_user__id": "abstract_api/api/GET_user__id",
            "POST_user": "abstract_api/api/POST_user",
            "server": "abstract_api/server",
            "utility": "abstract_api/utility",
        })
    );

    let post = read(&src, "abstract_api/api/POST_user.rs");
    assert!(post.contains("const ENDPOINT: &'static str = \"POST /user\";"));
    assert!(post.contains("pub tags: Option<Vec<String>>,"));
    assert!(post.contains("use super::super::super::model::r#enum::Role::Role;"));
    assert!(post.contains("pub type POST_user_Res = Option<User>;"));
}

#[test]
fn test_generation_is_deterministic_across_runs() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    let a = generate_project(&write_inputs(first.path())).unwrap();
    let b = generate_project(&write_inputs(second.path())).unwrap();
    assert_eq!(a, b);
    assert_eq!(
        read(&first.path().join("src"), "abstract_api/server.rs"),
        read(&second.path().join("src"), "abstract_api/server.rs")
    );
}

#[test]
fn test_dry_run_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let mut opts = write_inputs(dir.path());
    opts.dry_run = true;
    let output = generate_project(&opts).unwrap();
    assert!(!output.files.is_empty());
    assert!(!dir.path().join("src").exists());
}

#[test]
fn test_minimal_mode_with_custom_root() {
    let dir = TempDir::new().unwrap();
    let mut opts = write_inputs(dir.path());
    opts.config = GeneratorConfig {
        root: "api_gen".into(),
        mode: GenerationMode::Minimal,
        ..GeneratorConfig::default()
    };
    generate_project(&opts).unwrap();

    let src = dir.path().join("src");
    let get = read(&src, "api_gen/api/GET_user__id.rs");
    assert!(get.contains("pub type GET_user__id_Req = RawParams;"));
    assert!(src.join("api_gen/manifest.json").exists());
}

#[test]
fn test_missing_lookup_entry_fails_without_writing() {
    let dir = TempDir::new().unwrap();
    let mut opts = write_inputs(dir.path());
    opts.models = None;
    let err = generate_project(&opts).unwrap_err();
    assert!(format!("{err:#}").contains("User"));
    assert!(!dir.path().join("src").exists());
}
