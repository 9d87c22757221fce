use pagerouter::config::{load_config, load_manifest, load_settings};
use pagerouter::{Mode, Settings};

mod common;
use common::temp_files;

const YAML: &str = r#"
mode: profile
pages:
  package: com.mycorp.pages.
  autobinding: false
  template_extensions: [".htm"]
  page:
    - { path: report.htm, type: Report }
types:
  - name: com.mycorp.pages.Report
"#;

const JSON: &str = r#"{
  "mode": "trace",
  "pages": {
    "package": "com.mycorp",
    "excludes": [ { "pattern": "secure/*" } ]
  },
  "headers": [
    { "name": "X-Count", "type": "integer", "value": "7" }
  ]
}"#;

#[test]
fn test_load_yaml_config() {
    let path = temp_files::create_temp_yaml(YAML);
    let config = load_config(&path).unwrap();
    assert_eq!(config.mode.as_deref(), Some("profile"));
    assert_eq!(config.pages.page.len(), 1);
    assert_eq!(config.types.len(), 1);

    let settings = Settings::try_from(&config).unwrap();
    assert_eq!(settings.mode, Mode::Profile);
    assert!(!settings.autobinding);
    assert_eq!(settings.template_extensions, vec![".htm"]);
    temp_files::cleanup_temp_files(&[path]);
}

#[test]
fn test_load_json_config() {
    let path = temp_files::create_temp_json(JSON);
    let config = load_config(&path).unwrap();
    let settings = Settings::try_from(config).unwrap();
    assert_eq!(settings.mode, Mode::Trace);
    assert_eq!(settings.exclusions, vec!["secure/*"]);
    assert_eq!(settings.common_headers.len(), 1);
    assert_eq!(
        settings.common_headers.get("x-count").map(ToString::to_string),
        Some("7".to_string())
    );
    temp_files::cleanup_temp_files(&[path]);
}

#[test]
fn test_load_settings_returns_manifest() {
    let path = temp_files::create_temp_yaml(YAML);
    let (settings, types) = load_settings(&path).unwrap();
    assert_eq!(settings.package, "com.mycorp.pages.");
    assert_eq!(types[0].name, "com.mycorp.pages.Report");
    temp_files::cleanup_temp_files(&[path]);
}

#[test]
fn test_parse_errors_carry_the_file_name() {
    let path = temp_files::create_temp_yaml("pages: [not, a, mapping]");
    let err = load_config(&path).unwrap_err();
    let rendered = format!("{err:#}");
    assert!(rendered.contains("invalid YAML"));
    assert!(rendered.contains(path.file_name().unwrap().to_str().unwrap()));
    temp_files::cleanup_temp_files(&[path]);
}

#[test]
fn test_missing_file() {
    let err = load_config("/definitely/not/here.yaml").unwrap_err();
    assert!(format!("{err:#}").contains("failed to read"));
}

#[test]
fn test_validation_errors_surface_through_load_settings() {
    let path = temp_files::create_temp_yaml("headers: [ { name: Expires, type: date, value: soon } ]");
    let err = load_settings(&path).unwrap_err();
    let rendered = format!("{err:#}");
    assert!(rendered.contains("invalid configuration"));
    assert!(rendered.contains("Expires"));
    temp_files::cleanup_temp_files(&[path]);
}

#[test]
fn test_manifest_shapes() {
    let wrapped = temp_files::create_temp_yaml("types:\n  - name: a.Home\n  - { name: a.Util, page: false }\n");
    let bare = temp_files::create_temp_json(r#"[ { "name": "a.Home", "fields": [ { "name": "id", "type": "i64" } ] } ]"#);

    let decls = load_manifest(&wrapped).unwrap();
    assert_eq!(decls.len(), 2);
    assert!(!decls[1].page);

    let decls = load_manifest(&bare).unwrap();
    assert_eq!(decls[0].fields[0].value_type, "i64");

    temp_files::cleanup_temp_files(&[wrapped, bare]);
}
