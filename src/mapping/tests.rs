use super::*;
use crate::error::ResolveError;
use crate::handler::{HandlerRegistry, Page};

struct Stub;
impl Page for Stub {}

#[test]
fn test_strip_extension() {
    assert_eq!(strip_extension("/pages/edit-customer.htm"), "/pages/edit-customer");
    assert_eq!(strip_extension("/index"), "/index");
    assert_eq!(strip_extension("/v1.2/index"), "/v1.2/index");
    assert_eq!(strip_extension("/archive.tar.gz"), "/archive.tar");
}

#[test]
fn test_camel_case() {
    assert_eq!(camel_case("edit-customer"), "EditCustomer");
    assert_eq!(camel_case("order_line-item"), "OrderLineItem");
    assert_eq!(camel_case("home"), "Home");
    assert_eq!(camel_case("--a__b"), "AB");
    assert_eq!(camel_case("alreadyCamel"), "AlreadyCamel");
}

#[test]
fn test_candidates_root_level() {
    let names = candidates("/edit-customer.htm", "net.sf.click");
    assert_eq!(
        names.as_slice(),
        ["net.sf.click.EditCustomer", "net.sf.click.EditCustomerPage"]
    );
}

#[test]
fn test_candidates_nested() {
    let names = candidates("/admin/add-customer.htm", "com.mycorp");
    assert_eq!(
        names.as_slice(),
        ["com.mycorp.admin.AddCustomer", "com.mycorp.admin.AddCustomerPage"]
    );
}

#[test]
fn test_candidates_keep_directory_case() {
    let names = candidates("/Admin/Reports/q1.htm", "com.mycorp");
    assert_eq!(names[0], "com.mycorp.Admin.Reports.Q1");
}

#[test]
fn test_candidates_without_package() {
    let names = candidates("/home.htm", "");
    assert_eq!(names.as_slice(), ["Home", "HomePage"]);

    let names = candidates("/admin/home.htm", "");
    assert_eq!(names[0], "admin.Home");
}

#[test]
fn test_no_fallback_when_already_suffixed() {
    let names = candidates("/border-page.htm", "com.mycorp");
    assert_eq!(names.as_slice(), ["com.mycorp.BorderPage"]);
}

#[test]
fn test_degenerate_paths() {
    assert!(candidates("/", "com.mycorp").is_empty());
    assert!(candidates("/_-.htm", "com.mycorp").is_empty());
    // a trailing slash is ignored like any other empty segment
    assert_eq!(candidates("/admin/", "com.mycorp")[0], "com.mycorp.Admin");
}

#[test]
fn test_mapper_normalizes_package() {
    let mapper = NameMapper::new("  com.mycorp.  ");
    assert_eq!(mapper.package(), "com.mycorp");
    assert_eq!(mapper.qualify("Home"), "com.mycorp.Home");
    assert_eq!(NameMapper::new("").qualify("Home"), "Home");
}

#[test]
fn test_resolve_prefers_primary() {
    let registry = HandlerRegistry::new();
    registry.register::<Stub>("com.mycorp.EditCustomer");
    registry.register::<Stub>("com.mycorp.EditCustomerPage");

    let mapper = NameMapper::new("com.mycorp");
    let handler = mapper.resolve("/edit-customer.htm", &registry).unwrap().unwrap();
    assert_eq!(handler.name(), "com.mycorp.EditCustomer");
}

#[test]
fn test_resolve_falls_back_to_page_suffix() {
    let registry = HandlerRegistry::new();
    registry.register::<Stub>("net.sf.click.EditCustomerPage");

    let mapper = NameMapper::new("net.sf.click");
    let handler = mapper.resolve("/edit-customer.htm", &registry).unwrap().unwrap();
    assert_eq!(handler.name(), "net.sf.click.EditCustomerPage");
}

#[test]
fn test_resolve_unmapped_is_none() {
    let registry = HandlerRegistry::new();
    let mapper = NameMapper::new("com.mycorp");
    assert!(mapper.resolve("/missing.htm", &registry).unwrap().is_none());
}

#[test]
fn test_resolve_non_page_is_fatal_not_fallback() {
    let registry = HandlerRegistry::new();
    registry.register_other("com.mycorp.Customer");
    registry.register::<Stub>("com.mycorp.CustomerPage");

    let mapper = NameMapper::new("com.mycorp");
    let err = mapper.resolve("/customer.htm", &registry).unwrap_err();
    match err {
        ResolveError::ConfigTypeMismatch { path, type_name } => {
            assert_eq!(path, "/customer.htm");
            assert_eq!(type_name, "com.mycorp.Customer");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_exclusion_path_rule() {
    let matcher = ExclusionMatcher::from_patterns(["admin/*"]);
    assert!(matcher.matches("/admin/orders"));
    assert!(matcher.matches("/admin/orders.htm"));
    assert!(!matcher.matches("/reports/admin"));
}

#[test]
fn test_exclusion_file_rule_is_exact() {
    let matcher = ExclusionMatcher::from_patterns(["/reports/q1.htm"]);
    assert!(matcher.matches("/reports/q1.htm"));
    assert!(matcher.matches("/reports/q1"));
    assert!(!matcher.matches("/reports/q10.htm"));
    assert!(!matcher.matches("/reports/q1/detail.htm"));
}

#[test]
fn test_exclusion_secure_scenario() {
    let matcher = ExclusionMatcher::from_patterns(["secure/*"]);
    assert!(matcher.matches("/secure/login.htm"));
    assert!(!matcher.matches("/public/secure.htm"));
}

#[test]
fn test_exclusion_pattern_lists() {
    let matcher = ExclusionMatcher::from_patterns(["secure/*, /reports/q1.htm  assets", ""]);
    assert_eq!(matcher.len(), 3);
    assert!(matcher.matches("/assets/logo.htm"));
    assert!(matcher.matches("/reports/q1.htm"));
}

#[test]
fn test_exclusion_file_rules_checked_first() {
    let matcher = ExclusionMatcher::from_patterns(["reports*", "reports/q1.htm"]);
    assert_eq!(
        matcher.matching_rule("/reports/q1.htm"),
        Some(ExclusionRule::File("/reports/q1".into()))
    );
    assert_eq!(
        matcher.matching_rule("/reports/q2.htm"),
        Some(ExclusionRule::Prefix("/reports".into()))
    );
}

#[test]
fn test_rule_parse() {
    assert_eq!(ExclusionRule::parse("  "), None);
    assert_eq!(
        ExclusionRule::parse("secure/*"),
        Some(ExclusionRule::Prefix("/secure/".into()))
    );
    assert_eq!(
        ExclusionRule::parse("/static"),
        Some(ExclusionRule::Prefix("/static".into()))
    );
    let file = ExclusionRule::parse("q1.htm").unwrap();
    assert!(file.matches_stripped("/q1"));
    assert!(!file.matches_stripped("/q1x"));
}
