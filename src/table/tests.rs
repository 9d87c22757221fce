use super::*;
use crate::error::ResolveError;
use crate::handler::{FieldDescriptor, FieldIndex, HandlerType, TypeDescriptor};
use crate::headers::PageHeaders;
use std::sync::Arc;

fn page(name: &str) -> HandlerType {
    HandlerType::from_descriptor(TypeDescriptor::page(name)).unwrap()
}

fn entry(path: &str, handler: &HandlerType, origin: Origin) -> Arc<PageEntry> {
    Arc::new(PageEntry::new(path, handler.clone(), PageHeaders::new(), origin))
}

#[test]
fn test_entry_normalizes_path() {
    let home = page("com.mycorp.Home");
    let e = PageEntry::new("home.htm", home, PageHeaders::new(), Origin::Explicit);
    assert_eq!(e.path(), "/home.htm");
    assert_eq!(normalize_path("/already"), "/already");
}

#[test]
fn test_insert_and_lookup() {
    let mut table = RouteTable::new();
    let home = page("com.mycorp.Home");
    assert!(table.insert(entry("/home.htm", &home, Origin::Automapped)));

    let found = table.lookup_by_path("/home.htm").unwrap();
    assert_eq!(found.handler(), &home);
    assert!(table.lookup_by_path("/other.htm").is_none());

    let by_type = table.lookup_by_type(&home).unwrap().unwrap();
    assert!(Arc::ptr_eq(&found, &by_type));
    assert_eq!(table.len(), 1);
}

#[test]
fn test_declared_replaces_inferred() {
    let mut table = RouteTable::new();
    let guessed = page("com.mycorp.Home");
    let declared = page("com.mycorp.Landing");

    assert!(table.insert(entry("/home.htm", &guessed, Origin::Automapped)));
    assert!(table.insert(entry("/home.htm", &declared, Origin::Explicit)));

    assert_eq!(
        table.lookup_by_path("/home.htm").unwrap().handler(),
        &declared
    );
    // the replaced type no longer claims the path
    assert!(table.lookup_by_type(&guessed).unwrap().is_none());
    assert_eq!(table.handler_types(), vec![declared]);
}

#[test]
fn test_inferred_never_overwrites() {
    let mut table = RouteTable::new();
    let declared = page("com.mycorp.Landing");
    let guessed = page("com.mycorp.Home");

    assert!(table.insert(entry("/home.htm", &declared, Origin::Explicit)));
    assert!(!table.insert(entry("/home.htm", &guessed, Origin::Automapped)));
    assert!(!table.insert(entry("/home.htm", &HandlerType::excluded(), Origin::Excluded)));

    assert_eq!(
        table.lookup_by_path("/home.htm").unwrap().handler(),
        &declared
    );
    assert!(table.binding(&guessed).is_none());
}

#[test]
fn test_first_declaration_kept() {
    let mut table = RouteTable::new();
    let first = page("com.mycorp.First");
    let second = page("com.mycorp.Second");

    assert!(table.insert(entry("/dup.htm", &first, Origin::Explicit)));
    assert!(!table.insert(entry("/dup.htm", &second, Origin::Explicit)));
    assert_eq!(table.lookup_by_path("/dup.htm").unwrap().handler(), &first);
}

#[test]
fn test_multiple_paths_are_ambiguous() {
    let mut table = RouteTable::new();
    let report = page("com.mycorp.Report");

    assert!(table.insert(entry("/reports/q1.htm", &report, Origin::Explicit)));
    assert!(table.insert(entry("/reports/q2.htm", &report, Origin::Explicit)));

    let binding = table.binding(&report).unwrap();
    assert!(binding.is_ambiguous());
    assert_eq!(binding.paths(), vec!["/reports/q1.htm", "/reports/q2.htm"]);

    match table.lookup_by_type(&report) {
        Err(ResolveError::AmbiguousReverseMapping { type_name, paths }) => {
            assert_eq!(type_name, "com.mycorp.Report");
            assert_eq!(paths.len(), 2);
        }
        other => panic!("expected ambiguity, got {other:?}"),
    }
    // forward lookups are unaffected
    assert!(table.lookup_by_path("/reports/q2.htm").is_some());
    assert!(table.any_entry_for(&report).is_some());
}

#[test]
fn test_replacement_collapses_binding() {
    let mut table = RouteTable::new();
    let report = page("com.mycorp.Report");
    let special = page("com.mycorp.Special");

    table.insert(entry("/a.htm", &report, Origin::Automapped));
    table.insert(entry("/b.htm", &report, Origin::Automapped));
    assert!(table.lookup_by_type(&report).is_err());

    table.insert(entry("/b.htm", &special, Origin::Explicit));
    let only = table.lookup_by_type(&report).unwrap().unwrap();
    assert_eq!(only.path(), "/a.htm");
}

#[test]
fn test_handler_types_and_entries_sorted() {
    let mut table = RouteTable::new();
    table.insert(entry("/z.htm", &page("b.Zed"), Origin::Explicit));
    table.insert(entry("/a.htm", &page("a.Alpha"), Origin::Explicit));
    table.insert(entry("/m.htm", &page("a.Alpha"), Origin::Automapped));

    let names: Vec<String> = table
        .handler_types()
        .iter()
        .map(|t| t.name().to_string())
        .collect();
    assert_eq!(names, vec!["a.Alpha", "b.Zed"]);

    let paths: Vec<String> = table.entries().iter().map(|e| e.path().to_string()).collect();
    assert_eq!(paths, vec!["/a.htm", "/m.htm", "/z.htm"]);
}

#[test]
fn test_field_index_computed_once() {
    let home = page("com.mycorp.Home");
    let e = PageEntry::new("/home.htm", home, PageHeaders::new(), Origin::Explicit);
    assert!(e.cached_fields().is_none());

    let mut calls = 0;
    let first = e.bindable_fields(|| {
        calls += 1;
        let field = FieldDescriptor::new("id", "i64");
        let index: FieldIndex = [(Arc::clone(&field.name), field)].into_iter().collect();
        Arc::new(index)
    });
    let second = e.bindable_fields(|| {
        calls += 1;
        Arc::new(FieldIndex::new())
    });
    assert_eq!(calls, 1);
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(second.len(), 1);
}
