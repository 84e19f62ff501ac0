use std::collections::HashSet;

use term_savers::core::registry::{self, SaverKind};

fn is_kebab_case(name: &str) -> bool {
    // ^[a-z][a-z0-9]*(-[a-z0-9]+)*$
    let mut parts = name.split('-');
    let Some(first) = parts.next() else {
        return false;
    };
    let head_ok = first.starts_with(|c: char| c.is_ascii_lowercase())
        && first
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit());
    head_ok
        && parts.all(|p| {
            !p.is_empty() && p.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        })
}

#[test]
fn kebab_case_checker_sanity() {
    assert!(is_kebab_case("matrix-rain"));
    assert!(is_kebab_case("fire"));
    assert!(is_kebab_case("a1-b2"));
    assert!(!is_kebab_case("Matrix-rain"));
    assert!(!is_kebab_case("matrix_rain"));
    assert!(!is_kebab_case("matrix--rain"));
    assert!(!is_kebab_case("-matrix"));
    assert!(!is_kebab_case("1matrix"));
    assert!(!is_kebab_case(""));
}

#[test]
fn every_descriptor_is_well_formed() {
    for info in registry::all() {
        assert!(is_kebab_case(info.name), "bad name {:?}", info.name);
        assert!(!info.description.trim().is_empty(), "{} has no description", info.name);
        if let Some(fps) = info.fps {
            assert!(fps > 0, "{} has fps 0", info.name);
        }
    }
}

#[test]
fn names_are_unique() {
    let names: HashSet<_> = registry::all().map(|i| i.name).collect();
    assert_eq!(names.len(), SaverKind::ALL.len());
}

#[test]
fn registry_and_implementations_are_a_bijection() {
    assert_eq!(SaverKind::ALL.len(), 14);
    let kinds: HashSet<_> = SaverKind::ALL.iter().copied().collect();
    assert_eq!(kinds.len(), 14);

    for &kind in SaverKind::ALL {
        // Every descriptor builds a simulation of its own kind...
        assert_eq!(kind.create().kind(), kind);
        // ...and every name resolves back to the same descriptor.
        assert_eq!(registry::find(kind.name()).unwrap(), kind);
        assert!(std::ptr::eq(kind.info(), registry::find(kind.name()).unwrap().info()));
    }
}

#[test]
fn unknown_name_is_an_error() {
    let err = registry::find("nope").unwrap_err();
    assert_eq!(err.to_string(), "unknown screensaver \"nope\"");
}
