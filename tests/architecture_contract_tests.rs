//! Architecture contract tests.

mod support;

use support::architecture::{find_lines_containing, find_non_export_lines_in_mod_files, path_exists};

#[test]
fn domain_has_no_framework_or_outer_layer_imports() {
    let hits = find_lines_containing(
        "src/domain",
        &[
            "crate::adapter",
            "crate::infrastructure",
            "crate::application",
            "crate::port",
            "tokio::",
            "reqwest::",
            "diesel::",
            "axum::",
        ],
    );

    assert!(
        hits.is_empty(),
        "found forbidden imports in domain layer: {hits:#?}"
    );
}

#[test]
fn ports_do_not_depend_on_adapters() {
    let hits = find_lines_containing(
        "src/port",
        &["crate::adapter", "crate::infrastructure", "crate::application", "diesel::"],
    );

    assert!(hits.is_empty(), "found outer-layer imports in ports: {hits:#?}");
}

#[test]
fn http_handlers_go_through_the_service() {
    let hits = find_lines_containing(
        "src/adapter/inbound/http",
        &["crate::adapter::outbound::sqlite", "diesel::"],
    );

    assert!(
        hits.is_empty(),
        "HTTP handlers should not reach into storage directly: {hits:#?}"
    );
}

#[test]
fn mod_rs_is_export_only() {
    let violations = find_non_export_lines_in_mod_files("src");
    assert!(
        violations.is_empty(),
        "found non-export content in mod.rs files: {violations:#?}"
    );
}

#[test]
fn migrations_are_embedded_from_the_crate_root() {
    assert!(path_exists("migrations"));
    assert!(path_exists("config.toml.example"));
}
