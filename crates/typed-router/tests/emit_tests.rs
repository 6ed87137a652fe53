//! Emitter tests: determinism and the contents each artifact must carry

use pretty_assertions::assert_eq;
use rstest::rstest;
use typed_router::contract::derive;
use typed_router::emit::emit;
use typed_router::*;

const ROUTES: &[&str] = &[
    "/",
    "/apple",
    "/(shop)/colors/[color]",
    "/files/[...parts]",
    "/docs/[[...slug]]",
];

fn tree() -> RouteTree {
    RouteTree::from_paths(ROUTES).unwrap()
}

#[rstest]
#[case(EmitTarget::TypeScript)]
#[case(EmitTarget::Rust)]
#[case(EmitTarget::Manifest)]
fn test_emission_is_deterministic(#[case] target: EmitTarget) {
    let emitter = target.emitter(&EmitOptions::default());

    let tree = tree();
    let first = emitter.emit(&tree, &derive(&tree));

    let mut reversed: Vec<&str> = ROUTES.to_vec();
    reversed.reverse();
    let rebuilt = RouteTree::from_paths(reversed).unwrap();
    let second = emitter.emit(&rebuilt, &derive(&rebuilt));

    assert_eq!(first, second);
}

#[test]
fn test_default_emit_is_typescript() {
    let tree = tree();
    let contracts = derive(&tree);
    assert_eq!(
        emit(&tree, &contracts),
        TypeScriptEmitter::default().emit(&tree, &contracts)
    );
}

#[test]
fn test_typescript_carries_every_route() {
    let tree = tree();
    let out = emit(&tree, &derive(&tree));

    for literal in ["`/`", "`/apple`", "`/colors/[color]`", "`/files/[...parts]`"] {
        assert!(out.contains(literal), "missing {literal}");
    }
    assert!(out.contains("`/files/${CatchAllRoutePart<T>}`"));
    assert!(out.contains(r#""/docs/[[...slug]]": { "slug"?: string[] };"#));
    assert!(out.contains("export type Href<T extends string = string> ="));
    assert!(!out.contains("(shop)"));
}

#[test]
fn test_rust_module_lists_routes_in_pathname_order() {
    let tree = tree();
    let out = RustEmitter::default().emit(&tree, &derive(&tree));

    let start = out.find("pub const ALL").unwrap();
    let end = start + out[start..].find("];").unwrap();
    let variants: Vec<&str> = out[start..end]
        .lines()
        .skip(1)
        .map(|line| line.trim().trim_end_matches(','))
        .filter(|line| !line.is_empty())
        .collect();

    assert_eq!(
        variants,
        vec![
            "RouteId::Root",
            "RouteId::Apple",
            "RouteId::ColorsColor",
            "RouteId::DocsSlug",
            "RouteId::FilesParts",
        ]
    );
}

#[test]
fn test_custom_crate_path() {
    let tree = tree();
    let options = EmitOptions {
        crate_path: "crate::routing".to_string(),
        ..EmitOptions::default()
    };
    let out = EmitTarget::Rust.emitter(&options).emit(&tree, &derive(&tree));
    assert!(out.contains("impl crate::routing::TypedRoute for Apple {"));
}
