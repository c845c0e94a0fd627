use mdt_uam::{
    parse_uam_v1, UamBlock, UamBlockKind, UamCapability, UamError, UamScope, UamTarget, UamV1,
    GLOBAL_SCOPE_ID,
};
use pretty_assertions::assert_eq;
use serde_json::json;

fn sample_json() -> String {
    json!({
        "schemaVersion": 1,
        "meta": { "title": "Monorepo", "description": "Shared rules" },
        "scopes": [
            { "id": "global", "kind": "global", "name": "Global" },
            { "id": "web", "kind": "dir", "dir": "apps/web" },
            { "id": "ts", "kind": "glob", "patterns": ["**/*.ts", "**/*.tsx"] }
        ],
        "blocks": [
            { "id": "b1", "scopeId": "global", "kind": "markdown", "body": "Be kind." },
            { "id": "b2", "scopeId": "web", "kind": "commands", "title": "Run", "body": "pnpm dev" }
        ],
        "capabilities": [
            { "id": "review", "title": "Review", "params": { "depth": 2 } }
        ],
        "targets": [
            { "targetId": "agents-md" },
            { "targetId": "gemini-cli", "adapterVersion": "1", "options": { "modular": true } }
        ]
    })
    .to_string()
}

#[test]
fn parses_full_manifest() {
    let uam = parse_uam_v1(&sample_json()).unwrap();

    assert_eq!(uam.meta.description.as_deref(), Some("Shared rules"));
    assert_eq!(uam.scopes.len(), 3);
    assert_eq!(uam.scope("ts").map(UamScope::kind), Some("glob"));
    assert_eq!(uam.blocks[1].kind, UamBlockKind::Commands);
    assert_eq!(uam.blocks[1].title.as_deref(), Some("Run"));
    assert_eq!(uam.capabilities[0].params.as_ref().map(|p| p.len()), Some(1));
    assert_eq!(uam.targets[0], UamTarget::new("agents-md"));
    assert_eq!(
        uam.targets[1],
        UamTarget::new("gemini-cli").with_option("modular", json!(true))
    );
}

#[test]
fn builder_matches_parsed_shape() {
    let built = UamV1::empty("Monorepo")
        .with_scope(UamScope::dir("web", "apps/web"))
        .with_block(UamBlock::new("b1", GLOBAL_SCOPE_ID, UamBlockKind::Markdown, "Be kind."))
        .with_capability(UamCapability::new("review").with_title("Review"))
        .with_target(UamTarget::new("claude-code"));

    let json = serde_json::to_string(&built).unwrap();
    assert_eq!(parse_uam_v1(&json).unwrap(), built);
}

#[test]
fn unknown_block_kind_is_malformed() {
    let json = json!({
        "schemaVersion": 1,
        "meta": { "title": "x" },
        "blocks": [{ "id": "b", "scopeId": "global", "kind": "video", "body": "" }]
    })
    .to_string();
    assert!(matches!(parse_uam_v1(&json), Err(UamError::Malformed(_))));
}

#[test]
fn invalid_glob_reports_location() {
    let json = json!({
        "schemaVersion": 1,
        "meta": { "title": "x" },
        "scopes": [{ "id": "g", "kind": "glob", "patterns": ["src/**", "a]"] }]
    })
    .to_string();
    let err = parse_uam_v1(&json).unwrap_err();
    assert_eq!(err.issues()[0].path, "scopes.0.patterns.1");
}
