//! Manifest loading, override precedence, plan determinism, and
//! multi-remote resolution.

mod common;

use common::RecordingPlane;
use convoy::config::{Manifest, Overrides, Parser, Stack};
use convoy::remote::Resolver;
use convoy::Orchestrator;
use std::fs;
use std::sync::Arc;

#[test]
fn manifest_loads_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("convoy.yaml");
    fs::write(
        &path,
        r#"
name: demo
remote: staging
project: team-a
services:
  app:
    image: images:debian/12
networks:
  net: {}
"#,
    )
    .unwrap();

    let parser = Parser::new();
    let manifest = parser.load_manifest(&path).unwrap();
    let stack = Stack::from_manifest(manifest, &Overrides::default());

    assert_eq!(stack.name, "demo");
    assert_eq!(stack.remote, "staging");
    assert_eq!(stack.project.as_deref(), Some("team-a"));
    assert!(stack.validate().is_ok());
}

#[test]
fn cli_overrides_beat_manifest_values() {
    let manifest: Manifest = serde_yaml::from_str(
        r#"
remote: staging
network:
  type: bridge
"#,
    )
    .unwrap();

    let overrides = Overrides {
        remote: Some("prod".to_string()),
        network_type: Some("ovn".to_string()),
        network_uplink: Some("up1".to_string()),
        project: None,
    };
    let stack = Stack::from_manifest(manifest, &overrides);

    assert_eq!(stack.remote, "prod");
    assert_eq!(stack.network_defaults.kind, "ovn");
    assert_eq!(stack.network_defaults.uplink, "up1");
}

#[test]
fn plans_are_deterministic_across_runs() {
    let yaml = r#"
services:
  gamma:
    image: images:debian/12
  alpha:
    image: images:debian/12
  beta:
    image: images:debian/12
    depends_on: [gamma]
networks:
  zeta: {}
  eta: {}
"#;

    let render = || {
        let manifest: Manifest = serde_yaml::from_str(yaml).unwrap();
        let stack = Stack::from_manifest(manifest, &Overrides::default());
        let mut resolver = Resolver::new(stack.remote.clone());
        resolver.register(stack.remote.clone(), Arc::new(RecordingPlane::new()));
        let orchestrator = Orchestrator::new(stack, resolver).unwrap();
        let create: Vec<String> = orchestrator
            .create_plan()
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect();
        let destroy: Vec<String> = orchestrator
            .destroy_plan()
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect();
        (create, destroy)
    };

    assert_eq!(render(), render());

    let (create, _) = render();
    assert_eq!(
        create,
        vec![
            "create network eta (type=bridge)",
            "create network zeta (type=bridge)",
            "create instance alpha (image=images:debian/12)",
            "create instance gamma (image=images:debian/12)",
            "create instance beta (image=images:debian/12 after gamma)",
        ]
    );
}

#[tokio::test]
async fn qualified_resources_dispatch_to_their_own_remote() {
    let manifest: Manifest = serde_yaml::from_str(
        r#"
services:
  "edge:cache":
    image: images:debian/12
  app:
    image: images:debian/12
"#,
    )
    .unwrap();
    let stack = Stack::from_manifest(manifest, &Overrides::default());

    let local = Arc::new(RecordingPlane::new());
    let edge = Arc::new(RecordingPlane::new());
    let mut resolver = Resolver::new(stack.remote.clone());
    resolver.register(stack.remote.clone(), local.clone());
    resolver.register("edge", edge.clone());

    let orchestrator = Orchestrator::new(stack, resolver).unwrap();
    orchestrator.apply_create().await.unwrap();

    assert_eq!(local.calls(), vec!["create-instance app image=images:debian/12"]);
    assert_eq!(edge.calls(), vec!["create-instance cache image=images:debian/12"]);
}
