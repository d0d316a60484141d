use std::collections::BTreeSet;

use dockgen_core::{
    ArtifactModel, CopyFileModel, DockerModel, Fragment, KeyValue, Literal, PortError,
    extract_port,
};
use proptest::prelude::*;

// ── Port extraction ──

#[test]
fn extracts_integer_port() {
    let binding = vec![KeyValue::new("host", "0.0.0.0"), KeyValue::new("port", 8080_i64)];
    assert_eq!(extract_port(&binding), Ok(8080));
}

#[test]
fn extracts_numeric_string_port() {
    let binding = vec![KeyValue::new("port", "9090")];
    assert_eq!(extract_port(&binding), Ok(9090));
}

#[test]
fn first_port_key_wins() {
    let binding = vec![KeyValue::new("port", 1000_i64), KeyValue::new("port", 2000_i64)];
    assert_eq!(extract_port(&binding), Ok(1000));
}

#[test]
fn missing_port_is_not_found() {
    let binding = vec![KeyValue::new("host", "localhost")];
    assert_eq!(extract_port(&binding), Err(PortError::NotFound));
    assert_eq!(extract_port(&[]), Err(PortError::NotFound));
}

#[test]
fn non_numeric_port_is_parse_error() {
    let binding = vec![KeyValue::new("port", "http")];
    assert_eq!(
        extract_port(&binding),
        Err(PortError::Parse {
            value: "http".to_owned()
        })
    );
}

#[test]
fn out_of_range_port_is_parse_error() {
    assert!(matches!(
        extract_port(&[KeyValue::new("port", 65536_i64)]),
        Err(PortError::Parse { .. })
    ));
    assert!(matches!(
        extract_port(&[KeyValue::new("port", -1_i64)]),
        Err(PortError::Parse { .. })
    ));
    assert!(matches!(
        extract_port(&[KeyValue::new("port", Literal::Float(80.0))]),
        Err(PortError::Parse { .. })
    ));
}

// ── Artifact model ──

#[test]
fn duplicate_ports_collapse() {
    let model = ArtifactModel::new();
    assert!(model.add_port(9090));
    assert!(!model.add_port(9090));
    assert_eq!(model.ports().len(), 1);
}

#[test]
fn second_config_overwrites_first() {
    let model = ArtifactModel::new();
    let first = DockerModel {
        name: Some("first".to_owned()),
        ..Default::default()
    };
    let second = DockerModel {
        name: Some("second".to_owned()),
        ..Default::default()
    };

    assert!(!model.merge(vec![Fragment::Config(first)]));
    assert!(model.merge(vec![Fragment::Config(second)]));

    let snapshot = model.snapshot();
    assert_eq!(
        snapshot.docker.and_then(|d| d.name).as_deref(),
        Some("second")
    );
}

#[test]
fn external_files_keep_insertion_order() {
    let model = ArtifactModel::new();
    model.merge(vec![Fragment::CopyFiles(vec![
        CopyFileModel::new("b", "/b"),
        CopyFileModel::new("a", "/a"),
    ])]);
    model.add_external_file(CopyFileModel::new("c", "/c"));

    let sources: Vec<_> = model
        .snapshot()
        .external_files
        .into_iter()
        .map(|f| f.source)
        .collect();
    assert_eq!(sources, vec!["b", "a", "c"]);
}

#[test]
fn take_empties_the_model() {
    let model = ArtifactModel::new();
    model.add_port(80);
    model.set_docker_model(DockerModel::default());

    let taken = model.take();
    assert!(taken.docker.is_some());
    assert_eq!(taken.ports, BTreeSet::from([80]));
    assert!(model.snapshot().is_empty());
}

#[test]
fn reset_clears_everything() {
    let model = ArtifactModel::new();
    model.add_port(80);
    model.add_external_file(CopyFileModel::new("a", "/a"));
    model.reset();
    assert!(model.snapshot().is_empty());
}

#[test]
fn concurrent_port_additions_are_all_kept() {
    let model = ArtifactModel::new();
    std::thread::scope(|scope| {
        for worker in 0..8u16 {
            let model = &model;
            scope.spawn(move || {
                for i in 0..50u16 {
                    model.add_port(worker * 100 + i);
                }
            });
        }
    });
    assert_eq!(model.ports().len(), 400);
}

proptest! {
    #[test]
    fn port_set_is_order_independent(ports in proptest::collection::vec(any::<u16>(), 0..64)) {
        let forward = ArtifactModel::new();
        for port in &ports {
            forward.add_port(*port);
        }

        let backward = ArtifactModel::new();
        for port in ports.iter().rev() {
            backward.add_port(*port);
        }

        let expected: BTreeSet<u16> = ports.iter().copied().collect();
        prop_assert_eq!(forward.ports(), expected.clone());
        prop_assert_eq!(backward.ports(), expected);
    }
}
