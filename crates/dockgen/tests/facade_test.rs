use std::path::Path;

use dockgen::build::{DockerfileGenerator, target_dir};
use dockgen::plugin::{CollectingLog, CompilerPlugin, DockerPlugin, EndpointNode, SourcePosition};
use dockgen::{Attachment, DockgenConfig, KeyValue, OutputConfig};
use tempfile::TempDir;

#[test]
fn core_types_are_flattened_into_root() {
    let attachment = Attachment::new("Config", vec![KeyValue::new("name", "svc")]);
    let model = dockgen::MetadataProcessor::default()
        .process_config(&attachment)
        .unwrap();
    assert_eq!(model.image_reference("app"), "svc:latest");
}

#[test]
fn build_module_reexports_generator() {
    let model = dockgen::DockerModel::default();
    let output = OutputConfig::default();
    let ports = [8080].into_iter().collect();
    let text = DockerfileGenerator::new(&model, &output, "app", &ports, &[]).render();
    assert!(text.contains("EXPOSE 8080"));
    assert_eq!(
        target_dir(Path::new("/srv/out/app"), &output).unwrap(),
        Path::new("/srv/out/docker")
    );
}

#[test]
fn plugin_module_generates_through_facade() {
    let tmp = TempDir::new().unwrap();
    let artifact = tmp.path().join("app");
    std::fs::write(&artifact, b"bin").unwrap();

    let plugin = DockerPlugin::new(&DockgenConfig::default(), CollectingLog::new());
    plugin.process_endpoint(&EndpointNode {
        name: "listener".to_owned(),
        position: SourcePosition::new("main.src", 1, 1),
        config: vec![KeyValue::new("port", 9090_i64)],
        annotations: vec![Attachment::new("Config", vec![KeyValue::new("name", "listener")])],
    });

    let outcome = plugin.code_generated(&artifact);
    assert!(outcome.summary().is_some());
    assert!(tmp.path().join("docker/Dockerfile").is_file());
}
