use dockgen_core::{DockgenConfig, Literal, OutputConfig};
use tempfile::TempDir;

#[test]
fn load_returns_defaults_when_no_config_file() {
    let tmp = TempDir::new().unwrap();
    let config = DockgenConfig::load(tmp.path()).unwrap();

    assert_eq!(config.image.base_image, "gcr.io/distroless/cc-debian12");
    assert_eq!(config.image.tag, "latest");
    assert_eq!(config.image.debug_port, 5005);
    assert_eq!(config.output.dir_name, "docker");
    assert_eq!(config.output.workdir, "/home/app");
    assert!(config.output.maintainer.is_none());
}

#[test]
fn load_parses_full_config() {
    let tmp = TempDir::new().unwrap();
    let toml = r#"
[image]
base_image = "debian:bookworm-slim"
tag = "edge"
debug_port = 7000

[output]
dir_name = "container"
workdir = "/srv"
maintainer = "ops@example.com"
"#;
    std::fs::write(tmp.path().join("dockgen.toml"), toml).unwrap();

    let config = DockgenConfig::load(tmp.path()).unwrap();

    assert_eq!(config.image.base_image, "debian:bookworm-slim");
    assert_eq!(config.image.tag, "edge");
    assert_eq!(config.image.debug_port, 7000);
    assert_eq!(config.output.dir_name, "container");
    assert_eq!(config.output.workdir, "/srv");
    assert_eq!(config.output.maintainer.as_deref(), Some("ops@example.com"));
}

#[test]
fn load_partial_config_fills_defaults() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("dockgen.toml"), "[output]\ndir_name = \"out\"\n").unwrap();

    let config = DockgenConfig::load(tmp.path()).unwrap();

    assert_eq!(config.output.dir_name, "out");
    assert_eq!(config.output.workdir, "/home/app");
    assert_eq!(config.image.tag, "latest");
}

#[test]
fn load_rejects_output_dir_outside_artifact_directory() {
    for dir_name in [".", "", "..", "/x", "a/b", "../docker"] {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join("dockgen.toml"),
            format!("[output]\ndir_name = {dir_name:?}\n"),
        )
        .unwrap();

        let err = DockgenConfig::load(tmp.path()).unwrap_err();
        assert!(
            matches!(err, dockgen_core::Error::InvalidOutputDir { .. }),
            "{dir_name:?} accepted: {err:?}"
        );
    }
}

#[test]
fn output_dir_name_accepts_single_component() {
    let mut output = OutputConfig::default();
    assert!(output.has_valid_dir_name());

    output.dir_name = "image-build".to_owned();
    assert!(output.validate().is_ok());

    output.dir_name = ".".to_owned();
    assert!(!output.has_valid_dir_name());
}

#[test]
fn load_invalid_toml_returns_parse_error() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("dockgen.toml"), "[image\nbroken").unwrap();

    let err = DockgenConfig::load(tmp.path()).unwrap_err();
    assert!(err.to_string().contains("failed to parse config"));
}

#[test]
fn literals_deserialize_from_toml_and_json() {
    #[derive(serde::Deserialize)]
    struct Doc {
        v: Literal,
    }

    let from_toml: Doc = toml::from_str("v = { port = 8080, tls = true }").unwrap();
    let from_json: Literal = serde_json::from_str(r#"{"port": 8080, "tls": true}"#).unwrap();
    assert_eq!(from_toml.v, from_json);
}
