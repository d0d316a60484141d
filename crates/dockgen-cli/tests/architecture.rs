use std::path::{Path, PathBuf};

use arch_lint::rules::{NoErrorSwallowing, NoSilentResultDrop};
use arch_lint::{Analyzer, Severity};

/// Crates whose sources are linted. The build and plugin crates delete
/// directories, so a dropped `Result` there can hide a failed cleanup.
const CRATES: &[&str] = &[
    "dockgen-core",
    "dockgen-build",
    "dockgen-plugin",
    "dockgen-cli",
    "dockgen",
];

fn crates_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("crates directory")
        .to_path_buf()
}

/// AL003 (no-error-swallowing) and AL013 (no-silent-result-drop), one crate
/// at a time so a failure names the crate. Test code is excluded.
#[test]
fn arch_lint_al003_al013_per_crate() {
    let mut reports = Vec::new();

    for name in CRATES {
        let src = crates_dir().join(name).join("src");
        assert!(src.is_dir(), "missing source directory for {name}");

        let analyzer = Analyzer::builder()
            .root(&src)
            .exclude("**/tests/**")
            .rule(NoErrorSwallowing::new())
            .rule(NoSilentResultDrop::new())
            .build()
            .expect("build analyzer");

        let result = analyzer.analyze().expect("analyze");
        if result.has_violations_at(Severity::Warning) {
            reports.push(format!("{name}:\n{}", result.format_test_report(Severity::Warning)));
        }
    }

    assert!(reports.is_empty(), "{}", reports.join("\n"));
}
