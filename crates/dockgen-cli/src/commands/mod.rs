mod clean;
mod generate;
mod render;

pub use clean::clean;
pub use generate::generate;
pub use render::render;

use dockgen_plugin::CollectingLog;

/// Prints collected diagnostics to stderr and fails if any is an error.
pub(crate) fn report_diagnostics(log: &CollectingLog) -> anyhow::Result<()> {
    for diagnostic in log.diagnostics() {
        eprintln!("{diagnostic}");
    }
    let errors = log.errors().len();
    if errors > 0 {
        anyhow::bail!("{errors} error(s) reported while processing declarations");
    }
    Ok(())
}
