use tracing_subscriber::EnvFilter;

/// Crates whose events are shown by default.
const TARGETS: &[&str] = &["apilens", "al_project", "al_context", "al_llm"];

/// Install the stderr subscriber. `RUST_LOG` wins over the flags; without it
/// the workspace crates log at `info` (`debug` with `--verbose`, `warn` with
/// `--quiet`). `log` records from dependencies are bridged into tracing.
pub fn init_logging(verbose: bool, quiet: bool) {
    let level = match (verbose, quiet) {
        (true, _) => "debug",
        (false, true) => "warn",
        (false, false) => "info",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(level)));

    // Both calls fail harmlessly when a logger is already installed.
    let _ = tracing_log::LogTracer::init();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .try_init();
}

fn default_directives(level: &str) -> String {
    TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_cover_workspace_crates() {
        assert_eq!(
            default_directives("info"),
            "apilens=info,al_project=info,al_context=info,al_llm=info"
        );
    }
}
