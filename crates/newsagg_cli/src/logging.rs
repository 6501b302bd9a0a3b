use std::sync::Once;
use tracing::Level;

static INIT: Once = Once::new();

/// Installs the global subscriber once. Logs go to stderr so command output
/// on stdout stays clean.
pub fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    if !tracing::dispatcher::has_been_set() {
        INIT.call_once(|| {
            tracing_subscriber::fmt()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        });
    }
}
