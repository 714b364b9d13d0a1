use std::io;

use tracing::Level;

/// Initialize the tracing subscriber writing to stderr, so log lines never
/// interleave with the geometry printed on stdout. Safe to call multiple
/// times; subsequent calls are no-ops for the global subscriber.
pub fn init_default() {
    // Compact formatter, state transitions land at DEBUG.
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_writer(io::stderr)
        .with_target(false)
        .with_thread_names(false)
        .try_init();
}
