pub mod dispatch;

use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Install the global subscriber. Logs go to stderr; stdout carries reports.
pub fn init_logging(level: Level) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Warning: Failed to install log subscriber: {e}");
    }
}
