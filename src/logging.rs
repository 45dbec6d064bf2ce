use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "KIRA_LOG";

/// Installs the stderr subscriber. An explicit level wins over `KIRA_LOG`.
pub fn init_tracing(level: Option<LevelFilter>) {
    let filter = match level {
        Some(level) => EnvFilter::default().add_directive(level.into()),
        None => EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info")),
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
