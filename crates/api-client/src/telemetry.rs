use shared_types::LoggingConfig;
use std::sync::OnceLock;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: OnceLock<()> = OnceLock::new();

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` wins over `logging.level`. Safe to call more than once; if the
/// host app already installed a subscriber, ours is skipped.
pub fn init_tracing(config: &LoggingConfig) {
    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&config.level));

        let result = if config.json {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .try_init()
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .try_init()
        };

        if let Err(e) = result {
            eprintln!("[telemetry] Subscriber skipped, one is already set: {e}");
        }
    });
}
