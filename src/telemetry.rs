use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the engine's default tracing subscriber.
///
/// Intended for embedding applications and examples; the engine itself only
/// emits `tracing` events and never touches stdout.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();
}
