use once_cell::sync::Lazy;
use tracing::{subscriber::set_global_default, Subscriber};
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, Registry};

/// Default filter directive; quiet unless something goes wrong or `RUST_LOG` says otherwise.
pub const DEFAULT_FILTER: &str = "warn";

pub static TEST_TRACING: Lazy<()> = Lazy::new(|| {
    let filter = if std::env::var("TEST_LOG").is_ok() { "trace" } else { "" };
    let subscriber = get_subscriber("test", filter);
    // tolerate a subscriber installed elsewhere in the test process
    let _ = init_subscriber(subscriber);
});

/// Builds the bunyan-formatted subscriber, filtered by `RUST_LOG` when set and by `env_filter`
/// otherwise.
///
/// Records go to stderr; the tool has nothing to say on stdout.
pub fn get_subscriber(name: impl Into<String>, env_filter: impl AsRef<str>) -> impl Subscriber + Sync + Send {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(env_filter));
    let formatting_layer = BunyanFormattingLayer::new(name.into(), std::io::stderr);

    Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(formatting_layer)
}

/// Installs `subscriber` as the global default and routes `log` records through it. Fails if a
/// global subscriber is already set.
pub fn init_subscriber(subscriber: impl Subscriber + Sync + Send) -> anyhow::Result<()> {
    LogTracer::init()?;
    set_global_default(subscriber)?;
    Ok(())
}
