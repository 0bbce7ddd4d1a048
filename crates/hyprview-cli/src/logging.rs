//! Tracing setup
//!
//! The subscriber is installed before the config file is read so that config
//! warnings reach stderr, then narrowed to the configured level.

use hyprview_config::LogLevel;
use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{fmt, prelude::*, reload, EnvFilter, Registry};

/// Level used until the config file has been read
const BOOTSTRAP_LEVEL: &str = "info";

/// Handle for switching to the configured level once it is known
pub struct LogHandle {
    handle: reload::Handle<EnvFilter, Registry>,
    from_env: bool,
}

impl LogHandle {
    /// Switch to `level`, unless `RUST_LOG` chose the filter
    pub fn apply(&self, level: LogLevel) -> Result<(), reload::Error> {
        if self.from_env {
            return Ok(());
        }
        self.handle.reload(EnvFilter::new(level.as_filter()))
    }
}

/// Build a subscriber whose filter can be replaced after config parsing
pub fn subscriber<W>(
    env_filter: Option<EnvFilter>,
    writer: W,
) -> (impl Subscriber + Send + Sync + 'static, LogHandle)
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let from_env = env_filter.is_some();
    let (filter, handle) =
        reload::Layer::new(env_filter.unwrap_or_else(|| EnvFilter::new(BOOTSTRAP_LEVEL)));

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(writer));

    (subscriber, LogHandle { handle, from_env })
}

/// Install the global subscriber writing to stderr, honouring `RUST_LOG`
pub fn init() -> LogHandle {
    let (subscriber, handle) = subscriber(
        EnvFilter::try_from_default_env().ok(),
        std::io::stderr,
    );
    subscriber.init();
    handle
}
