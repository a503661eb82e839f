use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` wins over `default_filter`. Returns false when a subscriber was
/// already installed, which is harmless.
pub fn init(default_filter: &str) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_harmless() {
        init("info");
        assert!(!init("debug"));
    }
}
