pub use skillshare_test_macros::test;
use std::sync::Once;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

fn init_tracing_with_env_like() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt = fmt::layer().with_test_writer().with_target(false).compact();

    // another harness may have installed a subscriber already, the first one wins
    if tracing_subscriber::registry().with(fmt).with(filter).try_init().is_err() {
        log::debug!("Tracing was already initialized");
    }
}

/// Test setup executed before each test.
pub fn setup_test() {
    INIT.call_once(|| {
        init_tracing_with_env_like();
    });
}
