pub mod builders;
pub mod fake_install;
pub mod io;

use std::sync::{Arc, Once};

use launchshim::platform::{HostPlatform, PlatformProbe};
use tracing_subscriber::{EnvFilter, fmt};

static INIT: Once = Once::new();

/// Initialise tracing for tests.
///
/// - Uses `with_test_writer()`, so logs are captured per-test.
/// - The Rust test harness only prints captured output for **failing** tests
///   (unless you run with `-- --nocapture`).
///
/// Enable levels with e.g.:
/// `RUST_LOG=debug cargo test`
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer() // print only for failing tests unless --nocapture
            .with_target(true)
            .init();
    });
}

/// Run a future with a 10-second timeout.
pub async fn with_timeout<F, T>(f: F) -> T
where
    F: std::future::Future<Output = T>,
{
    tokio::time::timeout(std::time::Duration::from_secs(10), f)
        .await
        .expect("Test timed out after 10 seconds")
}

/// Platform probe that always reports the same host.
#[derive(Debug, Clone)]
pub struct FixedPlatform(pub HostPlatform);

impl PlatformProbe for FixedPlatform {
    fn host(&self) -> HostPlatform {
        self.0.clone()
    }
}

impl FixedPlatform {
    pub fn shared(host: HostPlatform) -> Arc<dyn PlatformProbe> {
        Arc::new(FixedPlatform(host))
    }
}
