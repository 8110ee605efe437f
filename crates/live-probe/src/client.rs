use std::sync::Once;
use std::time::Duration;

use reqwest::{Client, ClientBuilder};

use crate::error::ProbeError;

pub(crate) const DEFAULT_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

static INSTALL_PROVIDER: Once = Once::new();

/// Install the process-wide rustls crypto provider.
///
/// reqwest is built without a bundled provider, so this must run before the
/// first client is constructed. Repeated calls are no-ops.
pub fn install_rustls_provider() {
    INSTALL_PROVIDER.call_once(|| {
        // Another component may have installed one already.
        let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();
    });
}

/// Client builder with the shared user agent and timeouts applied.
pub fn create_client_builder(timeout: Option<Duration>) -> ClientBuilder {
    install_rustls_provider();
    Client::builder()
        .user_agent(DEFAULT_UA)
        .timeout(timeout.unwrap_or(DEFAULT_TIMEOUT))
        .connect_timeout(Duration::from_secs(10))
}

pub fn default_client() -> Result<Client, ProbeError> {
    Ok(create_client_builder(None).build()?)
}
