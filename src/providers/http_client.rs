use reqwest::Client;
use std::time::Duration;

/// Content generation for a long article can take well over a minute.
const PROVIDER_TIMEOUT_SECS: u64 = 180;

/// Image downloads are small; fail fast on a stalled CDN.
const DOWNLOAD_TIMEOUT_SECS: u64 = 60;

pub fn build_provider_client() -> Client {
    build_client_with_timeout(PROVIDER_TIMEOUT_SECS)
}

pub fn build_download_client() -> Client {
    build_client_with_timeout(DOWNLOAD_TIMEOUT_SECS)
}

pub fn build_client_with_timeout(timeout_secs: u64) -> Client {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .pool_max_idle_per_host(4)
        .pool_idle_timeout(Duration::from_secs(90))
        .tcp_keepalive(Duration::from_secs(60))
        .user_agent(concat!("blog-generator/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|_| Client::new())
}
