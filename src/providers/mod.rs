pub mod http_client;
pub mod openai;
pub mod scrub;
pub mod traits;

pub use http_client::{build_download_client, build_provider_client};
pub use openai::OpenAiProvider;
pub use scrub::{api_error, sanitize_api_error, scrub_secret_patterns};
pub use traits::{CompletionRequest, GeneratedImage, ImageRequest, Provider};

use crate::config::Config;
use crate::error::ConfigError;

/// Provider for the configured endpoint. Fails only when no API key is set.
pub fn create_provider(config: &Config) -> Result<OpenAiProvider, ConfigError> {
    let api_key = config.require_api_key()?;
    Ok(OpenAiProvider::with_base_url(&config.ai.base_url, Some(api_key)))
}
