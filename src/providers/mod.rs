//! Provider module for Chatvault
//!
//! This module contains the completion provider abstraction and the
//! OpenRouter implementation.

pub mod base;
pub mod openrouter;

pub use base::{CompletionResponse, Message, Provider, Role, TokenUsage};
pub use openrouter::OpenRouterProvider;

use crate::config::ProviderConfig;
use crate::error::{ChatvaultError, Result};

/// Create a provider instance based on configuration
///
/// # Errors
///
/// Returns error if the provider type is unknown or initialization fails
/// (for example a missing API key)
pub fn create_provider(config: &ProviderConfig) -> Result<Box<dyn Provider>> {
    create_provider_with_override(config, None)
}

/// Create a provider instance with an optional model override
///
/// # Examples
///
/// ```
/// use chatvault::config::{OpenRouterConfig, ProviderConfig};
/// use chatvault::providers::{create_provider_with_override, Provider};
///
/// let config = ProviderConfig {
///     provider_type: "openrouter".to_string(),
///     openrouter: OpenRouterConfig {
///         api_key: Some("sk-test".to_string()),
///         ..OpenRouterConfig::default()
///     },
/// };
///
/// let provider = create_provider_with_override(&config, Some("meta-llama/llama-3-8b")).unwrap();
/// assert_eq!(provider.model(), "meta-llama/llama-3-8b");
/// ```
pub fn create_provider_with_override(
    config: &ProviderConfig,
    model_override: Option<&str>,
) -> Result<Box<dyn Provider>> {
    match config.provider_type.as_str() {
        "openrouter" => {
            let mut openrouter_config = config.openrouter.clone();
            if let Some(model) = model_override {
                openrouter_config.model = model.to_string();
            }

            Ok(Box::new(OpenRouterProvider::new(openrouter_config)?))
        }
        other => Err(ChatvaultError::Provider(format!("Unknown provider type: {}", other)).into()),
    }
}
