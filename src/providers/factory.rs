use crate::config::{AppConfig, ProviderConfig};
use crate::error::FinderError;
use crate::providers::{AnthropicProvider, LlmProvider, OpenAIProvider};

pub struct ProviderFactory;

impl ProviderFactory {
    /// Build the provider called `provider_name`. Disabled providers are
    /// refused before any API key lookup.
    pub fn create(
        provider_name: &str,
        config: &ProviderConfig,
    ) -> Result<Box<dyn LlmProvider>, FinderError> {
        if !config.enabled {
            return Err(FinderError::ProviderDisabled(provider_name.to_string()));
        }

        match provider_name {
            "openai" => Ok(Box::new(OpenAIProvider::new(config)?)),
            "anthropic" => Ok(Box::new(AnthropicProvider::new(config)?)),
            _ => Err(FinderError::UnknownProvider(provider_name.to_string())),
        }
    }

    /// The provider named by `default_provider`
    pub fn get_default_provider(config: &AppConfig) -> Result<Box<dyn LlmProvider>, FinderError> {
        Self::get_provider(config, &config.default_provider)
    }

    /// Get a named provider from configuration
    pub fn get_provider(
        config: &AppConfig,
        provider_name: &str,
    ) -> Result<Box<dyn LlmProvider>, FinderError> {
        let provider_config = config
            .providers
            .get(provider_name)
            .ok_or_else(|| FinderError::UnknownProvider(provider_name.to_string()))?;

        Self::create(provider_name, provider_config)
    }

    /// Names accepted by [`ProviderFactory::create`]
    pub fn available_providers() -> Vec<&'static str> {
        vec!["openai", "anthropic"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enabled(api_key: &str) -> ProviderConfig {
        ProviderConfig {
            enabled: true,
            model: "small-model".to_string(),
            temperature: 0.3,
            max_tokens: 800,
            api_key: Some(api_key.to_string()),
            base_url: None,
        }
    }

    #[test]
    fn test_every_listed_provider_can_be_created() {
        for name in ProviderFactory::available_providers() {
            let provider = ProviderFactory::create(name, &enabled("k")).unwrap();
            assert_eq!(provider.provider_name(), name);
        }
    }

    #[test]
    fn test_unlisted_provider_is_unknown() {
        let result = ProviderFactory::create("google", &enabled("k"));
        assert!(matches!(result, Err(FinderError::UnknownProvider(name)) if name == "google"));
    }

    #[test]
    fn test_disabled_provider_is_refused_before_key_lookup() {
        let config = ProviderConfig {
            enabled: false,
            api_key: None,
            ..enabled("unused")
        };
        let result = ProviderFactory::create("anthropic", &config);
        assert!(matches!(result, Err(FinderError::ProviderDisabled(name)) if name == "anthropic"));
    }

    #[test]
    fn test_named_and_default_provider_lookup() {
        let mut config = AppConfig {
            default_provider: "anthropic".to_string(),
            ..Default::default()
        };
        config.providers.insert("anthropic".to_string(), enabled("a"));
        config.providers.insert("openai".to_string(), enabled("o"));

        let default = ProviderFactory::get_default_provider(&config).unwrap();
        assert_eq!(default.provider_name(), "anthropic");
        let named = ProviderFactory::get_provider(&config, "openai").unwrap();
        assert_eq!(named.provider_name(), "openai");
    }

    #[test]
    fn test_unconfigured_default_provider() {
        let result = ProviderFactory::get_default_provider(&AppConfig::default());
        assert!(matches!(result, Err(FinderError::UnknownProvider(name)) if name == "openai"));
    }
}
