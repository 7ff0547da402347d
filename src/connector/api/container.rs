use std::sync::Arc;

use crate::application::{DispenseDrinkUseCase, DrinkGenerator, ModerationGate, RateLimiter};
use crate::{FixedWindowRateLimiter, OpenAiGenerator, OpenAiModeration};

pub struct ContainerConfig {
    /// Provider credential, validated at boot.
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub moderation_model: String,
    pub rate_limit_per_minute: u32,
}

/// Wires adapters to the dispensing use case and holds the shared state the
/// HTTP layer needs. Built once at startup, read-only afterwards.
pub struct Container {
    use_case: Arc<DispenseDrinkUseCase>,
    rate_limiter: Arc<dyn RateLimiter>,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Self {
        let moderation: Arc<dyn ModerationGate> = Arc::new(OpenAiModeration::new(
            &config.api_key,
            &config.moderation_model,
            &config.base_url,
        ));
        let generator: Arc<dyn DrinkGenerator> = Arc::new(OpenAiGenerator::new(
            &config.api_key,
            &config.model,
            &config.base_url,
        ));

        Self {
            use_case: Arc::new(DispenseDrinkUseCase::new(moderation, generator)),
            rate_limiter: Arc::new(FixedWindowRateLimiter::per_minute(
                config.rate_limit_per_minute,
            )),
        }
    }

    /// Assemble from pre-built components. Used by tests to substitute mock
    /// gates without touching the network.
    pub fn with_components(
        use_case: Arc<DispenseDrinkUseCase>,
        rate_limiter: Arc<dyn RateLimiter>,
    ) -> Self {
        Self {
            use_case,
            rate_limiter,
        }
    }

    pub fn dispense_use_case(&self) -> &DispenseDrinkUseCase {
        &self.use_case
    }

    pub fn rate_limiter(&self) -> &dyn RateLimiter {
        self.rate_limiter.as_ref()
    }
}
