pub mod application;
pub mod connector;
pub mod domain;

pub use application::{
    extract_payload, DispenseDrinkUseCase, DrinkGenerator, ModerationGate, RateLimiter,
};

pub use connector::{
    build_router, ContainerConfig, FixedWindowRateLimiter, OpenAiGenerator, OpenAiModeration,
};

pub use domain::{
    fallback, prefilter, sanitize, Container, DomainError, DrinkRequest, DrinkResponse, EffectId,
    EffectParams, Temperature, Visual,
};
