mod fixed_window_rate_limiter;
mod openai_generator;
mod openai_moderation;

pub use fixed_window_rate_limiter::*;
pub use openai_generator::*;
pub use openai_moderation::*;
