mod drink_generator;
mod moderation_gate;
mod rate_limiter;

pub use drink_generator::*;
pub use moderation_gate::*;
pub use rate_limiter::*;
