mod drink;
mod effect;

pub use drink::*;
pub use effect::*;
