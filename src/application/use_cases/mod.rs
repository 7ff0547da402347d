mod dispense_drink;
mod extract;

pub use dispense_drink::*;
pub use extract::*;
