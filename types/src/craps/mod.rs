mod constants;
mod dice;
mod odds;
mod phase;

pub use constants::*;
pub use dice::*;
pub use odds::*;
pub use phase::*;
