pub mod market;
pub mod ranking;

pub use market::*;
pub use ranking::*;
