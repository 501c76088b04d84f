//! Technical indicator implementations.

pub mod ema;
pub mod macd;
pub mod rsi;
pub mod trend;
pub mod volatility;

pub use ema::Ema;
pub use macd::{FractionalSignal, Macd, MacdOutput, SignalLine};
pub use rsi::Rsi;
pub use trend::classify_trend;
pub use volatility::Volatility;
