//! Momentum indicators: RSI, trailing return

pub mod rsi;
pub mod trailing_return;

pub use rsi::*;
pub use trailing_return::*;
