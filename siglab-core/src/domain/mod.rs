//! Domain types shared across the engine.

pub mod candle;

pub use candle::{closes, validate_series, volumes, Candle};
