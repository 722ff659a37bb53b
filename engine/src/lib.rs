// Engine library root: indicator engine, prediction synthesizer and their ambient plumbing.

pub mod config;
pub mod data;
pub mod error;
pub mod indicators;
pub mod logging;
pub mod prediction;

pub use error::EngineError;
pub use prediction::predict;
