// Data contract shared between the engine and its consumers
// (configuration store, presentation layer).
pub mod models;
pub mod utils;
