pub mod model;
pub mod settings;

pub use model::{load_model_configuration, validate_model_configuration};
pub use settings::{EngineSettings, LogFormat};
