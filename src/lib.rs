pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliArgs;

pub use adapters::{http::create_router, onnx::OnnxClassifier};
pub use config::ServerConfig;
pub use crate::core::{inference::InferenceService, loader::StartupLoader};
pub use utils::error::{InferenceError, Result};
