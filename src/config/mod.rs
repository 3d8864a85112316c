#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::core::preprocess::IMAGE_SIZE;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_file_extension, validate_non_empty_string, validate_path, validate_range, Validate,
};
use toml_config::TomlConfig;

pub const DEFAULT_MODEL_PATH: &str = "models/garbage_model.onnx";
pub const DEFAULT_LABELS_PATH: &str = "models/class_names.json";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;

/// Resolved runtime configuration: defaults, then file, then command line.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub model_path: String,
    pub labels_path: String,
    pub image_size: u32,
    pub verbose: bool,
    pub json_logs: bool,
    pub monitor: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            model_path: DEFAULT_MODEL_PATH.to_string(),
            labels_path: DEFAULT_LABELS_PATH.to_string(),
            image_size: IMAGE_SIZE,
            verbose: false,
            json_logs: false,
            monitor: false,
        }
    }
}

impl ServerConfig {
    /// Overlay the values present in a configuration file.
    pub fn apply_file(mut self, file: &TomlConfig) -> Self {
        if let Some(server) = &file.server {
            if let Some(host) = &server.host {
                self.host = host.clone();
            }
            if let Some(port) = server.port {
                self.port = port;
            }
        }

        if let Some(model) = &file.model {
            if let Some(path) = &model.path {
                self.model_path = path.clone();
            }
            if let Some(labels_path) = &model.labels_path {
                self.labels_path = labels_path.clone();
            }
            if let Some(image_size) = model.image_size {
                self.image_size = image_size;
            }
        }

        if let Some(logging) = &file.logging {
            self.verbose = logging.verbose.unwrap_or(self.verbose);
            self.json_logs = logging.json.unwrap_or(self.json_logs);
        }

        self.monitor = self.monitor || file.monitoring_enabled();
        self
    }
}

impl ConfigProvider for ServerConfig {
    fn model_path(&self) -> &str {
        &self.model_path
    }

    fn labels_path(&self) -> &str {
        &self.labels_path
    }

    fn image_size(&self) -> u32 {
        self.image_size
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("server.host", &self.host)?;
        validate_path("model.path", &self.model_path)?;
        validate_file_extension("model.path", &self.model_path, &["onnx"])?;
        validate_path("model.labels_path", &self.labels_path)?;
        validate_file_extension("model.labels_path", &self.labels_path, &["json"])?;
        validate_range("model.image_size", self.image_size, 1, 4096)?;
        Ok(())
    }
}
