use crate::utils::error::{InferenceError, Result};
use regex::Regex;
use serde::Deserialize;
use std::path::Path;

/// Optional configuration file. Every key may be omitted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub server: Option<ServerSection>,
    pub model: Option<ModelSection>,
    pub logging: Option<LoggingSection>,
    pub monitoring: Option<MonitoringSection>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerSection {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModelSection {
    pub path: Option<String>,
    pub labels_path: Option<String>,
    pub image_size: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingSection {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MonitoringSection {
    pub enabled: bool,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(InferenceError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| InferenceError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${MODEL_DIR})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| InferenceError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[server]
host = "127.0.0.1"
port = 9000

[model]
path = "models/garbage_model.onnx"
labels_path = "models/class_names.json"
image_size = 224

[logging]
verbose = true
json = false

[monitoring]
enabled = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let server = config.server.as_ref().unwrap();
        assert_eq!(server.host.as_deref(), Some("127.0.0.1"));
        assert_eq!(server.port, Some(9000));
        assert_eq!(config.model.as_ref().unwrap().image_size, Some(224));
        assert_eq!(config.logging.as_ref().unwrap().verbose, Some(true));
        assert!(config.monitoring_enabled());
    }

    #[test]
    fn test_empty_config_is_valid() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.server.is_none());
        assert!(!config.monitoring_enabled());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("CIVIC_TEST_MODEL_DIR", "/srv/models");

        let toml_content = r#"
[model]
path = "${CIVIC_TEST_MODEL_DIR}/garbage_model.onnx"
labels_path = "${CIVIC_TEST_UNSET_VAR}/class_names.json"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let model = config.model.unwrap();
        assert_eq!(model.path.as_deref(), Some("/srv/models/garbage_model.onnx"));
        assert_eq!(
            model.labels_path.as_deref(),
            Some("${CIVIC_TEST_UNSET_VAR}/class_names.json")
        );

        std::env::remove_var("CIVIC_TEST_MODEL_DIR");
    }

    #[test]
    fn test_invalid_toml() {
        let err = TomlConfig::from_toml_str("[server\nport = ").unwrap_err();
        assert!(matches!(err, InferenceError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_wrong_type() {
        assert!(TomlConfig::from_toml_str("[server]\nport = \"eighty\"").is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"[server]\nport = 8123\n").unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.server.unwrap().port, Some(8123));
    }

    #[test]
    fn test_missing_file() {
        let err = TomlConfig::from_file("/nonexistent/civic-ml-backend.toml").unwrap_err();
        assert!(matches!(err, InferenceError::IoError(_)));
    }
}
