use thiserror::Error;

#[derive(Error, Debug)]
pub enum InferenceError {
    #[error("Failed to load model from {path}: {message}")]
    ModelLoad { path: String, message: String },

    #[error("Invalid label file {path}: {message}")]
    LabelFile { path: String, message: String },

    #[error("Invalid image: {0}")]
    ImageDecode(#[from] image::ImageError),

    #[error("Missing image file.")]
    MissingUpload,

    #[error("Malformed upload: {message}")]
    MalformedUpload { message: String },

    #[error("Unexpected model output: {message}")]
    ModelOutput { message: String },

    #[error("Inference failed: {message}")]
    Inference { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Startup,
    Request,
    Inference,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl InferenceError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            InferenceError::ConfigError { .. }
            | InferenceError::ConfigValidationError { .. }
            | InferenceError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            InferenceError::ModelLoad { .. } | InferenceError::LabelFile { .. } => {
                ErrorCategory::Startup
            }
            InferenceError::ImageDecode(_)
            | InferenceError::MissingUpload
            | InferenceError::MalformedUpload { .. } => ErrorCategory::Request,
            InferenceError::ModelOutput { .. } | InferenceError::Inference { .. } => {
                ErrorCategory::Inference
            }
            InferenceError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Request => ErrorSeverity::Low,
            ErrorCategory::Inference => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Startup | ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 請求層級的錯誤 (由呼叫端造成，回應 400)
    pub fn is_client_error(&self) -> bool {
        self.category() == ErrorCategory::Request
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            InferenceError::ModelLoad { .. } => {
                "Check that --model-path points to an ONNX export of the trained model"
            }
            InferenceError::LabelFile { .. } => {
                "The label file must be a JSON array of strings; fix it or remove it to use default labels"
            }
            InferenceError::ImageDecode(_) => "Upload a valid JPEG or PNG image",
            InferenceError::MissingUpload => "Send the image as a multipart field named 'file'",
            InferenceError::MalformedUpload { .. } => {
                "Use a multipart/form-data request body"
            }
            InferenceError::ModelOutput { .. } | InferenceError::Inference { .. } => {
                "Check that the model input size matches --image-size"
            }
            InferenceError::IoError(_) => "Check file permissions and paths",
            InferenceError::ConfigError { .. }
            | InferenceError::ConfigValidationError { .. }
            | InferenceError::InvalidConfigValueError { .. } => {
                "Review the command line flags and the TOML configuration file"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Startup => format!("Service could not start: {}", self),
            _ => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, InferenceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_errors_are_client_errors() {
        assert!(InferenceError::MissingUpload.is_client_error());
        assert!(InferenceError::MalformedUpload {
            message: "boundary".to_string()
        }
        .is_client_error());
        assert!(!InferenceError::Inference {
            message: "shape".to_string()
        }
        .is_client_error());
    }

    #[test]
    fn test_startup_errors_are_critical() {
        let err = InferenceError::ModelLoad {
            path: "models/garbage_model.onnx".to_string(),
            message: "No such file".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Startup);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(err.user_friendly_message().starts_with("Service could not start"));
    }

    #[test]
    fn test_config_errors_are_high_severity() {
        let err = InferenceError::InvalidConfigValueError {
            field: "port".to_string(),
            value: "0".to_string(),
            reason: "must be between 1 and 65535".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.user_friendly_message().starts_with("Configuration problem"));
    }

    #[test]
    fn test_missing_upload_message() {
        assert_eq!(InferenceError::MissingUpload.to_string(), "Missing image file.");
    }
}
