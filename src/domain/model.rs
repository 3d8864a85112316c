use chrono::{DateTime, Utc};
use serde::Serialize;

/// Preprocessed image in NHWC layout, shape `[1, size, size, 3]`, values in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageTensor {
    pub shape: [usize; 4],
    pub data: Vec<f32>,
}

impl ImageTensor {
    pub fn height(&self) -> usize {
        self.shape[1]
    }

    pub fn width(&self) -> usize {
        self.shape[2]
    }

    pub fn channels(&self) -> usize {
        self.shape[3]
    }
}

/// Response body of `POST /predict`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    #[serde(rename = "prediction")]
    pub label: String,
    pub confidence: f32,
}

/// Index-aligned class names. Index `i` names the model's `i`-th output.
pub type LabelList = Vec<String>;

#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub model_path: String,
    /// Number of entries in the label list, not the model's output width.
    pub labels: usize,
    pub image_size: u32,
    pub loaded_at: DateTime<Utc>,
}
