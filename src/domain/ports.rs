use crate::domain::model::ImageTensor;
use crate::utils::error::Result;

/// Loaded model handle. Shared read-only by all requests once startup finishes.
pub trait Classifier: Send + Sync {
    /// Per-class scores for a single preprocessed image.
    fn predict(&self, input: &ImageTensor) -> Result<Vec<f32>>;
}

pub trait ConfigProvider: Send + Sync {
    fn model_path(&self) -> &str;
    fn labels_path(&self) -> &str;
    fn image_size(&self) -> u32;
}
