use crate::core::loader::LoadedModel;
use crate::core::postprocess::{argmax, label_for};
use crate::core::preprocess::preprocess;
use crate::domain::model::{ImageTensor, LabelList, ModelInfo, Prediction};
use crate::domain::ports::Classifier;
use crate::utils::error::{InferenceError, Result};
use std::time::Instant;

/// Request-side half of the service: bytes in, label and confidence out.
///
/// Holds the model handle and label list read-only for the lifetime of the
/// process. Each call is independent.
pub struct InferenceService<M: Classifier> {
    classifier: M,
    labels: LabelList,
    info: ModelInfo,
}

impl<M: Classifier> InferenceService<M> {
    pub fn new(classifier: M, labels: LabelList, info: ModelInfo) -> Self {
        Self {
            classifier,
            labels,
            info,
        }
    }

    pub fn info(&self) -> &ModelInfo {
        &self.info
    }

    pub fn labels(&self) -> &LabelList {
        &self.labels
    }

    pub fn predict(&self, image_bytes: &[u8]) -> Result<Prediction> {
        let started = Instant::now();
        let input = preprocess(image_bytes, self.info.image_size)?;
        let prediction = self.classify(&input)?;

        tracing::debug!(
            label = %prediction.label,
            confidence = prediction.confidence,
            bytes = image_bytes.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Prediction complete"
        );
        Ok(prediction)
    }

    /// Run the model on an already preprocessed tensor.
    pub fn classify(&self, input: &ImageTensor) -> Result<Prediction> {
        let scores = self.classifier.predict(input)?;
        let idx = argmax(&scores).ok_or_else(|| InferenceError::ModelOutput {
            message: "model returned an empty score vector".to_string(),
        })?;

        let confidence = scores[idx];
        if !confidence.is_finite() {
            return Err(InferenceError::ModelOutput {
                message: format!("non-finite score {} at index {}", confidence, idx),
            });
        }

        if idx >= self.labels.len() {
            tracing::warn!(
                index = idx,
                labels = self.labels.len(),
                "Predicted class has no label, using synthesized name"
            );
        }

        Ok(Prediction {
            label: label_for(&self.labels, idx),
            confidence,
        })
    }
}

impl<M: Classifier> From<LoadedModel<M>> for InferenceService<M> {
    fn from(loaded: LoadedModel<M>) -> Self {
        Self::new(loaded.classifier, loaded.labels, loaded.info)
    }
}
