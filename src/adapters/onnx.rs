//! `Classifier` backed by a tract-optimized ONNX graph.

use crate::domain::model::ImageTensor;
use crate::domain::ports::Classifier;
use crate::utils::error::{InferenceError, Result};
use anyhow::Context;
use std::path::Path;
use std::sync::{Mutex, PoisonError};
use tract_onnx::prelude::*;

type OnnxPlan = TypedRunnableModel<TypedModel>;

pub struct OnnxClassifier {
    // Calls are serialized; the plan is built once and never replaced.
    plan: Mutex<OnnxPlan>,
    image_size: u32,
}

impl std::fmt::Debug for OnnxClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxClassifier")
            .field("image_size", &self.image_size)
            .finish_non_exhaustive()
    }
}

impl OnnxClassifier {
    /// Load and optimize an ONNX model whose input is NHWC `f32 [1, size, size, 3]`.
    pub fn load<P: AsRef<Path>>(path: P, image_size: u32) -> Result<Self> {
        let path = path.as_ref();
        let load_error = |message: String| InferenceError::ModelLoad {
            path: path.display().to_string(),
            message,
        };

        if !path.is_file() {
            return Err(load_error("model file not found".to_string()));
        }

        tracing::info!(path = %path.display(), image_size, "Loading ONNX model");
        let plan = build_plan(path, image_size).map_err(|e| load_error(format!("{:#}", e)))?;

        Ok(Self {
            plan: Mutex::new(plan),
            image_size,
        })
    }

    pub fn image_size(&self) -> u32 {
        self.image_size
    }
}

fn build_plan(path: &Path, image_size: u32) -> anyhow::Result<OnnxPlan> {
    let side = image_size as usize;
    let plan = tract_onnx::onnx()
        .model_for_path(path)
        .context("parsing ONNX graph")?
        .with_input_fact(0, f32::fact([1, side, side, 3]).into())
        .with_context(|| format!("pinning input to [1, {side}, {side}, 3]"))?
        .into_optimized()
        .context("optimizing graph")?
        .into_runnable()
        .context("building execution plan")?;
    Ok(plan)
}

impl Classifier for OnnxClassifier {
    fn predict(&self, input: &ImageTensor) -> Result<Vec<f32>> {
        let tensor = Tensor::from_shape(&input.shape, input.data.as_slice()).map_err(|e| {
            InferenceError::Inference {
                message: format!("could not build input tensor: {:#}", e),
            }
        })?;

        // A panic mid-run leaves no partial state in the plan.
        let plan = self.plan.lock().unwrap_or_else(PoisonError::into_inner);
        let outputs = plan
            .run(tvec!(tensor.into()))
            .map_err(|e| InferenceError::Inference {
                message: format!("{:#}", e),
            })?;
        drop(plan);

        let first = outputs.first().ok_or_else(|| InferenceError::ModelOutput {
            message: "model produced no outputs".to_string(),
        })?;
        let scores = first
            .to_array_view::<f32>()
            .map_err(|e| InferenceError::ModelOutput {
                message: format!("output is not f32: {:#}", e),
            })?;

        Ok(scores.iter().copied().collect())
    }
}
