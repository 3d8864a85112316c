use crate::adapters::onnx::OnnxClassifier;
use crate::core::labels::load_labels;
use crate::domain::model::{LabelList, ModelInfo};
use crate::domain::ports::{Classifier, ConfigProvider};
use crate::utils::error::Result;
use std::path::Path;

/// Everything the request path needs, produced once before serving.
#[derive(Debug)]
pub struct LoadedModel<M: Classifier> {
    pub classifier: M,
    pub labels: LabelList,
    pub info: ModelInfo,
}

pub struct StartupLoader;

impl StartupLoader {
    /// 載入 ONNX 模型與標籤清單；任何模型錯誤都會中止啟動
    pub fn load<C: ConfigProvider>(config: &C) -> Result<LoadedModel<OnnxClassifier>> {
        Self::load_with(config, |path, size| OnnxClassifier::load(path, size))
    }

    /// Same as [`StartupLoader::load`] with a caller-supplied model constructor.
    pub fn load_with<C, M, F>(config: &C, build: F) -> Result<LoadedModel<M>>
    where
        C: ConfigProvider,
        M: Classifier,
        F: FnOnce(&Path, u32) -> Result<M>,
    {
        let model_path = Path::new(config.model_path());
        let classifier = build(model_path, config.image_size())?;
        let labels = load_labels(config.labels_path())?;

        let info = ModelInfo {
            model_path: config.model_path().to_string(),
            labels: labels.len(),
            image_size: config.image_size(),
            loaded_at: chrono::Utc::now(),
        };

        tracing::info!(
            model = %info.model_path,
            labels = %config.labels_path(),
            label_count = info.labels,
            image_size = info.image_size,
            "✅ Model and labels loaded"
        );

        Ok(LoadedModel {
            classifier,
            labels,
            info,
        })
    }
}
