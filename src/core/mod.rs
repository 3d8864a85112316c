pub mod inference;
pub mod labels;
pub mod loader;
pub mod postprocess;
pub mod preprocess;

pub use crate::domain::model::{ImageTensor, LabelList, ModelInfo, Prediction};
pub use crate::domain::ports::{Classifier, ConfigProvider};
pub use crate::utils::error::Result;
