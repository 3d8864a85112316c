#![allow(dead_code)]

use civic_ml_backend::core::{Classifier, ImageTensor, LabelList, ModelInfo};
use civic_ml_backend::{InferenceService, Result};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::io::Cursor;
use std::sync::Arc;

pub const BOUNDARY: &str = "civic-test-boundary";

/// Returns the same scores for every image, after checking the input contract.
#[derive(Debug)]
pub struct MockClassifier {
    pub scores: Vec<f32>,
}

impl Classifier for MockClassifier {
    fn predict(&self, input: &ImageTensor) -> Result<Vec<f32>> {
        assert_eq!(input.shape, [1, 224, 224, 3]);
        assert!(input.data.iter().all(|v| (0.0..=1.0).contains(v)));
        Ok(self.scores.clone())
    }
}

pub fn labels(names: &[&str]) -> LabelList {
    names.iter().map(|s| s.to_string()).collect()
}

pub fn service(scores: Vec<f32>, labels: LabelList) -> Arc<InferenceService<MockClassifier>> {
    let info = ModelInfo {
        model_path: "models/garbage_model.onnx".to_string(),
        labels: labels.len(),
        image_size: 224,
        loaded_at: chrono::Utc::now(),
    };
    Arc::new(InferenceService::new(MockClassifier { scores }, labels, info))
}

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img)
        .write_to(&mut buf, ImageFormat::Png)
        .unwrap();
    buf.into_inner()
}

/// Single-part multipart body and its content type.
pub fn multipart_body(field: &str, filename: Option<&str>, content: &[u8]) -> (String, Vec<u8>) {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    match filename {
        Some(name) => {
            body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                    field, name
                )
                .as_bytes(),
            );
            body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        }
        None => {
            body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", field).as_bytes(),
            );
        }
    }
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

    (format!("multipart/form-data; boundary={}", BOUNDARY), body)
}
