//! HTTP surface: liveness, readiness and the prediction endpoint.

use crate::core::inference::InferenceService;
use crate::domain::model::Prediction;
use crate::domain::ports::Classifier;
use crate::utils::error::{InferenceError, Result};
use axum::{
    body::Bytes,
    extract::{multipart::MultipartRejection, DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Multipart field the image is expected in.
pub const UPLOAD_FIELD: &str = "file";

impl IntoResponse for InferenceError {
    fn into_response(self) -> Response {
        let (status, message) = if self.is_client_error() {
            tracing::warn!(error = %self, "Rejected prediction request");
            (StatusCode::BAD_REQUEST, self.to_string())
        } else {
            tracing::error!(
                error = %self,
                category = ?self.category(),
                "Prediction request failed"
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Inference failed. Check server logs for details.".to_string(),
            )
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub fn create_router<M: Classifier + 'static>(service: Arc<InferenceService<M>>) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/ready", get(ready::<M>))
        .route("/predict", post(predict::<M>))
        .fallback(handle_404)
        // Upload size is bounded only by what the decoder accepts.
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "message": "ML backend running" }))
}

async fn ready<M: Classifier + 'static>(
    State(service): State<Arc<InferenceService<M>>>,
) -> Json<serde_json::Value> {
    let info = service.info();
    Json(json!({
        "status": "ready",
        "model": info.model_path,
        "labels": info.labels,
        "image_size": info.image_size,
        "loaded_at": info.loaded_at.to_rfc3339(),
    }))
}

async fn predict<M: Classifier + 'static>(
    State(service): State<Arc<InferenceService<M>>>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<Prediction>> {
    let multipart = multipart.map_err(|e| InferenceError::MalformedUpload {
        message: e.body_text(),
    })?;
    let image = read_upload(multipart).await?;

    // 解碼與推論屬於 CPU 密集工作，移到 blocking 執行緒
    let prediction = tokio::task::spawn_blocking(move || service.predict(&image))
        .await
        .map_err(|e| InferenceError::Inference {
            message: format!("prediction task failed: {}", e),
        })??;

    Ok(Json(prediction))
}

/// Bytes of the `file` part, or of the first part carrying a filename.
async fn read_upload(mut multipart: Multipart) -> Result<Bytes> {
    let mut fallback = None;

    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        let named_file = field.name() == Some(UPLOAD_FIELD);
        if !named_file && (field.file_name().is_none() || fallback.is_some()) {
            continue;
        }

        let data = field.bytes().await.map_err(malformed)?;
        if named_file {
            return Ok(data);
        }
        fallback = Some(data);
    }

    fallback.ok_or(InferenceError::MissingUpload)
}

fn malformed(e: axum::extract::multipart::MultipartError) -> InferenceError {
    InferenceError::MalformedUpload {
        message: e.to_string(),
    }
}

async fn handle_404() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" })))
}
