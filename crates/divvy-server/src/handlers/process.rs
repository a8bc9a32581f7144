//! Receipt processing handler (image + free-text rules)

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    Json,
};
use tracing::info;

use crate::{ApiResponse, AppError, AppState};
use divvy_core::BillSplit;

/// Form field holding the receipt image
const IMAGE_FIELD: &str = "bill-image";

/// Form field holding the free-text split rules
const RULES_FIELD: &str = "split-rules";

/// Image MIME type from a file name's extension
pub fn mime_from_filename(filename: &str) -> Option<&'static str> {
    let (_, ext) = filename.rsplit_once('.')?;
    match ext.to_ascii_lowercase().as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        "heic" => Some("image/heic"),
        "heif" => Some("image/heif"),
        _ => None,
    }
}

/// POST /api/process - Split a bill from a receipt image and free-text rules
///
/// Multipart form with `bill-image` (file) and `split-rules` (text).
pub async fn process_bill(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<BillSplit>>, AppError> {
    let backend = state
        .backend
        .clone()
        .ok_or_else(|| AppError::unavailable("No split backend configured"))?;

    let mut image: Option<(Vec<u8>, &'static str)> = None;
    let mut rules: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::bad_request(&format!("Failed to read form field: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            IMAGE_FIELD => {
                let mime_type = field
                    .file_name()
                    .and_then(mime_from_filename)
                    .ok_or_else(|| {
                        AppError::bad_request("Receipt must be an image (png, jpg, webp, gif, heic)")
                    })?;
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|_| AppError::bad_request("Failed to read receipt image"))?;
                image = Some((bytes.to_vec(), mime_type));
            }
            RULES_FIELD => {
                let value = field
                    .text()
                    .await
                    .map_err(|_| AppError::bad_request("Failed to read split rules"))?;
                rules = Some(value);
            }
            _ => {}
        }
    }

    let (image, mime_type) =
        image.ok_or_else(|| AppError::bad_request("Missing 'bill-image' field"))?;
    let rules = rules
        .filter(|r| !r.trim().is_empty())
        .ok_or_else(|| AppError::bad_request("Split rules cannot be empty"))?;

    info!(
        image_bytes = image.len(),
        mime_type,
        rules_len = rules.len(),
        "Receipt received"
    );

    let result = divvy_core::process_bill(
        backend.as_ref(),
        &image,
        mime_type,
        &rules,
        &state.config.split,
    )
    .await?;

    Ok(ApiResponse::success("bill split calculated", Some(result)))
}
