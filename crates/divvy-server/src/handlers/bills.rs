//! Bill validation and split handlers

use std::sync::Arc;

use axum::{body::Bytes, extract::State, Json};
use serde::Deserialize;

use crate::{ApiResponse, AppError, AppState};
use divvy_core::{check_item_splits, check_line_items, ItemSplit, LineItem, PersonAllocation};

/// Request body for split and validate endpoints
#[derive(Debug, Deserialize)]
pub struct BillRequest {
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub splits: Option<Vec<ItemSplit>>,
}

fn parse_bill_request(body: &[u8]) -> Result<BillRequest, AppError> {
    serde_json::from_slice(body)
        .map_err(|e| AppError::bad_request(&format!("Invalid JSON: {}", e)))
}

/// POST /api/validate - Check line items, and item splits when given
pub async fn validate_bill(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let req = parse_bill_request(&body)?;
    let config = &state.config.split;

    check_line_items(&req.items, config)?;
    if let Some(splits) = &req.splits {
        check_item_splits(&req.items, splits, config)?;
    }

    Ok(ApiResponse::success("bill is valid", None))
}

/// POST /api/split - Validate line items and item splits, then allocate
pub async fn split_bill(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ApiResponse<Vec<PersonAllocation>>>, AppError> {
    let req = parse_bill_request(&body)?;
    let splits = req
        .splits
        .ok_or_else(|| AppError::bad_request("Missing 'splits'"))?;

    let allocations = divvy_core::split_bill(&req.items, &splits, &state.config.split)?;

    tracing::info!(
        items = req.items.len(),
        people = allocations.len(),
        "Bill split calculated"
    );

    Ok(ApiResponse::success(
        "bill split calculated",
        Some(allocations),
    ))
}
