//! Product API handlers

use axum::{
    extract::{Path, State},
    Json,
};
use shared::models::{ProductCreate, ProductUpdate, ProductView};

use crate::core::ServerState;
use crate::db::repository::product;
use crate::utils::validation::{
    validate_optional_text, validate_required_text, MAX_NAME_LEN, MAX_NOTE_LEN,
};
use crate::utils::{AppError, AppResult, FieldError};

/// GET /api/products - active catalog
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<ProductView>>> {
    let products = product::find_all(&state.db).await?;
    Ok(Json(products.into_iter().map(ProductView::from).collect()))
}

/// GET /api/products/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ProductView>> {
    let product = product::find_by_id(&state.db, id).await?;
    Ok(Json(product.into()))
}

/// POST /api/products
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ProductCreate>,
) -> AppResult<Json<ProductView>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    if payload.price < 0 {
        return Err(AppError::validation(vec![FieldError::new(
            "price",
            "Price must not be negative",
        )]));
    }
    if payload.stock_quantity.is_some_and(|s| s < 0) {
        return Err(AppError::validation(vec![FieldError::new(
            "stockQuantity",
            "Stock must not be negative",
        )]));
    }

    let created = product::create(&state.db, &payload).await?;
    tracing::info!(product_id = created.id, name = %created.name, "Product created");
    Ok(Json(created.into()))
}

/// PUT /api/products/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<Json<ProductView>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    if payload.price.is_some_and(|p| p < 0) {
        return Err(AppError::validation(vec![FieldError::new(
            "price",
            "Price must not be negative",
        )]));
    }

    let updated = product::update(&state.db, id, &payload).await?;
    Ok(Json(updated.into()))
}

/// DELETE /api/products/{id} - soft delete
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    product::delete(&state.db, id).await?;
    tracing::info!(product_id = id, "Product deactivated");
    Ok(Json(true))
}
