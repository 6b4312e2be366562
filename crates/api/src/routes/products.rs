//! Product route handlers: public catalog reads, admin catalog writes,
//! and image upload.

use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use maracuja_core::ProductId;

use crate::db::products::ProductRepository;
use crate::error::{ApiError, Result};
use crate::middleware::{RequireAdmin, RequireAuth};
use crate::models::{CreateProductRequest, MessageResponse, UpdateProductRequest};
use crate::services::upload::{UploadError, store_upload};
use crate::state::AppState;

/// GET /products
pub async fn index(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let products = ProductRepository::new(state.pool()).list().await?;
    Ok(Json(serde_json::json!({ "products": products })))
}

/// GET /products/{id}
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let id: ProductId = id
        .parse()
        .map_err(|_| ApiError::Validation("Invalid product ID".to_string()))?;

    let product = ProductRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Product not found".to_string()))?;

    Ok(Json(serde_json::json!({ "product": product })))
}

/// POST /products (admin only)
pub async fn create(
    _auth: RequireAuth,
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Json(req): Json<CreateProductRequest>,
) -> Result<impl IntoResponse> {
    let product = ProductRepository::new(state.pool()).create(&req).await?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "product": product })),
    ))
}

/// POST /products/upload (admin only)
///
/// Accepts a multipart form with an `image` field, stores the file on
/// disk, and returns the public URL it will be served from.
pub async fn upload(
    _auth: RequireAuth,
    _admin: RequireAdmin,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some("image") {
            continue;
        }

        let original_name = field.file_name().unwrap_or("upload").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::Validation(format!("Invalid multipart body: {e}")))?;

        let filename = store_upload(&state.config().upload_dir, &original_name, &data).await?;
        let image_url = format!("{}/uploads/{}", state.config().base_url, filename);

        tracing::info!(%filename, "product image stored");

        return Ok((
            StatusCode::CREATED,
            Json(serde_json::json!({ "imageUrl": image_url })),
        ));
    }

    Err(ApiError::Upload(UploadError::MissingFile))
}

/// PUT /products/{id} (admin only)
pub async fn update(
    _auth: RequireAuth,
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(req): Json<UpdateProductRequest>,
) -> Result<impl IntoResponse> {
    let product = ProductRepository::new(state.pool())
        .update(id, &req)
        .await
        .map_err(|e| match e {
            crate::db::RepositoryError::NotFound => {
                ApiError::NotFound("Product not found".to_string())
            }
            other => ApiError::Database(other),
        })?;

    Ok(Json(serde_json::json!({ "product": product })))
}

/// DELETE /products/{id} (admin only)
pub async fn delete(
    _auth: RequireAuth,
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<impl IntoResponse> {
    let deleted = ProductRepository::new(state.pool()).delete(id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Product not found".to_string()));
    }

    Ok(Json(MessageResponse::new("Product deleted")))
}
