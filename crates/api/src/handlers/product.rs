//! Handlers for the `/product` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use storefront_core::error::CoreError;
use storefront_core::types::DbId;
use storefront_db::models::product::{CreateProduct, Product};

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::middleware::rbac::RequireSeller;
use crate::response::Success;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ProductList {
    pub products: Vec<Product>,
}

#[derive(Debug, Serialize)]
pub struct ProductBody {
    pub product: Product,
}

/// GET /api/product/list
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Success<ProductList>>> {
    let products = state.store.list_products().await?;
    Ok(Json(Success::new(ProductList { products })))
}

/// GET /api/product/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<Success<ProductBody>>> {
    let product = state
        .store
        .find_product(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }))?;
    Ok(Json(Success::new(ProductBody { product })))
}

/// POST /api/product/add
pub async fn create(
    State(state): State<AppState>,
    RequireSeller(_seller): RequireSeller,
    AppJson(mut input): AppJson<CreateProduct>,
) -> AppResult<(StatusCode, Json<Success<ProductBody>>)> {
    input.name = input.name.trim().to_string();
    validate_product(&input)?;

    let product = state.store.create_product(&input).await?;
    tracing::info!(product_id = product.id, name = %product.name, "Product added");
    Ok((StatusCode::CREATED, Json(Success::new(ProductBody { product }))))
}

fn validate_product(input: &CreateProduct) -> Result<(), CoreError> {
    if input.name.is_empty() {
        return Err(CoreError::Validation("Product name is required".into()));
    }
    if !input.price.is_finite() || input.price < 0.0 {
        return Err(CoreError::Validation(
            "Price must be a non-negative number".into(),
        ));
    }
    if let Some(offer) = input.offer_price {
        if !offer.is_finite() || offer < 0.0 {
            return Err(CoreError::Validation(
                "Offer price must be a non-negative number".into(),
            ));
        }
    }
    Ok(())
}
