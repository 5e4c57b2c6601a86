//! API routes module

pub mod health;
pub mod products;

use axum::Router;

use crate::state::AppState;

/// Routes nested under `/api`
pub fn routes(state: &AppState) -> Router {
    api_router(products::router(state))
}

fn api_router(products: Router) -> Router {
    Router::new().nest("/products", products)
}
