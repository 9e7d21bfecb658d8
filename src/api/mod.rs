use axum::{
    Router,
    extract::{Request, State},
    http::{HeaderValue, StatusCode},
    middleware,
    middleware::Next,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use time;

use crate::config::Config;
use crate::state::SharedState;

pub mod auth;
pub mod caching;
mod error;
mod headers;
mod recipes;
mod types;
mod validation;

pub use error::ApiError;
pub use types::*;

use tokio::sync::RwLock;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Arc<RwLock<Config>> {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &Arc<crate::db::Store> {
        &self.shared.store
    }

    #[must_use]
    pub fn recipe_service(&self) -> &Arc<dyn crate::services::RecipeService> {
        &self.shared.recipe_service
    }

    #[must_use]
    pub fn auth_service(&self) -> &Arc<dyn crate::services::AuthService> {
        &self.shared.auth_service
    }
}

pub async fn create_app_state(shared: Arc<SharedState>) -> anyhow::Result<Arc<AppState>> {
    Ok(Arc::new(AppState { shared }))
}

pub async fn create_app_state_from_config(config: Config) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    create_app_state(shared).await
}

/// Answers 404 for every recipe route while the recipe API is switched
/// off in config. The request never reaches auth or the service.
async fn recipes_enabled_gate(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let enabled = state.config().read().await.api.recipes_enabled;

    if !enabled {
        return StatusCode::NOT_FOUND.into_response();
    }

    next.run(request).await
}

pub async fn router(state: Arc<AppState>) -> Router {
    let (cors_origins, session_expiry_minutes) = {
        let config = state.config().read().await;
        (
            config.server.cors_allowed_origins.clone(),
            config.server.session_expiry_minutes,
        )
    };

    let recipe_routes = Router::new()
        .route(
            "/recipe",
            get(recipes::list_recipes).post(recipes::create_recipe),
        )
        .route("/recipe/mine", get(recipes::my_recipes))
        .route(
            "/recipe/{id}",
            get(recipes::get_recipe)
                .post(recipes::update_recipe)
                .delete(recipes::delete_recipe),
        )
        .route("/recipe/{id}/edit", get(recipes::get_recipe_for_edit))
        .route_layer(middleware::from_fn(caching::conditional_get))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::auth_middleware,
        ))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            recipes_enabled_gate,
        ));

    let account_routes = Router::new()
        .route("/auth/me", get(auth::get_current_user))
        .route("/auth/api-key", get(auth::get_api_key))
        .route("/auth/api-key/regenerate", post(auth::regenerate_api_key))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::auth_middleware,
        ));

    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(
            session_expiry_minutes,
        )));

    let api_router = Router::new()
        .merge(recipe_routes)
        .merge(account_routes)
        .route("/auth/signup", post(auth::signup))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .layer(session_layer)
        .with_state(state.clone());

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest("/api", api_router)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(headers::security_headers))
}
