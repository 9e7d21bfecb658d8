use axum::{
    Json,
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;

use super::auth::CurrentUser;
use super::caching::LastModifiedStamp;
use super::types::{CreateRecipeRequest, EditRecipeBody, RecipeCreatedResponse};
use super::validation::{
    validate_ingredients, validate_limit, validate_recipe_fields, validate_recipe_id,
};
use super::{ApiError, ApiResponse, AppState};
use crate::domain::{RecipeId, can_manage};
use crate::models::recipe::{
    CreateIngredientCommand, CreateRecipeCommand, RecipeDetail, RecipeSummary, UpdateRecipeCommand,
};

#[derive(Deserialize)]
pub struct MineQuery {
    #[serde(default = "default_mine_limit")]
    pub limit: u64,
}

const fn default_mine_limit() -> u64 {
    10
}

/// Loads the recipe row regardless of deletion state and rejects callers
/// who did not create it. Missing recipes map to 404 here so a
/// non-existent id never leaks whether it was someone else's.
async fn ensure_owner(
    state: &AppState,
    user: &CurrentUser,
    id: RecipeId,
) -> Result<(), ApiError> {
    let recipe = state
        .store()
        .find_recipe_any(id)
        .await?
        .ok_or_else(|| ApiError::recipe_not_found(id))?;

    if !can_manage(Some(user.id), recipe.created_by_id) {
        tracing::warn!(
            "User {} denied access to recipe {id} owned by {}",
            user.username,
            recipe.created_by_id
        );
        return Err(ApiError::forbidden("Only the recipe's creator can do that"));
    }

    Ok(())
}

/// GET /recipe
pub async fn list_recipes(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<RecipeSummary>>>, ApiError> {
    let recipes = state.recipe_service().get_recipes().await?;
    Ok(Json(ApiResponse::success(recipes)))
}

/// GET /recipe/mine?limit=N
pub async fn my_recipes(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<MineQuery>,
) -> Result<Json<ApiResponse<Vec<RecipeSummary>>>, ApiError> {
    let limit = validate_limit(query.limit)?;

    let recipes = state
        .recipe_service()
        .get_user_recipes(user.id, limit)
        .await?;

    Ok(Json(ApiResponse::success(recipes)))
}

/// POST /recipe
pub async fn create_recipe(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<CreateRecipeRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RecipeCreatedResponse>>), ApiError> {
    validate_recipe_fields(&payload.recipe)?;
    validate_ingredients(&payload.ingredients)?;

    let cmd = CreateRecipeCommand {
        name: payload.recipe.name,
        time_to_cook_hrs: payload.recipe.time_to_cook_hrs,
        time_to_cook_mins: payload.recipe.time_to_cook_mins,
        method: payload.recipe.method,
        is_vegetarian: payload.recipe.is_vegetarian,
        is_vegan: payload.recipe.is_vegan,
        ingredients: payload
            .ingredients
            .into_iter()
            .map(|i| CreateIngredientCommand {
                name: i.name,
                quantity: i.quantity,
                unit: i.unit,
            })
            .collect(),
    };

    let created = state.recipe_service().create_recipe(cmd, user.id).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(RecipeCreatedResponse { id: created.id })),
    ))
}

/// GET /recipe/{id}
///
/// Attaches the recipe's modification time to the response so the
/// conditional GET middleware can answer revalidation requests.
pub async fn get_recipe(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Response, ApiError> {
    let id = RecipeId::new(validate_recipe_id(id)?);

    let detail: RecipeDetail = state
        .recipe_service()
        .get_recipe(id)
        .await?
        .ok_or_else(|| ApiError::recipe_not_found(id))?;

    let stamp = DateTime::parse_from_rfc3339(&detail.last_modified)
        .ok()
        .map(|t| LastModifiedStamp(t.with_timezone(&Utc)));

    let mut response = Json(ApiResponse::success(detail)).into_response();
    if let Some(stamp) = stamp {
        response.extensions_mut().insert(stamp);
    }

    Ok(response)
}

/// GET /recipe/{id}/edit
pub async fn get_recipe_for_edit(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<UpdateRecipeCommand>>, ApiError> {
    let id = RecipeId::new(validate_recipe_id(id)?);

    ensure_owner(&state, &user, id).await?;

    let edit = state
        .recipe_service()
        .get_recipe_for_update(id)
        .await?
        .ok_or_else(|| ApiError::recipe_not_found(id))?;

    Ok(Json(ApiResponse::success(edit)))
}

/// POST /recipe/{id}
pub async fn update_recipe(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
    Json(payload): Json<EditRecipeBody>,
) -> Result<Json<ApiResponse<RecipeCreatedResponse>>, ApiError> {
    let id = RecipeId::new(validate_recipe_id(id)?);

    validate_recipe_fields(&payload)?;
    ensure_owner(&state, &user, id).await?;

    let cmd = UpdateRecipeCommand {
        id,
        name: payload.name,
        time_to_cook_hrs: payload.time_to_cook_hrs,
        time_to_cook_mins: payload.time_to_cook_mins,
        method: payload.method,
        is_vegetarian: payload.is_vegetarian,
        is_vegan: payload.is_vegan,
    };

    state.recipe_service().update_recipe(cmd).await?;

    Ok(Json(ApiResponse::success(RecipeCreatedResponse { id })))
}

/// DELETE /recipe/{id}
pub async fn delete_recipe(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let id = RecipeId::new(validate_recipe_id(id)?);

    ensure_owner(&state, &user, id).await?;

    state.recipe_service().delete_recipe(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
