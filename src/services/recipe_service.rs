//! Domain service for recipe management operations.
//!
//! This module provides a clean domain layer abstraction over data access,
//! enabling testability and separation of concerns.

use crate::domain::RecipeId;
use crate::models::recipe::{
    CreateRecipeCommand, RecipeDetail, RecipeSummary, UpdateRecipeCommand,
};
use thiserror::Error;

/// Domain errors for recipe operations.
#[derive(Debug, Error)]
pub enum RecipeError {
    #[error("Recipe not found: {0}")]
    NotFound(RecipeId),

    #[error("Recipe is deleted: {0}")]
    Deleted(RecipeId),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for RecipeError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for RecipeError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// Splits a total cook time in minutes into the hours and minutes
/// shown on the edit form.
#[must_use]
pub const fn split_cook_time(total_mins: i32) -> (i32, i32) {
    (total_mins / 60, total_mins % 60)
}

/// Domain service trait for recipe operations.
///
/// Handlers talk to this trait instead of the database so the HTTP layer
/// can be tested against a mock.
///
/// # Examples
///
/// ```rust,ignore
/// use simmer::services::{RecipeService, RecipeError};
/// use simmer::domain::RecipeId;
/// use std::sync::Arc;
///
/// async fn example(service: Arc<dyn RecipeService>) -> Result<(), RecipeError> {
///     let id = RecipeId::new(1);
///     let _detail = service.get_recipe(id).await?;
///     Ok(())
/// }
/// ```
#[async_trait::async_trait]
pub trait RecipeService: Send + Sync {
    /// Creates a recipe with its ingredients and returns the stored
    /// record, store-assigned id included.
    ///
    /// # Errors
    ///
    /// Returns [`RecipeError::Database`] on connection failures.
    async fn create_recipe(
        &self,
        cmd: CreateRecipeCommand,
        created_by_id: i32,
    ) -> Result<RecipeDetail, RecipeError>;

    /// Lists all recipes that have not been deleted.
    ///
    /// # Errors
    ///
    /// Returns [`RecipeError::Database`] on connection failures.
    async fn get_recipes(&self) -> Result<Vec<RecipeSummary>, RecipeError>;

    /// Lists the most recently modified recipes created by a user,
    /// newest first, at most `max` of them.
    ///
    /// # Errors
    ///
    /// Returns [`RecipeError::Database`] on connection failures.
    async fn get_user_recipes(
        &self,
        user_id: i32,
        max: u64,
    ) -> Result<Vec<RecipeSummary>, RecipeError>;

    /// Retrieves the full detail view for a recipe.
    ///
    /// Returns `Ok(None)` when the id is unknown or the recipe has been
    /// deleted; callers that need to distinguish the two use
    /// [`RecipeService::update_recipe`] semantics instead.
    ///
    /// # Errors
    ///
    /// Returns [`RecipeError::Database`] on connection failures.
    async fn get_recipe(&self, id: RecipeId) -> Result<Option<RecipeDetail>, RecipeError>;

    /// Retrieves the editable fields of a live recipe, pre-split into
    /// hours and minutes for the edit form.
    ///
    /// # Errors
    ///
    /// Returns [`RecipeError::Database`] on connection failures.
    async fn get_recipe_for_update(
        &self,
        id: RecipeId,
    ) -> Result<Option<UpdateRecipeCommand>, RecipeError>;

    /// Applies an update and refreshes the recipe's modification stamp.
    ///
    /// # Errors
    ///
    /// - Returns [`RecipeError::NotFound`] if no recipe has this id
    /// - Returns [`RecipeError::Deleted`] if the recipe was soft-deleted
    /// - Returns [`RecipeError::Database`] on connection failures
    async fn update_recipe(&self, cmd: UpdateRecipeCommand) -> Result<(), RecipeError>;

    /// Soft-deletes a recipe. Deleting an already-deleted recipe is a
    /// no-op, not an error.
    ///
    /// # Errors
    ///
    /// - Returns [`RecipeError::NotFound`] if no recipe has this id
    /// - Returns [`RecipeError::Database`] on connection failures
    async fn delete_recipe(&self, id: RecipeId) -> Result<(), RecipeError>;
}
