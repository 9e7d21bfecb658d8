//! `SeaORM` implementation of the `RecipeService` trait.

use crate::db::Store;
use crate::domain::RecipeId;
use crate::models::recipe::{
    CreateRecipeCommand, RecipeDetail, RecipeSummary, UpdateRecipeCommand,
};
use crate::services::recipe_service::{RecipeError, RecipeService, split_cook_time};
use async_trait::async_trait;
use std::sync::Arc;

/// SeaORM-based implementation of [`RecipeService`].
pub struct SeaOrmRecipeService {
    store: Arc<Store>,
}

impl SeaOrmRecipeService {
    #[must_use]
    pub const fn new(store: Arc<Store>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl RecipeService for SeaOrmRecipeService {
    async fn create_recipe(
        &self,
        cmd: CreateRecipeCommand,
        created_by_id: i32,
    ) -> Result<RecipeDetail, RecipeError> {
        let id = self.store.create_recipe(&cmd, created_by_id).await?;

        // The row was just inserted live, so the read back cannot miss.
        self.store
            .get_recipe_detail(id)
            .await?
            .ok_or(RecipeError::NotFound(id))
    }

    async fn get_recipes(&self) -> Result<Vec<RecipeSummary>, RecipeError> {
        let recipes = self.store.list_recipes().await?;
        Ok(recipes)
    }

    async fn get_user_recipes(
        &self,
        user_id: i32,
        max: u64,
    ) -> Result<Vec<RecipeSummary>, RecipeError> {
        let recipes = self.store.list_recipes_by_creator(user_id, max).await?;
        Ok(recipes)
    }

    async fn get_recipe(&self, id: RecipeId) -> Result<Option<RecipeDetail>, RecipeError> {
        let detail = self.store.get_recipe_detail(id).await?;
        Ok(detail)
    }

    async fn get_recipe_for_update(
        &self,
        id: RecipeId,
    ) -> Result<Option<UpdateRecipeCommand>, RecipeError> {
        let Some(recipe) = self.store.find_recipe_any(id).await? else {
            return Ok(None);
        };

        if recipe.is_deleted {
            return Ok(None);
        }

        let (hrs, mins) = split_cook_time(recipe.time_to_cook_mins);

        Ok(Some(UpdateRecipeCommand {
            id: RecipeId::new(recipe.id),
            name: recipe.name,
            time_to_cook_hrs: hrs,
            time_to_cook_mins: mins,
            method: recipe.method,
            is_vegetarian: recipe.is_vegetarian,
            is_vegan: recipe.is_vegan,
        }))
    }

    async fn update_recipe(&self, cmd: UpdateRecipeCommand) -> Result<(), RecipeError> {
        let recipe = self
            .store
            .find_recipe_any(cmd.id)
            .await?
            .ok_or(RecipeError::NotFound(cmd.id))?;

        if recipe.is_deleted {
            return Err(RecipeError::Deleted(cmd.id));
        }

        self.store.apply_recipe_update(recipe, &cmd).await?;
        Ok(())
    }

    async fn delete_recipe(&self, id: RecipeId) -> Result<(), RecipeError> {
        let recipe = self
            .store
            .find_recipe_any(id)
            .await?
            .ok_or(RecipeError::NotFound(id))?;

        // Repeating a delete leaves the row as it is.
        if recipe.is_deleted {
            return Ok(());
        }

        self.store.mark_recipe_deleted(recipe).await?;
        Ok(())
    }
}
