use crate::domain::RecipeId;
use crate::entities::{ingredients, prelude::*, recipes};
use crate::models::recipe::{
    CreateRecipeCommand, IngredientItem, RecipeDetail, RecipeSummary, UpdateRecipeCommand,
};
use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use tracing::info;

pub struct RecipeRepository {
    conn: DatabaseConnection,
}

impl RecipeRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_summary(model: &recipes::Model) -> RecipeSummary {
        RecipeSummary {
            id: RecipeId::new(model.id),
            name: model.name.clone(),
            time_to_cook: format!("{} mins", model.time_to_cook_mins),
        }
    }

    fn map_detail(model: recipes::Model, lines: Vec<ingredients::Model>) -> RecipeDetail {
        RecipeDetail {
            id: RecipeId::new(model.id),
            name: model.name,
            method: model.method,
            last_modified: model.last_modified,
            created_by_id: model.created_by_id,
            ingredients: lines
                .into_iter()
                .map(|i| IngredientItem {
                    name: i.name,
                    quantity: format!("{} {}", i.quantity, i.unit),
                })
                .collect(),
        }
    }

    /// Insert a recipe and its ingredient lines atomically.
    pub async fn create(&self, cmd: &CreateRecipeCommand, created_by_id: i32) -> Result<RecipeId> {
        let now = chrono::Utc::now().to_rfc3339();
        let txn = self.conn.begin().await?;

        let recipe = recipes::ActiveModel {
            name: Set(cmd.name.clone()),
            time_to_cook_mins: Set(cmd.total_minutes()),
            method: Set(cmd.method.clone()),
            is_vegetarian: Set(cmd.is_vegetarian),
            is_vegan: Set(cmd.is_vegan),
            is_deleted: Set(false),
            last_modified: Set(now),
            created_by_id: Set(created_by_id),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .context("Failed to insert recipe")?;

        if !cmd.ingredients.is_empty() {
            let lines = cmd.ingredients.iter().map(|i| ingredients::ActiveModel {
                recipe_id: Set(recipe.id),
                name: Set(i.name.clone()),
                quantity: Set(i.quantity),
                unit: Set(i.unit.clone()),
                ..Default::default()
            });

            Ingredients::insert_many(lines)
                .exec(&txn)
                .await
                .context("Failed to insert ingredients")?;
        }

        txn.commit().await?;

        info!("Created recipe {} ({})", recipe.id, recipe.name);
        Ok(RecipeId::new(recipe.id))
    }

    /// All recipes that have not been soft-deleted.
    pub async fn list_live(&self) -> Result<Vec<RecipeSummary>> {
        let rows = Recipes::find()
            .filter(recipes::Column::IsDeleted.eq(false))
            .order_by_asc(recipes::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list recipes")?;

        Ok(rows.iter().map(Self::map_summary).collect())
    }

    /// Most recently modified live recipes created by the given user.
    pub async fn list_by_creator(&self, user_id: i32, limit: u64) -> Result<Vec<RecipeSummary>> {
        let rows = Recipes::find()
            .filter(recipes::Column::CreatedById.eq(user_id))
            .filter(recipes::Column::IsDeleted.eq(false))
            .order_by_desc(recipes::Column::LastModified)
            .limit(limit)
            .all(&self.conn)
            .await
            .context("Failed to list recipes by creator")?;

        Ok(rows.iter().map(Self::map_summary).collect())
    }

    /// Live recipe with its ingredient lines, or `None` when the id is
    /// unknown or the recipe is soft-deleted.
    ///
    /// # Panics
    ///
    /// Panics if more than one live row shares the id. The primary key
    /// makes that unreachable under normal operation; hitting it means
    /// the store is corrupt and the process must not keep serving.
    pub async fn find_live_detail(&self, id: RecipeId) -> Result<Option<RecipeDetail>> {
        let mut rows = Recipes::find()
            .filter(recipes::Column::Id.eq(id.value()))
            .filter(recipes::Column::IsDeleted.eq(false))
            .all(&self.conn)
            .await
            .context("Failed to load recipe")?;

        assert!(
            rows.len() <= 1,
            "multiple live recipes share id {id}; store is corrupt"
        );

        let Some(recipe) = rows.pop() else {
            return Ok(None);
        };

        let lines = Ingredients::find()
            .filter(ingredients::Column::RecipeId.eq(recipe.id))
            .order_by_asc(ingredients::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to load ingredients")?;

        Ok(Some(Self::map_detail(recipe, lines)))
    }

    /// Raw row lookup that ignores the soft-delete flag. Callers use it to
    /// tell a missing recipe apart from a deleted one.
    pub async fn find_any(&self, id: RecipeId) -> Result<Option<recipes::Model>> {
        Recipes::find_by_id(id.value())
            .one(&self.conn)
            .await
            .context("Failed to load recipe")
    }

    /// Write the editable fields back and refresh the modification stamp.
    pub async fn apply_update(
        &self,
        recipe: recipes::Model,
        cmd: &UpdateRecipeCommand,
    ) -> Result<()> {
        let now = chrono::Utc::now().to_rfc3339();

        let mut active: recipes::ActiveModel = recipe.into();
        active.name = Set(cmd.name.clone());
        active.time_to_cook_mins = Set(cmd.total_minutes());
        active.method = Set(cmd.method.clone());
        active.is_vegetarian = Set(cmd.is_vegetarian);
        active.is_vegan = Set(cmd.is_vegan);
        active.last_modified = Set(now);
        active
            .update(&self.conn)
            .await
            .context("Failed to update recipe")?;

        info!("Updated recipe {}", cmd.id);
        Ok(())
    }

    /// Flip the soft-delete flag. The row and its ingredients stay put.
    pub async fn mark_deleted(&self, recipe: recipes::Model) -> Result<()> {
        let id = recipe.id;

        let mut active: recipes::ActiveModel = recipe.into();
        active.is_deleted = Set(true);
        active
            .update(&self.conn)
            .await
            .context("Failed to delete recipe")?;

        info!("Soft-deleted recipe {id}");
        Ok(())
    }
}
