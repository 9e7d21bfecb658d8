use serde::{Deserialize, Serialize};

use crate::domain::RecipeId;

/// Input for a single ingredient line on a new recipe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateIngredientCommand {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRecipeCommand {
    pub name: String,
    pub time_to_cook_hrs: i32,
    pub time_to_cook_mins: i32,
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub is_vegetarian: bool,
    #[serde(default)]
    pub is_vegan: bool,
    #[serde(default)]
    pub ingredients: Vec<CreateIngredientCommand>,
}

/// Editable fields of an existing recipe. Ingredients are fixed at
/// creation time and cannot be changed here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRecipeCommand {
    pub id: RecipeId,
    pub name: String,
    pub time_to_cook_hrs: i32,
    pub time_to_cook_mins: i32,
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub is_vegetarian: bool,
    #[serde(default)]
    pub is_vegan: bool,
}

impl CreateRecipeCommand {
    #[must_use]
    pub const fn total_minutes(&self) -> i32 {
        self.time_to_cook_hrs * 60 + self.time_to_cook_mins
    }
}

impl UpdateRecipeCommand {
    #[must_use]
    pub const fn total_minutes(&self) -> i32 {
        self.time_to_cook_hrs * 60 + self.time_to_cook_mins
    }
}

/// Compact listing row for index views.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeSummary {
    pub id: RecipeId,
    pub name: String,
    pub time_to_cook: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientItem {
    pub name: String,
    pub quantity: String,
}

/// Full recipe view as served by the detail endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeDetail {
    pub id: RecipeId,
    pub name: String,
    pub method: String,
    pub last_modified: String,
    pub created_by_id: i32,
    pub ingredients: Vec<IngredientItem>,
}
