use serde::{Deserialize, Serialize};

use crate::domain::RecipeId;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Body shared by recipe create and update requests. The id for updates
/// comes from the path, never the body.
#[derive(Debug, Clone, Deserialize)]
pub struct EditRecipeBody {
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

#[derive(Debug, Clone, Deserialize)]
pub struct CreateIngredientBody {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateRecipeRequest {
    #[serde(flatten)]
    pub recipe: EditRecipeBody,
    #[serde(default)]
    pub ingredients: Vec<CreateIngredientBody>,
}

#[derive(Debug, Serialize)]
pub struct RecipeCreatedResponse {
    pub id: RecipeId,
}
