use super::ApiError;
use super::types::{CreateIngredientBody, EditRecipeBody};

const MAX_NAME_LEN: usize = 100;
const MAX_UNIT_LEN: usize = 20;
const MAX_COOK_HRS: i32 = 24;
const MAX_COOK_MINS: i32 = 59;

pub fn validate_recipe_id(id: i32) -> Result<i32, ApiError> {
    if id <= 0 {
        return Err(ApiError::validation(format!(
            "Invalid recipe ID: {id}. ID must be a positive integer"
        )));
    }
    Ok(id)
}

pub fn validate_limit(limit: u64) -> Result<u64, ApiError> {
    const MAX_LIMIT: u64 = 1000;
    const MIN_LIMIT: u64 = 1;

    if !(MIN_LIMIT..=MAX_LIMIT).contains(&limit) {
        return Err(ApiError::validation(format!(
            "Invalid limit: {limit}. Limit must be between {MIN_LIMIT} and {MAX_LIMIT}"
        )));
    }
    Ok(limit)
}

/// Checks the fields shared by create and update requests.
///
/// Hours and minutes are validated separately, then together: a recipe
/// with both at zero has no cook time at all and is rejected.
pub fn validate_recipe_fields(body: &EditRecipeBody) -> Result<(), ApiError> {
    if body.name.trim().is_empty() {
        return Err(ApiError::validation("Recipe name cannot be empty"));
    }

    // Character count, not bytes, so multibyte names get the full 100.
    if body.name.chars().count() > MAX_NAME_LEN {
        return Err(ApiError::validation(format!(
            "Recipe name must be {MAX_NAME_LEN} characters or less"
        )));
    }

    if !(0..=MAX_COOK_HRS).contains(&body.time_to_cook_hrs) {
        return Err(ApiError::validation(format!(
            "Hours must be between 0 and {MAX_COOK_HRS}"
        )));
    }

    if !(0..=MAX_COOK_MINS).contains(&body.time_to_cook_mins) {
        return Err(ApiError::validation(format!(
            "Minutes must be between 0 and {MAX_COOK_MINS}"
        )));
    }

    if body.time_to_cook_hrs + body.time_to_cook_mins == 0 {
        return Err(ApiError::validation("Time to cook should be filled"));
    }

    Ok(())
}

pub fn validate_ingredients(ingredients: &[CreateIngredientBody]) -> Result<(), ApiError> {
    for ingredient in ingredients {
        if ingredient.name.trim().is_empty() {
            return Err(ApiError::validation("Ingredient name cannot be empty"));
        }

        if ingredient.name.chars().count() > MAX_NAME_LEN {
            return Err(ApiError::validation(format!(
                "Ingredient name must be {MAX_NAME_LEN} characters or less"
            )));
        }

        if ingredient.quantity <= 0.0 {
            return Err(ApiError::validation(format!(
                "Ingredient quantity must be greater than zero: {}",
                ingredient.name
            )));
        }

        if ingredient.unit.chars().count() > MAX_UNIT_LEN {
            return Err(ApiError::validation(format!(
                "Ingredient unit must be {MAX_UNIT_LEN} characters or less"
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body() -> EditRecipeBody {
        EditRecipeBody {
            name: "Lentil soup".to_string(),
            time_to_cook_hrs: 0,
            time_to_cook_mins: 40,
            method: String::new(),
            is_vegetarian: true,
            is_vegan: true,
        }
    }

    #[test]
    fn test_validate_recipe_id() {
        assert!(validate_recipe_id(1).is_ok());
        assert!(validate_recipe_id(12345).is_ok());
        assert!(validate_recipe_id(0).is_err());
        assert!(validate_recipe_id(-1).is_err());
    }

    #[test]
    fn test_validate_limit() {
        assert!(validate_limit(1).is_ok());
        assert!(validate_limit(1000).is_ok());
        assert!(validate_limit(0).is_err());
        assert!(validate_limit(1001).is_err());
    }

    #[test]
    fn accepts_a_sound_recipe() {
        assert!(validate_recipe_fields(&body()).is_ok());
    }

    #[test]
    fn rejects_empty_and_oversized_names() {
        let mut b = body();
        b.name = "   ".to_string();
        assert!(validate_recipe_fields(&b).is_err());

        b.name = "a".repeat(101);
        assert!(validate_recipe_fields(&b).is_err());
    }

    #[test]
    fn name_length_counts_characters_not_bytes() {
        let mut b = body();
        b.name = "é".repeat(100);
        assert!(validate_recipe_fields(&b).is_ok());

        b.name = "é".repeat(101);
        assert!(validate_recipe_fields(&b).is_err());
    }

    #[test]
    fn rejects_out_of_range_components() {
        let mut b = body();
        b.time_to_cook_hrs = 25;
        assert!(validate_recipe_fields(&b).is_err());

        let mut b = body();
        b.time_to_cook_mins = 60;
        assert!(validate_recipe_fields(&b).is_err());

        let mut b = body();
        b.time_to_cook_hrs = -1;
        assert!(validate_recipe_fields(&b).is_err());
    }

    #[test]
    fn zero_total_time_has_its_own_message() {
        let mut b = body();
        b.time_to_cook_hrs = 0;
        b.time_to_cook_mins = 0;

        let err = validate_recipe_fields(&b).unwrap_err();
        assert!(err.to_string().contains("Time to cook should be filled"));
    }

    #[test]
    fn one_minute_total_is_enough() {
        let mut b = body();
        b.time_to_cook_hrs = 0;
        b.time_to_cook_mins = 1;
        assert!(validate_recipe_fields(&b).is_ok());

        b.time_to_cook_hrs = 1;
        b.time_to_cook_mins = 0;
        assert!(validate_recipe_fields(&b).is_ok());
    }

    #[test]
    fn ingredient_rules() {
        let good = CreateIngredientBody {
            name: "Red lentils".to_string(),
            quantity: 250.0,
            unit: "g".to_string(),
        };
        assert!(validate_ingredients(std::slice::from_ref(&good)).is_ok());

        let mut bad = good.clone();
        bad.quantity = 0.0;
        assert!(validate_ingredients(&[bad]).is_err());

        let mut bad = good.clone();
        bad.name = String::new();
        assert!(validate_ingredients(&[bad]).is_err());

        let mut bad = good;
        bad.unit = "a".repeat(21);
        assert!(validate_ingredients(&[bad]).is_err());
    }
}
