use pocket_recipe_core::domain::recipe::value_objects::{
    CreateRecipeInput, IngredientInput, StepInput,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Recipe form. Numeric fields stay strings; they are parsed leniently later.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateRecipeValidator {
    #[serde(default)]
    #[validate(custom(function = "validate_not_blank", message = "Title is required"))]
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub servings: String,

    #[serde(default, alias = "cookTime")]
    pub cook_time: String,

    #[serde(default)]
    pub ingredients: Vec<IngredientInput>,

    #[serde(default)]
    pub steps: Vec<StepInput>,

    #[serde(default)]
    pub categories: Vec<String>,
}

impl From<CreateRecipeValidator> for CreateRecipeInput {
    fn from(value: CreateRecipeValidator) -> Self {
        Self {
            title: value.title,
            description: value.description,
            servings: value.servings,
            cook_time: value.cook_time,
            ingredients: value.ingredients,
            steps: value.steps,
            categories: value.categories,
        }
    }
}
