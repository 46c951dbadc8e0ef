use tracing::warn;

use crate::{
    domain::recipe::entities::{Category, Ingredient, Recipe, SourceType, Step},
    entity::{categories, ingredients, recipes, steps},
};

impl From<&recipes::Model> for Recipe {
    fn from(model: &recipes::Model) -> Self {
        let source_type = model.source_type.parse().unwrap_or_else(|_| {
            warn!(recipe_id = %model.id, "unknown source type '{}'", model.source_type);
            SourceType::Manual
        });

        Self {
            id: model.id,
            user_id: model.user_id.clone(),
            title: model.title.clone(),
            description: model.description.clone(),
            servings: model.servings,
            cook_time: model.cook_time,
            source_type,
            created_at: model.created_at.to_utc(),
        }
    }
}

impl From<recipes::Model> for Recipe {
    fn from(model: recipes::Model) -> Self {
        Self::from(&model)
    }
}

impl From<ingredients::Model> for Ingredient {
    fn from(model: ingredients::Model) -> Self {
        Self {
            id: model.id,
            recipe_id: model.recipe_id,
            name: model.name,
            amount: model.amount,
            unit: model.unit,
            order: model.order,
        }
    }
}

impl From<steps::Model> for Step {
    fn from(model: steps::Model) -> Self {
        Self {
            id: model.id,
            recipe_id: model.recipe_id,
            description: model.description,
            order: model.order,
        }
    }
}

impl From<categories::Model> for Category {
    fn from(model: categories::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}
