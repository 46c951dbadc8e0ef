use std::{collections::HashMap, sync::Arc};

use chrono::Utc;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, TransactionTrait,
};
use tracing::error;
use uuid::Uuid;

use crate::{
    domain::{
        common::{entities::app_errors::CoreError, generate_uuid_v7},
        recipe::{
            entities::{Category, Ingredient, Recipe, RecipeDetail, RecipeSummary, Step},
            ports::RecipeRepository,
            value_objects::NewRecipe,
        },
    },
    entity::{
        categories::Entity as CategoryEntity,
        ingredients::{
            ActiveModel as IngredientActiveModel, Column as IngredientColumn,
            Entity as IngredientEntity,
        },
        recipe_categories::{
            ActiveModel as RecipeCategoryActiveModel, Column as RecipeCategoryColumn,
            Entity as RecipeCategoryEntity,
        },
        recipes::{
            ActiveModel as RecipeActiveModel, Column as RecipeColumn, Entity as RecipeEntity,
        },
        steps::{ActiveModel as StepActiveModel, Column as StepColumn, Entity as StepEntity},
    },
};

#[derive(Debug, Clone)]
pub struct PostgresRecipeRepository {
    pub db: Arc<DatabaseConnection>,
}

impl PostgresRecipeRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Categories linked to each recipe, in link order. Recipes without links are absent.
    async fn categories_by_recipe(
        db: &DatabaseConnection,
        recipe_ids: Vec<Uuid>,
    ) -> Result<HashMap<Uuid, Vec<Category>>, CoreError> {
        if recipe_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let links = RecipeCategoryEntity::find()
            .filter(RecipeCategoryColumn::RecipeId.is_in(recipe_ids))
            .order_by_asc(RecipeCategoryColumn::Id)
            .find_also_related(CategoryEntity)
            .all(db)
            .await
            .map_err(|e| {
                error!("Failed to load recipe categories: {}", e);
                CoreError::from(e)
            })?;

        let mut grouped: HashMap<Uuid, Vec<Category>> = HashMap::new();
        for (link, category) in links {
            if let Some(category) = category {
                grouped
                    .entry(link.recipe_id)
                    .or_default()
                    .push(Category::from(category));
            }
        }

        Ok(grouped)
    }
}

impl RecipeRepository for PostgresRecipeRepository {
    async fn create_recipe(&self, recipe: NewRecipe) -> Result<Recipe, CoreError> {
        let txn = self.db.begin().await.map_err(|e| {
            error!("Failed to begin recipe transaction: {}", e);
            CoreError::from(e)
        })?;

        let now = Utc::now().fixed_offset();
        let recipe_id = generate_uuid_v7();

        let created = RecipeEntity::insert(RecipeActiveModel {
            id: Set(recipe_id),
            user_id: Set(recipe.user_id),
            title: Set(recipe.title),
            description: Set(recipe.description),
            servings: Set(recipe.servings),
            cook_time: Set(recipe.cook_time),
            source_type: Set(recipe.source_type.as_str().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        })
        .exec_with_returning(&txn)
        .await
        .map_err(|e| {
            error!("Failed to create recipe: {}", e);
            CoreError::from(e)
        })?;

        if !recipe.ingredients.is_empty() {
            let ingredients = recipe
                .ingredients
                .into_iter()
                .map(|ingredient| IngredientActiveModel {
                    id: Set(generate_uuid_v7()),
                    recipe_id: Set(recipe_id),
                    name: Set(ingredient.name),
                    amount: Set(ingredient.amount),
                    unit: Set(ingredient.unit),
                    order: Set(ingredient.order),
                });

            IngredientEntity::insert_many(ingredients)
                .exec_without_returning(&txn)
                .await
                .map_err(|e| {
                    error!("Failed to create ingredients: {}", e);
                    CoreError::from(e)
                })?;
        }

        if !recipe.steps.is_empty() {
            let steps = recipe.steps.into_iter().map(|step| StepActiveModel {
                id: Set(generate_uuid_v7()),
                recipe_id: Set(recipe_id),
                description: Set(step.description),
                order: Set(step.order),
            });

            StepEntity::insert_many(steps)
                .exec_without_returning(&txn)
                .await
                .map_err(|e| {
                    error!("Failed to create steps: {}", e);
                    CoreError::from(e)
                })?;
        }

        if !recipe.category_ids.is_empty() {
            let links = recipe
                .category_ids
                .into_iter()
                .map(|category_id| RecipeCategoryActiveModel {
                    id: Set(generate_uuid_v7()),
                    recipe_id: Set(recipe_id),
                    category_id: Set(category_id),
                });

            RecipeCategoryEntity::insert_many(links)
                .exec_without_returning(&txn)
                .await
                .map_err(|e| {
                    error!("Failed to link recipe categories: {}", e);
                    CoreError::from(e)
                })?;
        }

        txn.commit().await.map_err(|e| {
            error!("Failed to commit recipe transaction: {}", e);
            CoreError::from(e)
        })?;

        Ok(Recipe::from(created))
    }

    async fn list_by_owner(&self, user_id: String) -> Result<Vec<RecipeSummary>, CoreError> {
        let recipes = RecipeEntity::find()
            .filter(RecipeColumn::UserId.eq(user_id))
            .order_by_desc(RecipeColumn::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| {
                error!("Failed to list recipes: {}", e);
                CoreError::from(e)
            })?;

        let ids = recipes.iter().map(|recipe| recipe.id).collect();
        let mut categories = Self::categories_by_recipe(self.db.as_ref(), ids).await?;

        Ok(recipes
            .into_iter()
            .map(|model| RecipeSummary {
                categories: categories.remove(&model.id).unwrap_or_default(),
                recipe: Recipe::from(model),
            })
            .collect())
    }

    async fn get_by_owner(
        &self,
        user_id: String,
        recipe_id: Uuid,
    ) -> Result<Option<RecipeDetail>, CoreError> {
        let Some(model) = RecipeEntity::find()
            .filter(RecipeColumn::Id.eq(recipe_id))
            .filter(RecipeColumn::UserId.eq(user_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| {
                error!("Failed to get recipe: {}", e);
                CoreError::from(e)
            })?
        else {
            return Ok(None);
        };

        let ingredients = IngredientEntity::find()
            .filter(IngredientColumn::RecipeId.eq(recipe_id))
            .order_by_asc(IngredientColumn::Order)
            .all(self.db.as_ref())
            .await
            .map_err(|e| {
                error!("Failed to load ingredients: {}", e);
                CoreError::from(e)
            })?
            .into_iter()
            .map(Ingredient::from)
            .collect();

        let steps = StepEntity::find()
            .filter(StepColumn::RecipeId.eq(recipe_id))
            .order_by_asc(StepColumn::Order)
            .all(self.db.as_ref())
            .await
            .map_err(|e| {
                error!("Failed to load steps: {}", e);
                CoreError::from(e)
            })?
            .into_iter()
            .map(Step::from)
            .collect();

        let categories = Self::categories_by_recipe(self.db.as_ref(), vec![recipe_id])
            .await?
            .remove(&recipe_id)
            .unwrap_or_default();

        Ok(Some(RecipeDetail {
            recipe: Recipe::from(model),
            ingredients,
            steps,
            categories,
        }))
    }
}
