use std::collections::HashMap;

use tracing::info;
use uuid::Uuid;

use crate::domain::{
    authentication::{
        entities::SessionTokens,
        ports::{IdentityProvider, SessionService},
    },
    common::{
        entities::{app_errors::CoreError, redirect::RedirectTo},
        services::Service,
    },
    health::ports::HealthCheckRepository,
    recipe::{
        entities::{RecipeDetail, RecipeSummary},
        ports::{CategoryRepository, RecipeRepository, RecipeService},
        value_objects::{CreateRecipeInput, NewRecipe, normalize_category_names},
    },
    user::ports::UserRepository,
};

impl<U, R, C, IP, HC> Service<U, R, C, IP, HC>
where
    U: UserRepository,
    R: RecipeRepository,
    C: CategoryRepository,
    IP: IdentityProvider,
    HC: HealthCheckRepository,
{
    /// Resolves each submitted name to a category id, in submission order.
    /// Each distinct name hits the store once; repeats reuse the same id.
    async fn resolve_categories(&self, categories: &[String]) -> Result<Vec<Uuid>, CoreError> {
        let names = normalize_category_names(categories);
        let mut resolved: HashMap<String, Uuid> = HashMap::new();
        let mut ids = Vec::with_capacity(names.len());

        for name in names {
            let id = match resolved.get(&name) {
                Some(id) => *id,
                None => {
                    let category = self
                        .category_repository
                        .get_or_create_by_name(name.clone())
                        .await?;
                    resolved.insert(name, category.id);
                    category.id
                }
            };
            ids.push(id);
        }

        Ok(ids)
    }
}

impl<U, R, C, IP, HC> RecipeService for Service<U, R, C, IP, HC>
where
    U: UserRepository,
    R: RecipeRepository,
    C: CategoryRepository,
    IP: IdentityProvider,
    HC: HealthCheckRepository,
{
    async fn create_recipe(
        &self,
        tokens: SessionTokens,
        input: CreateRecipeInput,
    ) -> Result<RedirectTo, CoreError> {
        let Some(session) = self.authenticate(tokens).await else {
            return Ok(RedirectTo::login());
        };

        let category_ids = self.resolve_categories(&input.categories).await?;
        let recipe = NewRecipe::manual(session.user.id, input, category_ids);

        let created = self.recipe_repository.create_recipe(recipe).await?;
        info!(recipe_id = %created.id, user_id = %created.user_id, "recipe created");

        Ok(RedirectTo::home())
    }

    async fn list_recipes(&self, user_id: String) -> Result<Vec<RecipeSummary>, CoreError> {
        self.recipe_repository.list_by_owner(user_id).await
    }

    async fn get_recipe(&self, user_id: String, recipe_id: Uuid) -> Result<RecipeDetail, CoreError> {
        self.recipe_repository
            .get_by_owner(user_id, recipe_id)
            .await?
            .ok_or(CoreError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use chrono::Utc;
    use mockall::predicate::eq;

    use super::*;
    use crate::domain::{
        authentication::entities::AuthUser,
        common::{generate_uuid_v7, test_utils::Mocks},
        recipe::{
            entities::{Category, Recipe, SourceType},
            value_objects::{IngredientInput, NewIngredient, NewStep, StepInput},
        },
    };

    fn tokens() -> SessionTokens {
        SessionTokens {
            access_token: Some("access".to_string()),
            refresh_token: Some("refresh".to_string()),
        }
    }

    fn signed_in(mocks: &mut Mocks, user_id: &'static str) {
        mocks.identity.expect_get_user().returning(move |_| {
            Box::pin(async move {
                Ok(Some(AuthUser {
                    id: user_id.to_string(),
                    email: None,
                }))
            })
        });
    }

    fn stored(recipe: &NewRecipe) -> Recipe {
        Recipe {
            id: generate_uuid_v7(),
            user_id: recipe.user_id.clone(),
            title: recipe.title.clone(),
            description: recipe.description.clone(),
            servings: recipe.servings,
            cook_time: recipe.cook_time,
            source_type: recipe.source_type,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_recipe_without_session_redirects_to_login_and_writes_nothing() {
        let mut mocks = Mocks::new();
        mocks.category.expect_get_or_create_by_name().never();
        mocks.recipe.expect_create_recipe().never();

        let redirect = mocks
            .into_service()
            .create_recipe(
                SessionTokens::default(),
                CreateRecipeInput {
                    title: "Soup".to_string(),
                    categories: vec!["Dinner".to_string()],
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(redirect, RedirectTo::login());
    }

    #[tokio::test]
    async fn test_create_recipe_normalizes_aggregate_and_redirects_home() {
        let mut mocks = Mocks::new();
        signed_in(&mut mocks, "user-1");

        let dinner = Category {
            id: generate_uuid_v7(),
            name: "Dinner".to_string(),
        };
        let quick = Category {
            id: generate_uuid_v7(),
            name: "Quick".to_string(),
        };
        let (dinner_id, quick_id) = (dinner.id, quick.id);

        mocks
            .category
            .expect_get_or_create_by_name()
            .with(eq("Dinner".to_string()))
            .times(1)
            .returning(move |_| {
                let category = dinner.clone();
                Box::pin(async move { Ok(category) })
            });
        mocks
            .category
            .expect_get_or_create_by_name()
            .with(eq("Quick".to_string()))
            .times(1)
            .returning(move |_| {
                let category = quick.clone();
                Box::pin(async move { Ok(category) })
            });

        let captured: Arc<Mutex<Option<NewRecipe>>> = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&captured);
        mocks
            .recipe
            .expect_create_recipe()
            .times(1)
            .returning(move |recipe| {
                let created = stored(&recipe);
                *sink.lock().unwrap() = Some(recipe);
                Box::pin(async move { Ok(created) })
            });

        let input = CreateRecipeInput {
            title: "Tomato soup".to_string(),
            description: "".to_string(),
            servings: "4".to_string(),
            cook_time: "30".to_string(),
            ingredients: vec![
                IngredientInput {
                    name: " tomato ".to_string(),
                    amount: "3".to_string(),
                    unit: "".to_string(),
                },
                IngredientInput::default(),
                IngredientInput {
                    name: "salt".to_string(),
                    amount: "".to_string(),
                    unit: " pinch ".to_string(),
                },
            ],
            steps: vec![
                StepInput {
                    description: "  ".to_string(),
                },
                StepInput {
                    description: "Simmer".to_string(),
                },
            ],
            categories: vec![
                "Dinner".to_string(),
                " ".to_string(),
                " Quick".to_string(),
                "Dinner ".to_string(),
            ],
        };

        let redirect = mocks
            .into_service()
            .create_recipe(tokens(), input)
            .await
            .unwrap();

        assert_eq!(redirect, RedirectTo::home());

        let recipe = captured.lock().unwrap().take().unwrap();
        assert_eq!(recipe.user_id, "user-1");
        assert_eq!(recipe.title, "Tomato soup");
        assert_eq!(recipe.description, None);
        assert_eq!(recipe.servings, Some(4));
        assert_eq!(recipe.cook_time, Some(30));
        assert_eq!(recipe.source_type, SourceType::Manual);
        assert_eq!(
            recipe.ingredients,
            vec![
                NewIngredient {
                    name: "tomato".to_string(),
                    amount: Some("3".to_string()),
                    unit: None,
                    order: 0,
                },
                NewIngredient {
                    name: "salt".to_string(),
                    amount: None,
                    unit: Some("pinch".to_string()),
                    order: 1,
                },
            ]
        );
        assert_eq!(
            recipe.steps,
            vec![NewStep {
                description: "Simmer".to_string(),
                order: 0,
            }]
        );
        assert_eq!(recipe.category_ids, vec![dinner_id, quick_id, dinner_id]);
    }

    #[tokio::test]
    async fn test_create_recipe_propagates_category_failure_before_recipe_write() {
        let mut mocks = Mocks::new();
        signed_in(&mut mocks, "user-1");
        mocks
            .category
            .expect_get_or_create_by_name()
            .returning(|_| Box::pin(async { Err(CoreError::Database("conflict".to_string())) }));
        mocks.recipe.expect_create_recipe().never();

        let result = mocks
            .into_service()
            .create_recipe(
                tokens(),
                CreateRecipeInput {
                    title: "Soup".to_string(),
                    categories: vec!["Dinner".to_string()],
                    ..Default::default()
                },
            )
            .await;

        assert_eq!(result, Err(CoreError::Database("conflict".to_string())));
    }

    #[tokio::test]
    async fn test_create_recipe_propagates_store_failure() {
        let mut mocks = Mocks::new();
        signed_in(&mut mocks, "user-1");
        mocks
            .recipe
            .expect_create_recipe()
            .returning(|_| Box::pin(async { Err(CoreError::Database("rollback".to_string())) }));

        let result = mocks
            .into_service()
            .create_recipe(
                tokens(),
                CreateRecipeInput {
                    title: "Soup".to_string(),
                    ..Default::default()
                },
            )
            .await;

        assert_eq!(result, Err(CoreError::Database("rollback".to_string())));
    }

    #[tokio::test]
    async fn test_get_recipe_hides_foreign_and_missing_alike() {
        let mut mocks = Mocks::new();
        let recipe_id = generate_uuid_v7();
        mocks
            .recipe
            .expect_get_by_owner()
            .with(eq("intruder".to_string()), eq(recipe_id))
            .returning(|_, _| Box::pin(async { Ok(None) }));

        let result = mocks
            .into_service()
            .get_recipe("intruder".to_string(), recipe_id)
            .await;

        assert_eq!(result, Err(CoreError::NotFound));
    }

    #[tokio::test]
    async fn test_list_recipes_delegates_to_owner_query() {
        let mut mocks = Mocks::new();
        mocks
            .recipe
            .expect_list_by_owner()
            .with(eq("user-1".to_string()))
            .times(1)
            .returning(|_| Box::pin(async { Ok(vec![]) }));

        let recipes = mocks
            .into_service()
            .list_recipes("user-1".to_string())
            .await
            .unwrap();

        assert!(recipes.is_empty());
    }
}
