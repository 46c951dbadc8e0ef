pub use super::categories::Entity as Categories;
pub use super::ingredients::Entity as Ingredients;
pub use super::recipe_categories::Entity as RecipeCategories;
pub use super::recipes::Entity as Recipes;
pub use super::steps::Entity as Steps;
pub use super::users::Entity as Users;
