use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::recipe::entities::SourceType;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct IngredientInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub unit: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StepInput {
    #[serde(default)]
    pub description: String,
}

/// Recipe form as submitted. Every field is kept raw so it can be echoed
/// back unchanged when the save fails.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CreateRecipeInput {
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

impl CreateRecipeInput {
    /// Empty form with a single blank ingredient row and step row.
    pub fn blank_draft() -> Self {
        Self {
            ingredients: vec![IngredientInput::default()],
            steps: vec![StepInput::default()],
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIngredient {
    pub name: String,
    pub amount: Option<String>,
    pub unit: Option<String>,
    pub order: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStep {
    pub description: String,
    pub order: i32,
}

/// Normalized recipe aggregate, ready to be written in one transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecipe {
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub servings: Option<i32>,
    pub cook_time: Option<i32>,
    pub source_type: SourceType,
    pub ingredients: Vec<NewIngredient>,
    pub steps: Vec<NewStep>,
    /// One entry per submitted category occurrence, duplicates included.
    pub category_ids: Vec<Uuid>,
}

impl NewRecipe {
    pub fn manual(user_id: String, input: CreateRecipeInput, category_ids: Vec<Uuid>) -> Self {
        Self {
            user_id,
            description: if input.description.is_empty() {
                None
            } else {
                Some(input.description)
            },
            servings: parse_optional_int(&input.servings),
            cook_time: parse_optional_int(&input.cook_time),
            title: input.title,
            source_type: SourceType::Manual,
            ingredients: normalize_ingredients(input.ingredients),
            steps: normalize_steps(input.steps),
            category_ids,
        }
    }
}

/// Lenient base-10 parse: leading whitespace and sign are accepted and the
/// longest digit prefix is used, so `"4abc"` reads as 4. No digits, or a
/// value outside `i32`, gives `None`.
pub fn parse_optional_int(raw: &str) -> Option<i32> {
    let trimmed = raw.trim_start();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = unsigned
        .bytes()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if digits_len == 0 {
        return None;
    }

    let magnitude: i64 = unsigned[..digits_len].parse().ok()?;
    let value = if negative { -magnitude } else { magnitude };

    i32::try_from(value).ok()
}

fn non_blank(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Drops rows with a blank name; survivors are trimmed and numbered 0..n.
pub fn normalize_ingredients(ingredients: Vec<IngredientInput>) -> Vec<NewIngredient> {
    ingredients
        .into_iter()
        .filter_map(|ingredient| {
            non_blank(&ingredient.name).map(|name| (name, ingredient.amount, ingredient.unit))
        })
        .enumerate()
        .map(|(order, (name, amount, unit))| NewIngredient {
            name,
            amount: non_blank(&amount),
            unit: non_blank(&unit),
            order: order as i32,
        })
        .collect()
}

pub fn normalize_steps(steps: Vec<StepInput>) -> Vec<NewStep> {
    steps
        .into_iter()
        .filter_map(|step| non_blank(&step.description))
        .enumerate()
        .map(|(order, description)| NewStep {
            description,
            order: order as i32,
        })
        .collect()
}

/// Trimmed, non-blank names in submission order. Duplicates are kept.
pub fn normalize_category_names(categories: &[String]) -> Vec<String> {
    categories.iter().filter_map(|name| non_blank(name)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ingredient(name: &str, amount: &str, unit: &str) -> IngredientInput {
        IngredientInput {
            name: name.to_string(),
            amount: amount.to_string(),
            unit: unit.to_string(),
        }
    }

    #[test]
    fn test_parse_optional_int() {
        assert_eq!(parse_optional_int(""), None);
        assert_eq!(parse_optional_int("4"), Some(4));
        assert_eq!(parse_optional_int("30"), Some(30));
        assert_eq!(parse_optional_int("4abc"), Some(4));
        assert_eq!(parse_optional_int("  12 "), Some(12));
        assert_eq!(parse_optional_int("2.5"), Some(2));
        assert_eq!(parse_optional_int("-3"), Some(-3));
        assert_eq!(parse_optional_int("abc"), None);
        assert_eq!(parse_optional_int("-"), None);
        assert_eq!(parse_optional_int("99999999999"), None);
    }

    #[test]
    fn test_normalize_ingredients_filters_and_orders_densely() {
        let normalized = normalize_ingredients(vec![
            ingredient("  flour ", " 200 ", " g "),
            ingredient("   ", "1", "cup"),
            ingredient("salt", "", "  "),
            ingredient("", "", ""),
            ingredient("egg", "2", ""),
        ]);

        assert_eq!(
            normalized,
            vec![
                NewIngredient {
                    name: "flour".to_string(),
                    amount: Some("200".to_string()),
                    unit: Some("g".to_string()),
                    order: 0,
                },
                NewIngredient {
                    name: "salt".to_string(),
                    amount: None,
                    unit: None,
                    order: 1,
                },
                NewIngredient {
                    name: "egg".to_string(),
                    amount: Some("2".to_string()),
                    unit: None,
                    order: 2,
                },
            ]
        );
    }

    #[test]
    fn test_normalize_steps_filters_and_orders_densely() {
        let steps = ["", " Mix ", "\t", "Bake"]
            .into_iter()
            .map(|d| StepInput {
                description: d.to_string(),
            })
            .collect();

        let normalized = normalize_steps(steps);

        assert_eq!(
            normalized,
            vec![
                NewStep {
                    description: "Mix".to_string(),
                    order: 0,
                },
                NewStep {
                    description: "Bake".to_string(),
                    order: 1,
                },
            ]
        );
    }

    #[test]
    fn test_normalize_category_names_keeps_duplicates() {
        let names = vec![
            " Dinner ".to_string(),
            "".to_string(),
            "  ".to_string(),
            "Dinner".to_string(),
            "Quick".to_string(),
        ];

        assert_eq!(
            normalize_category_names(&names),
            vec!["Dinner".to_string(), "Dinner".to_string(), "Quick".to_string()]
        );
    }

    #[test]
    fn test_new_recipe_keeps_title_and_whitespace_description() {
        let input = CreateRecipeInput {
            title: "  Soup ".to_string(),
            description: " ".to_string(),
            servings: "".to_string(),
            cook_time: "45 min".to_string(),
            ..Default::default()
        };

        let recipe = NewRecipe::manual("user-1".to_string(), input, vec![]);

        assert_eq!(recipe.title, "  Soup ");
        assert_eq!(recipe.description, Some(" ".to_string()));
        assert_eq!(recipe.servings, None);
        assert_eq!(recipe.cook_time, Some(45));
        assert_eq!(recipe.source_type, SourceType::Manual);
    }

    #[test]
    fn test_empty_description_is_absent() {
        let recipe = NewRecipe::manual(
            "user-1".to_string(),
            CreateRecipeInput {
                title: "Soup".to_string(),
                ..Default::default()
            },
            vec![],
        );

        assert_eq!(recipe.description, None);
    }

    #[test]
    fn test_blank_draft_has_one_row_each() {
        let draft = CreateRecipeInput::blank_draft();
        assert_eq!(draft.ingredients.len(), 1);
        assert_eq!(draft.steps.len(), 1);
        assert!(draft.title.is_empty());
    }
}
