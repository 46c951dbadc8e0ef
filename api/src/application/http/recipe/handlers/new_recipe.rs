use pocket_recipe_core::domain::recipe::value_objects::CreateRecipeInput;

use crate::application::http::server::api_entities::response::Response;

#[utoipa::path(
    get,
    path = "/recipes/new",
    tag = "recipe",
    summary = "New recipe draft",
    description = "Blank recipe form with one empty ingredient row and one empty step row.",
    responses(
        (status = 200, body = CreateRecipeInput)
    ),
)]
pub async fn new_recipe() -> Response<CreateRecipeInput> {
    Response::OK(CreateRecipeInput::blank_draft())
}
