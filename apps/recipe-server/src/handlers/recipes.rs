//! Recipe post handlers - the create and edit forms.

use actix_web::{HttpResponse, web};

use recipe_core::domain::{Recipe, RecipeDraft, RecipeEdit};
use recipe_shared::ApiResponse;
use recipe_shared::dto::{
    CreateRecipeRequest, CreatedRecipeResponse, RecipeResponse, UpdateRecipeRequest,
};

use crate::middleware::error::{AppError, AppResult};
use crate::middleware::identity::Viewer;
use crate::observability::RequestId;
use crate::state::AppState;

fn to_response(post_id: &str, recipe: Recipe) -> RecipeResponse {
    RecipeResponse {
        post_id: post_id.to_string(),
        title: recipe.title,
        picture_url: recipe.picture_url,
        intro: recipe.intro,
        ingredients: recipe.ingredients,
        instructions: recipe.instructions,
        link: recipe.link,
        author: recipe.author,
    }
}

/// POST /api/recipes - moderators only
pub async fn create(
    state: web::Data<AppState>,
    viewer: Viewer,
    request_id: RequestId,
    body: web::Json<CreateRecipeRequest>,
) -> AppResult<HttpResponse> {
    if !viewer.is_moderator() {
        tracing::warn!(
            request_id = %request_id.as_str(),
            user_id = %viewer.user_id,
            "Recipe post refused for non-moderator"
        );
        return Err(AppError::Forbidden(
            "Only moderators may post recipes".to_string(),
        ));
    }

    let req = body.into_inner();
    let errors = req.validate();
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let draft = RecipeDraft {
        title: req.title,
        picture: req.picture,
        intro: req.intro,
        ingredients: req.ingredients,
        instructions: req.instructions,
        link: req.link,
    };
    let post_id = state.recipes.create_recipe(&viewer.user_id, draft).await?;
    tracing::info!(
        request_id = %request_id.as_str(),
        post_id = %post_id,
        "Recipe posted"
    );

    Ok(HttpResponse::Created().json(ApiResponse::ok(CreatedRecipeResponse { post_id })))
}

/// GET /api/recipes/{post_id}
pub async fn get(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let recipe = state.recipes.load_recipe(&post_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(to_response(&post_id, recipe))))
}

/// PUT /api/recipes/{post_id} - the recipe author only
pub async fn update(
    state: web::Data<AppState>,
    viewer: Viewer,
    path: web::Path<String>,
    body: web::Json<UpdateRecipeRequest>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let req = body.into_inner();
    let errors = req.validate();
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let edit = RecipeEdit {
        title: req.title,
        picture: req.picture,
        intro: req.intro,
        ingredients: req.ingredients,
        instructions: req.instructions,
        link: req.link,
    };
    let recipe = state
        .recipes
        .update_recipe(&viewer.user_id, &post_id, edit)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(to_response(&post_id, recipe))))
}
