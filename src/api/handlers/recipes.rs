use crate::{
    auth::middleware::AuthUser,
    types::{AppError, Recipe, RecipeDraft, Result},
    validation::validate_recipe,
    AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

fn check(draft: &RecipeDraft) -> Result<()> {
    let violations = validate_recipe(draft);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(violations))
    }
}

/// Creates recipe if user is authorized.
#[utoipa::path(
    post,
    path = "/api/recipes",
    request_body = RecipeDraft,
    responses(
        (status = 201, description = "Creates recipe and returns the object", body = Recipe),
        (status = 400, description = "Validation failure"),
        (status = 401, description = "Unauthorized user"),
        (status = 409, description = "Recipe already exists")
    ),
    tag = "recipes"
)]
pub async fn create_recipe(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(draft): Json<RecipeDraft>,
) -> Result<(StatusCode, Json<Recipe>)> {
    check(&draft)?;
    let recipe = state.recipe_service.create(&draft).await?;
    tracing::info!(user = %claims.sub, recipe_id = recipe.id, "recipe created");
    Ok((StatusCode::CREATED, Json(recipe)))
}

/// Gets recipe with given id if user is authorized.
#[utoipa::path(
    get,
    path = "/api/recipes/{id}",
    params(("id" = i64, Path, description = "Recipe id")),
    responses(
        (status = 200, description = "Returns the recipe object with given id", body = Recipe),
        (status = 401, description = "Unauthorized user"),
        (status = 404, description = "Recipe not found")
    ),
    tag = "recipes"
)]
pub async fn get_recipe(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Recipe>> {
    let recipe = state.recipe_service.get(id).await?;
    Ok(Json(recipe))
}

/// Gets all recipes if user is authorized.
#[utoipa::path(
    get,
    path = "/api/recipes",
    responses(
        (status = 200, description = "Returns all recipe objects", body = [Recipe]),
        (status = 401, description = "Unauthorized user"),
        (status = 404, description = "No recipes found")
    ),
    tag = "recipes"
)]
pub async fn list_recipes(State(state): State<AppState>) -> Result<Json<Vec<Recipe>>> {
    let recipes = state.recipe_service.get_all().await?;
    Ok(Json(recipes))
}

/// Updates recipe with given id if user is authorized.
#[utoipa::path(
    put,
    path = "/api/recipes/{id}",
    params(("id" = i64, Path, description = "Recipe id")),
    request_body = RecipeDraft,
    responses(
        (status = 200, description = "Updates recipe and returns the object", body = Recipe),
        (status = 400, description = "Validation failure"),
        (status = 401, description = "Unauthorized user"),
        (status = 404, description = "Recipe not found")
    ),
    tag = "recipes"
)]
pub async fn update_recipe(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<i64>,
    Json(draft): Json<RecipeDraft>,
) -> Result<Json<Recipe>> {
    check(&draft)?;
    let recipe = state.recipe_service.update(id, &draft).await?;
    tracing::info!(user = %claims.sub, recipe_id = id, "recipe updated");
    Ok(Json(recipe))
}

/// Deletes recipe with given id if user is authorized.
#[utoipa::path(
    delete,
    path = "/api/recipes/{id}",
    params(("id" = i64, Path, description = "Recipe id")),
    responses(
        (status = 204, description = "Deletes recipe with given id"),
        (status = 401, description = "Unauthorized user"),
        (status = 404, description = "Recipe not found")
    ),
    tag = "recipes"
)]
pub async fn delete_recipe(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    state.recipe_service.delete(id).await?;
    tracing::info!(user = %claims.sub, recipe_id = id, "recipe deleted");
    Ok(StatusCode::NO_CONTENT)
}
