use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::instrument;

use crate::state::AppState;

use super::dto::{FeaturedParams, FilterResult, SearchParams, TypeaheadResult};
use super::model::{Category, Meal};
use super::service::RecipeError;

const MAX_FEATURED: usize = 12;

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/recipes/random", get(random_recipe))
        .route("/recipes/featured", get(featured_recipes))
        .route("/recipes/search", get(search_recipes))
        .route("/recipes/typeahead", get(typeahead_recipes))
        .route("/recipes/letter/:letter", get(recipes_by_letter))
        .route("/recipes/:id", get(recipe_by_id))
        .route("/recipes/category/:name", get(recipes_by_category))
        .route("/recipes/cuisine/:name", get(recipes_by_cuisine))
        .route("/recipes/ingredient/:name", get(recipes_by_ingredient))
        .route("/categories", get(categories))
        .route("/categories/names", get(category_names))
        .route("/cuisines", get(cuisine_names))
}

#[instrument(skip(state))]
async fn random_recipe(
    State(state): State<AppState>,
) -> Result<Json<Meal>, (StatusCode, String)> {
    let meal = state.recipes.random_meal().await.map_err(status_for)?;
    Ok(Json(meal))
}

#[instrument(skip(state))]
async fn featured_recipes(
    State(state): State<AppState>,
    Query(params): Query<FeaturedParams>,
) -> Result<Json<Vec<Meal>>, (StatusCode, String)> {
    let count = params.count.clamp(1, MAX_FEATURED);
    let meals = state.recipes.featured(count).await.map_err(status_for)?;
    Ok(Json(meals))
}

#[instrument(skip(state))]
async fn search_recipes(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Meal>>, (StatusCode, String)> {
    let meals = state.recipes.search(&params.q).await.map_err(status_for)?;
    Ok(Json(meals))
}

/// Search variant for rapid repeated queries: responses that lose the race
/// to a newer query come back flagged instead of replacing fresher data.
#[instrument(skip(state))]
async fn typeahead_recipes(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<TypeaheadResult>, (StatusCode, String)> {
    let result = state.search.search(&params.q).await.map_err(status_for)?;
    Ok(Json(match result {
        Some(meals) => TypeaheadResult {
            superseded: false,
            meals,
        },
        None => TypeaheadResult {
            superseded: true,
            meals: Vec::new(),
        },
    }))
}

#[instrument(skip(state))]
async fn recipes_by_letter(
    State(state): State<AppState>,
    Path(letter): Path<String>,
) -> Result<Json<Vec<Meal>>, (StatusCode, String)> {
    let meals = state
        .recipes
        .search_by_letter(&letter)
        .await
        .map_err(status_for)?;
    Ok(Json(meals))
}

#[instrument(skip(state))]
async fn recipe_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Meal>, (StatusCode, String)> {
    match state.recipes.meal_by_id(&id).await.map_err(status_for)? {
        Some(meal) => Ok(Json(meal)),
        None => Err((StatusCode::NOT_FOUND, "recipe not found".into())),
    }
}

#[instrument(skip(state))]
async fn recipes_by_category(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<FilterResult>, (StatusCode, String)> {
    let outcome = state.recipes.by_category(&name).await.map_err(status_for)?;
    Ok(Json(outcome.into()))
}

#[instrument(skip(state))]
async fn recipes_by_cuisine(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<FilterResult>, (StatusCode, String)> {
    let outcome = state.recipes.by_area(&name).await.map_err(status_for)?;
    Ok(Json(outcome.into()))
}

#[instrument(skip(state))]
async fn recipes_by_ingredient(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<FilterResult>, (StatusCode, String)> {
    let outcome = state
        .recipes
        .by_ingredient(&name)
        .await
        .map_err(status_for)?;
    Ok(Json(outcome.into()))
}

#[instrument(skip(state))]
async fn categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<Category>>, (StatusCode, String)> {
    let categories = state.recipes.categories().await.map_err(status_for)?;
    Ok(Json(categories))
}

#[instrument(skip(state))]
async fn category_names(
    State(state): State<AppState>,
) -> Result<Json<Vec<String>>, (StatusCode, String)> {
    let names = state.recipes.category_names().await.map_err(status_for)?;
    Ok(Json(names))
}

#[instrument(skip(state))]
async fn cuisine_names(
    State(state): State<AppState>,
) -> Result<Json<Vec<String>>, (StatusCode, String)> {
    let names = state.recipes.area_names().await.map_err(status_for)?;
    Ok(Json(names))
}

/// Zero results are never routed here; this maps genuine failures only.
fn status_for(err: RecipeError) -> (StatusCode, String) {
    let status = match err {
        RecipeError::NotFound => StatusCode::NOT_FOUND,
        RecipeError::InvalidLetter => StatusCode::BAD_REQUEST,
        RecipeError::Upstream(_) => StatusCode::BAD_GATEWAY,
    };
    (status, err.to_string())
}
