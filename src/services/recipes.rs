use crate::db::DbClient;
use crate::types::{AppError, Recipe, RecipeDraft, Result};
use chrono::Utc;
use std::sync::Arc;

/// Display format for the one-shot creation timestamp.
const CREATION_TIME_FORMAT: &str = "%d-%m-%Y %H:%M";

/// Recipe service for all CRUD operations.
pub struct RecipeService {
    db: Arc<DbClient>,
}

impl RecipeService {
    /// Creates the service over the recipe store.
    pub fn new(db: Arc<DbClient>) -> Self {
        Self { db }
    }

    /// Creates a recipe, rejecting duplicate names. Stamps `creation_time`
    /// (formatted snapshot of now) and `last_modified` before insert.
    pub async fn create(&self, draft: &RecipeDraft) -> Result<Recipe> {
        if self.db.recipe_name_exists(&draft.name).await? {
            return Err(AppError::AlreadyExists(format!(
                "Recipe already exists with name: {}",
                draft.name
            )));
        }

        let now = Utc::now();
        let creation_time = now.format(CREATION_TIME_FORMAT).to_string();

        self.db.insert_recipe(draft, &creation_time, now).await
    }

    pub async fn get(&self, id: i64) -> Result<Recipe> {
        self.db
            .get_recipe(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Invalid recipe id : {}", id)))
    }

    /// Returns every stored recipe. An empty store is an error, not an
    /// empty success - callers get 404 until the first recipe exists.
    pub async fn get_all(&self) -> Result<Vec<Recipe>> {
        let recipes = self.db.get_all_recipes().await?;
        if recipes.is_empty() {
            return Err(AppError::NotFound("No recipes found!".to_string()));
        }
        Ok(recipes)
    }

    /// Overwrites the mutable fields and replaces the ingredient list
    /// wholesale. Does not re-check name uniqueness against other recipes
    /// and never touches `creation_time`.
    pub async fn update(&self, id: i64, draft: &RecipeDraft) -> Result<Recipe> {
        self.get(id).await?;
        self.db.update_recipe(id, draft, Utc::now()).await
    }

    /// Deletes a recipe and, by ownership, its ingredients. The existence
    /// check comes first so a missing id is an error rather than a no-op.
    pub async fn delete(&self, id: i64) -> Result<()> {
        self.get(id).await?;
        self.db.delete_recipe(id).await
    }
}
