use crate::types::{AppError, Ingredient, Recipe, RecipeDraft, Result, User};
use chrono::{DateTime, Utc};
use libsql::{Builder, Connection, Database};

/// Local libsql database client.
///
/// Owns schema creation and all SQL for users, recipes, and the
/// cascade-owned ingredient rows.
pub struct DbClient {
    db: Database,
}

impl DbClient {
    /// Opens (or creates) the database file at `path` and ensures the schema.
    pub async fn open(path: &str) -> Result<Self> {
        let db = Builder::new_local(path)
            .build()
            .await
            .map_err(|e| AppError::Database(format!("Failed to open database: {}", e)))?;

        let client = Self { db };
        client.initialize_schema().await?;

        Ok(client)
    }

    fn connection(&self) -> Result<Connection> {
        self.db
            .connect()
            .map_err(|e| AppError::Database(format!("Failed to get connection: {}", e)))
    }

    async fn initialize_schema(&self) -> Result<()> {
        let conn = self.connection()?;

        // Users table. UNIQUE constraints are the actual uniqueness guard;
        // the service-level existence checks are an early exit.
        conn.execute(
            "CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT NOT NULL UNIQUE,
                email TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                created_at INTEGER NOT NULL
            )",
            (),
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to create users table: {}", e)))?;

        // Recipes table
        conn.execute(
            "CREATE TABLE IF NOT EXISTS recipes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE,
                creation_time TEXT NOT NULL,
                vegetarian INTEGER NOT NULL,
                serving_capacity INTEGER NOT NULL,
                cooking_instructions TEXT NOT NULL,
                last_modified TEXT NOT NULL
            )",
            (),
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to create recipes table: {}", e)))?;

        // Ingredients table, owned by their recipe
        conn.execute(
            "CREATE TABLE IF NOT EXISTS ingredients (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                recipe_id INTEGER NOT NULL,
                position INTEGER NOT NULL,
                name TEXT NOT NULL,
                quantity REAL NOT NULL,
                FOREIGN KEY (recipe_id) REFERENCES recipes(id)
            )",
            (),
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to create ingredients table: {}", e)))?;

        Ok(())
    }

    // User operations

    pub async fn username_exists(&self, username: &str) -> Result<bool> {
        let conn = self.connection()?;

        let mut rows = conn
            .query("SELECT 1 FROM users WHERE username = ? LIMIT 1", [username])
            .await
            .map_err(|e| AppError::Database(format!("Failed to query user: {}", e)))?;

        Ok(rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
            .is_some())
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool> {
        let conn = self.connection()?;

        let mut rows = conn
            .query("SELECT 1 FROM users WHERE email = ? LIMIT 1", [email])
            .await
            .map_err(|e| AppError::Database(format!("Failed to query user: {}", e)))?;

        Ok(rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
            .is_some())
    }

    pub async fn create_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User> {
        let conn = self.connection()?;
        let now = Utc::now().timestamp();

        conn.execute(
            "INSERT INTO users (username, email, password_hash, created_at)
             VALUES (?, ?, ?, ?)",
            (username, email, password_hash, now),
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to create user: {}", e)))?;

        Ok(User {
            id: conn.last_insert_rowid(),
            username: username.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
        })
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let conn = self.connection()?;

        let mut rows = conn
            .query(
                "SELECT id, username, email, password_hash
                 FROM users WHERE username = ?",
                [username],
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to query user: {}", e)))?;

        if let Some(row) = rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            Ok(Some(User {
                id: row.get(0).map_err(|e| AppError::Database(e.to_string()))?,
                username: row.get(1).map_err(|e| AppError::Database(e.to_string()))?,
                email: row.get(2).map_err(|e| AppError::Database(e.to_string()))?,
                password_hash: row.get(3).map_err(|e| AppError::Database(e.to_string()))?,
            }))
        } else {
            Ok(None)
        }
    }

    // Recipe operations

    pub async fn recipe_name_exists(&self, name: &str) -> Result<bool> {
        let conn = self.connection()?;

        let mut rows = conn
            .query("SELECT 1 FROM recipes WHERE name = ? LIMIT 1", [name])
            .await
            .map_err(|e| AppError::Database(format!("Failed to query recipe: {}", e)))?;

        Ok(rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
            .is_some())
    }

    pub async fn insert_recipe(
        &self,
        draft: &RecipeDraft,
        creation_time: &str,
        last_modified: DateTime<Utc>,
    ) -> Result<Recipe> {
        let conn = self.connection()?;

        conn.execute(
            "INSERT INTO recipes (name, creation_time, vegetarian, serving_capacity,
                                  cooking_instructions, last_modified)
             VALUES (?, ?, ?, ?, ?, ?)",
            (
                draft.name.as_str(),
                creation_time,
                i64::from(draft.vegetarian),
                draft.serving_capacity,
                draft.cooking_instructions.as_str(),
                last_modified.to_rfc3339(),
            ),
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to create recipe: {}", e)))?;

        let id = conn.last_insert_rowid();
        self.replace_ingredients(&conn, id, draft).await?;

        self.get_recipe(id)
            .await?
            .ok_or_else(|| AppError::Database("Recipe missing after insert".to_string()))
    }

    pub async fn get_recipe(&self, id: i64) -> Result<Option<Recipe>> {
        let conn = self.connection()?;

        let mut rows = conn
            .query(
                "SELECT id, name, creation_time, vegetarian, serving_capacity,
                        cooking_instructions, last_modified
                 FROM recipes WHERE id = ?",
                [id],
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to query recipe: {}", e)))?;

        if let Some(row) = rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            let mut recipe = recipe_from_row(&row)?;
            recipe.ingredients = self.load_ingredients(&conn, recipe.id).await?;
            Ok(Some(recipe))
        } else {
            Ok(None)
        }
    }

    pub async fn get_all_recipes(&self) -> Result<Vec<Recipe>> {
        let conn = self.connection()?;

        let mut rows = conn
            .query(
                "SELECT id, name, creation_time, vegetarian, serving_capacity,
                        cooking_instructions, last_modified
                 FROM recipes ORDER BY id ASC",
                (),
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to query recipes: {}", e)))?;

        let mut recipes = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            recipes.push(recipe_from_row(&row)?);
        }

        for recipe in &mut recipes {
            recipe.ingredients = self.load_ingredients(&conn, recipe.id).await?;
        }

        Ok(recipes)
    }

    /// Overwrites the mutable recipe columns and replaces the full ingredient
    /// set. `creation_time` is deliberately not touched.
    pub async fn update_recipe(
        &self,
        id: i64,
        draft: &RecipeDraft,
        last_modified: DateTime<Utc>,
    ) -> Result<Recipe> {
        let conn = self.connection()?;

        conn.execute(
            "UPDATE recipes SET name = ?, vegetarian = ?, serving_capacity = ?,
                                cooking_instructions = ?, last_modified = ?
             WHERE id = ?",
            (
                draft.name.as_str(),
                i64::from(draft.vegetarian),
                draft.serving_capacity,
                draft.cooking_instructions.as_str(),
                last_modified.to_rfc3339(),
                id,
            ),
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to update recipe: {}", e)))?;

        self.replace_ingredients(&conn, id, draft).await?;

        self.get_recipe(id)
            .await?
            .ok_or_else(|| AppError::Database("Recipe missing after update".to_string()))
    }

    pub async fn delete_recipe(&self, id: i64) -> Result<()> {
        let conn = self.connection()?;

        conn.execute("DELETE FROM ingredients WHERE recipe_id = ?", [id])
            .await
            .map_err(|e| AppError::Database(format!("Failed to delete ingredients: {}", e)))?;

        conn.execute("DELETE FROM recipes WHERE id = ?", [id])
            .await
            .map_err(|e| AppError::Database(format!("Failed to delete recipe: {}", e)))?;

        Ok(())
    }

    /// Full-replacement semantics: the old ingredient set is discarded and
    /// the draft's set inserted in order, never merged.
    async fn replace_ingredients(
        &self,
        conn: &Connection,
        recipe_id: i64,
        draft: &RecipeDraft,
    ) -> Result<()> {
        conn.execute("DELETE FROM ingredients WHERE recipe_id = ?", [recipe_id])
            .await
            .map_err(|e| AppError::Database(format!("Failed to clear ingredients: {}", e)))?;

        for (position, ingredient) in draft.ingredients.iter().enumerate() {
            conn.execute(
                "INSERT INTO ingredients (recipe_id, position, name, quantity)
                 VALUES (?, ?, ?, ?)",
                (
                    recipe_id,
                    position as i64,
                    ingredient.name.as_str(),
                    ingredient.quantity,
                ),
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to insert ingredient: {}", e)))?;
        }

        Ok(())
    }

    async fn load_ingredients(&self, conn: &Connection, recipe_id: i64) -> Result<Vec<Ingredient>> {
        let mut rows = conn
            .query(
                "SELECT id, name, quantity FROM ingredients
                 WHERE recipe_id = ? ORDER BY position ASC",
                [recipe_id],
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to query ingredients: {}", e)))?;

        let mut ingredients = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            ingredients.push(Ingredient {
                id: row.get(0).map_err(|e| AppError::Database(e.to_string()))?,
                name: row.get(1).map_err(|e| AppError::Database(e.to_string()))?,
                quantity: row.get(2).map_err(|e| AppError::Database(e.to_string()))?,
            });
        }

        Ok(ingredients)
    }
}

fn recipe_from_row(row: &libsql::Row) -> Result<Recipe> {
    let vegetarian: i64 = row.get(3).map_err(|e| AppError::Database(e.to_string()))?;
    let last_modified: String = row.get(6).map_err(|e| AppError::Database(e.to_string()))?;

    Ok(Recipe {
        id: row.get(0).map_err(|e| AppError::Database(e.to_string()))?,
        name: row.get(1).map_err(|e| AppError::Database(e.to_string()))?,
        creation_time: row.get(2).map_err(|e| AppError::Database(e.to_string()))?,
        vegetarian: vegetarian != 0,
        serving_capacity: row.get(4).map_err(|e| AppError::Database(e.to_string()))?,
        cooking_instructions: row.get(5).map_err(|e| AppError::Database(e.to_string()))?,
        last_modified: parse_timestamp(&last_modified)?,
        ingredients: Vec::new(),
    })
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AppError::Database(format!("Invalid timestamp in store: {}", e)))
}
