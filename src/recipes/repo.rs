use anyhow::Context;
use async_trait::async_trait;
use uuid::Uuid;

use crate::db::PgStore;
use crate::recipes::repo_types::{NewRecipe, Recipe};

#[async_trait]
pub trait RecipeRepo: Send + Sync {
    /// Every recipe, oldest first.
    async fn list_all(&self) -> anyhow::Result<Vec<Recipe>>;

    async fn list_by_user(&self, user_id: Uuid) -> anyhow::Result<Vec<Recipe>>;

    async fn insert(&self, new: NewRecipe) -> anyhow::Result<Recipe>;

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Recipe>>;

    /// Deletes the recipe only if `user_id` owns it. Returns whether a row went away.
    async fn delete_owned(&self, id: Uuid, user_id: Uuid) -> anyhow::Result<bool>;
}

#[async_trait]
impl RecipeRepo for PgStore {
    async fn list_all(&self) -> anyhow::Result<Vec<Recipe>> {
        sqlx::query_as::<_, Recipe>(
            r#"
            SELECT id, user_id, title, description, ingredients, instructions, created_at
            FROM recipes
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(self.pool())
        .await
        .context("list recipes")
    }

    async fn list_by_user(&self, user_id: Uuid) -> anyhow::Result<Vec<Recipe>> {
        sqlx::query_as::<_, Recipe>(
            r#"
            SELECT id, user_id, title, description, ingredients, instructions, created_at
            FROM recipes
            WHERE user_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool())
        .await
        .context("list recipes by user")
    }

    async fn insert(&self, new: NewRecipe) -> anyhow::Result<Recipe> {
        sqlx::query_as::<_, Recipe>(
            r#"
            INSERT INTO recipes (user_id, title, description, ingredients, instructions)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, title, description, ingredients, instructions, created_at
            "#,
        )
        .bind(new.user_id)
        .bind(&new.title)
        .bind(&new.description)
        .bind(&new.ingredients)
        .bind(&new.instructions)
        .fetch_one(self.pool())
        .await
        .context("insert recipe")
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Recipe>> {
        sqlx::query_as::<_, Recipe>(
            r#"
            SELECT id, user_id, title, description, ingredients, instructions, created_at
            FROM recipes
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .context("get recipe")
    }

    async fn delete_owned(&self, id: Uuid, user_id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query(r#"DELETE FROM recipes WHERE id = $1 AND user_id = $2"#)
            .bind(id)
            .bind(user_id)
            .execute(self.pool())
            .await
            .context("delete recipe")?;
        Ok(result.rows_affected() > 0)
    }
}
