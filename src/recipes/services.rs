use tracing::info;
use uuid::Uuid;

use crate::{
    auth::repo_types::User,
    error::AppError,
    forms::{self, RecipeForm, RECIPE_FORM},
    recipes::{
        repo::RecipeRepo,
        repo_types::{NewRecipe, Recipe},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// Missing, or owned by someone else.
    Denied,
}

/// Split `raw` on `delimiter` and trim each piece. Empty pieces are kept, so
/// `"a. b."` gives `["a", "b", ""]`.
pub fn format_list(raw: &str, delimiter: char) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(delimiter).map(|s| s.trim().to_string()).collect()
}

pub fn ingredient_list(recipe: &Recipe) -> Vec<String> {
    format_list(&recipe.ingredients, '\n')
}

pub fn instruction_list(recipe: &Recipe) -> Vec<String> {
    format_list(&recipe.instructions, '.')
}

pub async fn list_all(recipes: &dyn RecipeRepo) -> Result<Vec<Recipe>, AppError> {
    Ok(recipes.list_all().await?)
}

pub async fn list_owned(recipes: &dyn RecipeRepo, user: &User) -> Result<Vec<Recipe>, AppError> {
    Ok(recipes.list_by_user(user.id).await?)
}

pub async fn create(
    recipes: &dyn RecipeRepo,
    user: &User,
    form: &RecipeForm,
) -> Result<Recipe, AppError> {
    let errors = forms::validate(RECIPE_FORM, form);
    if !errors.is_valid() {
        return Err(AppError::Validation(errors));
    }

    let recipe = recipes
        .insert(NewRecipe {
            user_id: user.id,
            title: form.title.clone(),
            description: form.description.clone(),
            ingredients: form.ingredients.clone(),
            instructions: form.instructions.clone(),
        })
        .await?;
    info!(recipe_id = %recipe.id, user_id = %user.id, "recipe created");
    Ok(recipe)
}

pub async fn get(recipes: &dyn RecipeRepo, id: Uuid) -> Result<Option<Recipe>, AppError> {
    Ok(recipes.get(id).await?)
}

pub async fn delete(
    recipes: &dyn RecipeRepo,
    user: &User,
    id: Uuid,
) -> Result<DeleteOutcome, AppError> {
    if recipes.delete_owned(id, user.id).await? {
        info!(recipe_id = %id, user_id = %user.id, "recipe deleted");
        Ok(DeleteOutcome::Deleted)
    } else {
        info!(recipe_id = %id, user_id = %user.id, "recipe delete denied");
        Ok(DeleteOutcome::Denied)
    }
}


#[cfg(test)]
mod crud_tests {
    use super::*;
    use crate::memory::MemoryStore;
    use time::OffsetDateTime;

    fn user(name: &str) -> User {
        User {
            id: Uuid::new_v4(),
            username: name.into(),
            email: format!("{name}@example.com"),
            password_hash: String::new(),
            created_at: OffsetDateTime::now_utc(),
        }
    }

    fn pancakes() -> RecipeForm {
        RecipeForm {
            title: "Pancakes".into(),
            description: "Fluffy".into(),
            ingredients: "flour\nmilk\neggs".into(),
            instructions: "Mix. Fry.".into(),
        }
    }

    #[tokio::test]
    async fn create_and_list() {
        let store = MemoryStore::default();
        let (alice, bob) = (user("alice"), user("bob"));
        create(&store, &alice, &pancakes()).await.unwrap();
        create(&store, &bob, &pancakes()).await.unwrap();

        assert_eq!(list_all(&store).await.unwrap().len(), 2);
        let owned = list_owned(&store, &alice).await.unwrap();
        assert_eq!(owned.len(), 1);
        assert_eq!(owned[0].user_id, alice.id);
    }

    #[tokio::test]
    async fn create_rejects_empty_fields() {
        let store = MemoryStore::default();
        let form = RecipeForm {
            instructions: "  ".into(),
            ..pancakes()
        };
        let err = create(&store, &user("alice"), &form).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(ref e) if e.get("instructions").len() == 1));
        assert!(list_all(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn only_owner_can_delete() {
        let store = MemoryStore::default();
        let (alice, bob) = (user("alice"), user("bob"));
        let recipe = create(&store, &alice, &pancakes()).await.unwrap();

        assert_eq!(delete(&store, &bob, recipe.id).await.unwrap(), DeleteOutcome::Denied);
        assert!(get(&store, recipe.id).await.unwrap().is_some());

        assert_eq!(delete(&store, &alice, recipe.id).await.unwrap(), DeleteOutcome::Deleted);
        assert!(get(&store, recipe.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn deleting_missing_recipe_is_denied() {
        let store = MemoryStore::default();
        let outcome = delete(&store, &user("alice"), Uuid::new_v4()).await.unwrap();
        assert_eq!(outcome, DeleteOutcome::Denied);
    }

    #[tokio::test]
    async fn created_at_is_per_record() {
        let store = MemoryStore::default();
        let alice = user("alice");
        let first = create(&store, &alice, &pancakes()).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let second = create(&store, &alice, &pancakes()).await.unwrap();
        assert!(second.created_at > first.created_at);
    }

    #[tokio::test]
    async fn lists_split_stored_text() {
        let store = MemoryStore::default();
        let recipe = create(&store, &user("alice"), &pancakes()).await.unwrap();
        assert_eq!(ingredient_list(&recipe), ["flour", "milk", "eggs"]);
        assert_eq!(instruction_list(&recipe), ["Mix", "Fry", ""]);
    }
}
