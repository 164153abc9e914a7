use askama::Template;
use axum::response::Html;
use time::macros::format_description;
use uuid::Uuid;

use crate::{
    error::AppError,
    flash::Flash,
    forms::{CreateAccountForm, FormErrors, LoginForm, RecipeForm},
    recipes::repo_types::Recipe,
};

/// Navigation and notice data every page shares through `base.html`.
#[derive(Debug, Default)]
pub struct Chrome {
    pub username: Option<String>,
    pub flash: Option<Flash>,
}

impl Chrome {
    pub fn new(username: Option<&str>, flash: Option<Flash>) -> Self {
        Self {
            username: username.map(str::to_owned),
            flash,
        }
    }
}

#[derive(Debug)]
pub struct RecipeCard {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub created: String,
}

impl From<&Recipe> for RecipeCard {
    fn from(r: &Recipe) -> Self {
        Self {
            id: r.id,
            title: r.title.clone(),
            description: r.description.clone(),
            created: format_created(r),
        }
    }
}

fn format_created(r: &Recipe) -> String {
    r.created_at
        .format(format_description!("[year]-[month]-[day] [hour]:[minute]"))
        .unwrap_or_default()
}

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomePage {
    pub chrome: Chrome,
    pub recipes: Vec<RecipeCard>,
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginPage {
    pub chrome: Chrome,
    pub form: LoginForm,
    pub errors: FormErrors,
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "create_account.html")]
pub struct CreateAccountPage {
    pub chrome: Chrome,
    pub form: CreateAccountForm,
    pub errors: FormErrors,
}

#[derive(Template)]
#[template(path = "recipes.html")]
pub struct RecipesPage {
    pub chrome: Chrome,
    pub recipes: Vec<RecipeCard>,
}

#[derive(Template)]
#[template(path = "add_recipe.html")]
pub struct AddRecipePage {
    pub chrome: Chrome,
    pub form: RecipeForm,
    pub errors: FormErrors,
}

#[derive(Template)]
#[template(path = "show_recipe.html")]
pub struct ShowRecipePage {
    pub chrome: Chrome,
    pub recipe: RecipeCard,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub is_owner: bool,
}

pub fn render<T: Template>(page: T) -> Result<Html<String>, AppError> {
    Ok(Html(page.render()?))
}
