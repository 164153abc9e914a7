use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use axum_extra::extract::CookieJar;
use tracing::instrument;
use uuid::Uuid;

use crate::{
    auth::session::CurrentUser,
    error::AppError,
    flash::{self, Flash},
    forms::{FormErrors, RecipeForm},
    recipes::services::{self, DeleteOutcome},
    state::AppState,
    templates::{
        render, AddRecipePage, Chrome, HomePage, RecipeCard, RecipesPage, ShowRecipePage,
    },
};

pub fn recipe_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/recipes", get(my_recipes))
        .route("/recipe/new", get(new_recipe_page).post(create_recipe))
        .route("/recipe/:id", get(show_recipe))
        .route("/recipe/:id/delete", get(delete_recipe).post(delete_recipe))
}

#[instrument(skip(state, current, jar))]
pub async fn home(
    State(state): State<AppState>,
    current: Option<CurrentUser>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let recipes = services::list_all(state.recipes.as_ref()).await?;
    let (jar, notice) = flash::take(jar);
    let page = HomePage {
        chrome: Chrome::new(current.as_ref().map(|c| c.0.username.as_str()), notice),
        recipes: recipes.iter().map(RecipeCard::from).collect(),
    };
    Ok((jar, render(page)?).into_response())
}

#[instrument(skip(state, user, jar), fields(user_id = %user.id))]
pub async fn my_recipes(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let recipes = services::list_owned(state.recipes.as_ref(), &user).await?;
    let (jar, notice) = flash::take(jar);
    let page = RecipesPage {
        chrome: Chrome::new(Some(&user.username), notice),
        recipes: recipes.iter().map(RecipeCard::from).collect(),
    };
    Ok((jar, render(page)?).into_response())
}

#[instrument(skip_all)]
pub async fn new_recipe_page(
    CurrentUser(user): CurrentUser,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let (jar, notice) = flash::take(jar);
    let page = AddRecipePage {
        chrome: Chrome::new(Some(&user.username), notice),
        form: RecipeForm::default(),
        errors: FormErrors::default(),
    };
    Ok((jar, render(page)?).into_response())
}

#[instrument(skip(state, user, jar, form), fields(user_id = %user.id))]
pub async fn create_recipe(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    jar: CookieJar,
    Form(form): Form<RecipeForm>,
) -> Result<Response, AppError> {
    match services::create(state.recipes.as_ref(), &user, &form).await {
        Ok(_) => Ok(Redirect::to("/recipes").into_response()),
        Err(AppError::Validation(errors)) => {
            let (jar, notice) = flash::take(jar);
            let page = AddRecipePage {
                chrome: Chrome::new(Some(&user.username), notice),
                form,
                errors,
            };
            Ok((jar, render(page)?).into_response())
        }
        Err(e) => Err(e),
    }
}

/// Any signed-in user may view any recipe; ownership only gates deletion.
#[instrument(skip(state, user, jar), fields(user_id = %user.id))]
pub async fn show_recipe(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    jar: CookieJar,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = Uuid::parse_str(&id).map_err(|_| AppError::NotFound)?;
    let recipe = services::get(state.recipes.as_ref(), id)
        .await?
        .ok_or(AppError::NotFound)?;

    let (jar, notice) = flash::take(jar);
    let page = ShowRecipePage {
        chrome: Chrome::new(Some(&user.username), notice),
        ingredients: services::ingredient_list(&recipe),
        instructions: services::instruction_list(&recipe),
        is_owner: recipe.user_id == user.id,
        recipe: RecipeCard::from(&recipe),
    };
    Ok((jar, render(page)?).into_response())
}

#[instrument(skip(state, user, jar), fields(user_id = %user.id))]
pub async fn delete_recipe(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    jar: CookieJar,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let Ok(id) = Uuid::parse_str(&id) else {
        return Err(AppError::AuthorizationDenied);
    };
    match services::delete(state.recipes.as_ref(), &user, id).await? {
        DeleteOutcome::Deleted => Ok((
            flash::push(jar, Flash::RecipeDeleted),
            Redirect::to("/recipes"),
        )
            .into_response()),
        DeleteOutcome::Denied => Err(AppError::AuthorizationDenied),
    }
}
