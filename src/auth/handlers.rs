use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use axum_extra::extract::CookieJar;
use tracing::{info, instrument};

use crate::{
    auth::{
        services::{authenticate, register},
        session::{end_session, CurrentUser, SessionKeys},
    },
    error::AppError,
    flash,
    forms::{self, CreateAccountForm, FormErrors, LoginForm, LOGIN_FORM},
    state::AppState,
    templates::{render, Chrome, CreateAccountPage, LoginPage},
};

const INVALID_LOGIN: &str = "Invalid username or password";

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/create_account", get(create_account_page).post(create_account))
        .route("/login", get(login_page).post(login))
        .route("/logout", get(logout))
}

#[instrument(skip_all)]
pub async fn create_account_page(jar: CookieJar) -> Result<Response, AppError> {
    let (jar, notice) = flash::take(jar);
    let page = CreateAccountPage {
        chrome: Chrome::new(None, notice),
        form: CreateAccountForm::default(),
        errors: FormErrors::default(),
    };
    Ok((jar, render(page)?).into_response())
}

#[instrument(skip(state, jar, form))]
pub async fn create_account(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<CreateAccountForm>,
) -> Result<Response, AppError> {
    match register(state.users.as_ref(), &form).await {
        Ok(_) => Ok(Redirect::to("/").into_response()),
        Err(AppError::Validation(errors)) => {
            let (jar, notice) = flash::take(jar);
            let page = CreateAccountPage {
                chrome: Chrome::new(None, notice),
                form: CreateAccountForm {
                    password: String::new(),
                    ..form
                },
                errors,
            };
            Ok((jar, render(page)?).into_response())
        }
        Err(e) => Err(e),
    }
}

#[instrument(skip_all)]
pub async fn login_page(
    current: Option<CurrentUser>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    if current.is_some() {
        return Ok(Redirect::to("/recipes").into_response());
    }
    let (jar, notice) = flash::take(jar);
    let page = LoginPage {
        chrome: Chrome::new(None, notice),
        form: LoginForm::default(),
        errors: FormErrors::default(),
        error: None,
    };
    Ok((jar, render(page)?).into_response())
}

#[instrument(skip(state, current, jar, form))]
pub async fn login(
    State(state): State<AppState>,
    current: Option<CurrentUser>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    if current.is_some() {
        return Ok(Redirect::to("/recipes").into_response());
    }

    let errors = forms::validate(LOGIN_FORM, &form);
    let user = if errors.is_valid() {
        authenticate(state.users.as_ref(), &form.username, &form.password).await?
    } else {
        None
    };

    match user {
        Some(user) => {
            let keys = SessionKeys::from_ref(&state);
            let jar = keys.establish(jar, &user, form.remember())?;
            Ok((jar, Redirect::to("/recipes")).into_response())
        }
        // Blank fields get the same message as bad credentials.
        None => {
            let (jar, notice) = flash::take(jar);
            let page = LoginPage {
                chrome: Chrome::new(None, notice),
                form: LoginForm {
                    password: String::new(),
                    ..form
                },
                errors: FormErrors::default(),
                error: Some(INVALID_LOGIN.to_string()),
            };
            Ok((jar, render(page)?).into_response())
        }
    }
}

#[instrument(skip_all)]
pub async fn logout(current: Option<CurrentUser>, jar: CookieJar) -> impl IntoResponse {
    if let Some(CurrentUser(user)) = current {
        info!(user_id = %user.id, "user logged out");
    }
    (end_session(jar), Redirect::to("/"))
}
