use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use thiserror::Error;
use tracing::error;

use crate::{
    flash::{self, Flash},
    forms::FormErrors,
};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("form validation failed")]
    Validation(FormErrors),

    #[error("login required")]
    Unauthenticated,

    #[error("not the owner of this recipe")]
    AuthorizationDenied,

    #[error("recipe not found")]
    NotFound,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<askama::Error> for AppError {
    fn from(e: askama::Error) -> Self {
        AppError::Internal(anyhow::Error::new(e).context("render template"))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(errors) => {
                // Handlers re-render their own form; this only fires if one forgot to.
                let fields = errors.fields().collect::<Vec<_>>().join(", ");
                (StatusCode::BAD_REQUEST, format!("invalid fields: {fields}")).into_response()
            }
            AppError::Unauthenticated => redirect_with(Flash::LoginRequired, "/login"),
            AppError::AuthorizationDenied => redirect_with(Flash::NotAuthorized, "/recipes"),
            AppError::NotFound => redirect_with(Flash::RecipeNotFound, "/recipes"),
            AppError::Internal(e) => {
                error!(error = ?e, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html("<h1>Internal server error</h1>"),
                )
                    .into_response()
            }
        }
    }
}

fn redirect_with(notice: Flash, to: &str) -> Response {
    (flash::push(CookieJar::new(), notice), Redirect::to(to)).into_response()
}
