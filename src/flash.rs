//! One-shot notices shown on the next rendered page.
//!
//! The `flash` cookie carries only a short code; the text lives here so the
//! cookie never holds user-controlled content.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

const FLASH_COOKIE: &str = "flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash {
    RecipeDeleted,
    NotAuthorized,
    RecipeNotFound,
    LoginRequired,
}

impl Flash {
    pub fn code(self) -> &'static str {
        match self {
            Flash::RecipeDeleted => "recipe-deleted",
            Flash::NotAuthorized => "not-authorized",
            Flash::RecipeNotFound => "recipe-not-found",
            Flash::LoginRequired => "login-required",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "recipe-deleted" => Some(Flash::RecipeDeleted),
            "not-authorized" => Some(Flash::NotAuthorized),
            "recipe-not-found" => Some(Flash::RecipeNotFound),
            "login-required" => Some(Flash::LoginRequired),
            _ => None,
        }
    }

    /// CSS level used by the layout.
    pub fn level(&self) -> &'static str {
        match self {
            Flash::RecipeDeleted => "success",
            Flash::NotAuthorized | Flash::RecipeNotFound => "danger",
            Flash::LoginRequired => "info",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Flash::RecipeDeleted => "Recipe deleted successfully!",
            Flash::NotAuthorized => "You are not authorized to delete this recipe.",
            Flash::RecipeNotFound => "Recipe not found.",
            Flash::LoginRequired => "Please log in to access this page.",
        }
    }
}

/// Queue a notice for the next page.
pub fn push(jar: CookieJar, flash: Flash) -> CookieJar {
    jar.add(
        Cookie::build((FLASH_COOKIE, flash.code()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax),
    )
}

/// Pop the pending notice, if any. The returned jar must be part of the
/// response so the cookie is cleared.
pub fn take(jar: CookieJar) -> (CookieJar, Option<Flash>) {
    let Some(code) = jar.get(FLASH_COOKIE).map(|c| c.value().to_owned()) else {
        return (jar, None);
    };
    (
        jar.remove(Cookie::build(FLASH_COOKIE).path("/")),
        Flash::from_code(&code),
    )
}
