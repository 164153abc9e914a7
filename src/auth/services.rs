use argon2::{password_hash::SaltString, Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use rand::rngs::OsRng;
use tracing::{error, info, warn};

use crate::{
    auth::{
        repo::UserRepo,
        repo_types::{NewUser, User},
    },
    error::AppError,
    forms::{self, CreateAccountForm, CREATE_ACCOUNT_FORM},
};

pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            anyhow::anyhow!("hash password: {e}")
        })
}

/// `Ok(false)` for a wrong password; `Err` only when the stored hash is unreadable.
pub fn verify_password(plain: &str, hash: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        error!(error = %e, "argon2 parse hash error");
        anyhow::anyhow!("parse password hash: {e}")
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

/// Create an account. Usernames are not checked for uniqueness.
pub async fn register(users: &dyn UserRepo, form: &CreateAccountForm) -> Result<User, AppError> {
    let errors = forms::validate(CREATE_ACCOUNT_FORM, form);
    if !errors.is_valid() {
        return Err(AppError::Validation(errors));
    }

    let password_hash = hash_password(&form.password)?;
    let user = users
        .create_user(NewUser {
            username: form.username.clone(),
            email: form.email.trim().to_string(),
            password_hash,
        })
        .await?;

    info!(user_id = %user.id, username = %user.username, "user registered");
    Ok(user)
}

/// Returns the user only when the password matches. Unknown usernames and
/// wrong passwords are indistinguishable to the caller.
pub async fn authenticate(
    users: &dyn UserRepo,
    username: &str,
    password: &str,
) -> Result<Option<User>, AppError> {
    let Some(user) = users.find_by_username(username).await? else {
        warn!(username = %username, "login unknown username");
        return Ok(None);
    };

    if !verify_password(password, &user.password_hash)? {
        warn!(user_id = %user.id, "login invalid password");
        return Ok(None);
    }

    info!(user_id = %user.id, "user logged in");
    Ok(Some(user))
}
