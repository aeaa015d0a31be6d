use tracing::{info, warn};

use super::{dto::TokenResponse, jwt::JwtKeys, password::verify_password};
use crate::{
    error::AppError,
    users::{repo::UserStore, repo_types::User},
};

/// Check credentials and issue an access token. Unknown user and wrong
/// password produce the same error.
pub async fn login(
    store: &dyn UserStore,
    keys: &JwtKeys,
    username: &str,
    password: &str,
) -> Result<TokenResponse, AppError> {
    let Some(user) = store.find_by_username(username).await? else {
        warn!(username, "login unknown username");
        return Err(AppError::Unauthorized);
    };

    if !verify_password(password, &user.hashed_password) {
        warn!(username, user_id = user.id, "login invalid password");
        return Err(AppError::Unauthorized);
    }

    let token = keys.issue(&user.username)?;
    info!(user_id = user.id, username, "user logged in");
    Ok(TokenResponse::bearer(token))
}

/// Resolve the user named by a verified token subject.
pub async fn current_user(store: &dyn UserStore, username: &str) -> Result<User, AppError> {
    store.find_by_username(username).await?.ok_or_else(|| {
        warn!(username, "token subject has no user");
        AppError::NotFound
    })
}
