use tracing::{info, warn};

use super::{
    dto::{MessageResponse, UserInput},
    repo::{StoreError, UserStore},
    repo_types::{NewUser, User},
};
use crate::{auth::password::hash_password, error::AppError};

pub async fn create_user(store: &dyn UserStore, input: UserInput) -> Result<User, AppError> {
    let hashed_password = hash_password(&input.password)?;
    let new_user = NewUser {
        username: input.username,
        hashed_password,
        name: input.name,
        gender: input.gender,
        birth_date: input.birth_date,
    };

    match store.insert(new_user).await {
        Ok(user) => {
            info!(user_id = user.id, username = %user.username, "user created");
            Ok(user)
        }
        Err(StoreError::ConstraintViolation) => {
            warn!("username already registered");
            Err(AppError::Conflict)
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn list_users(store: &dyn UserStore) -> Result<Vec<User>, AppError> {
    Ok(store.list_all().await?)
}

async fn load(store: &dyn UserStore, id: i64) -> Result<User, AppError> {
    store.find_by_id(id).await?.ok_or_else(|| {
        warn!(user_id = id, "user not found");
        AppError::NotFound
    })
}

pub async fn get_user(store: &dyn UserStore, id: i64) -> Result<User, AppError> {
    load(store, id).await
}

pub async fn delete_user(store: &dyn UserStore, id: i64) -> Result<MessageResponse, AppError> {
    let user = load(store, id).await?;
    store.delete(&user).await?;
    info!(user_id = id, "user deleted");
    Ok(MessageResponse {
        message: format!("User with ID {id} was deleted."),
    })
}

pub async fn update_user(
    store: &dyn UserStore,
    id: i64,
    input: UserInput,
) -> Result<MessageResponse, AppError> {
    let mut user = load(store, id).await?;
    user.name = input.name;
    user.gender = input.gender;
    user.birth_date = input.birth_date;
    store.update(&user).await?;
    info!(user_id = id, "user updated");
    Ok(MessageResponse {
        message: format!("User with ID {id} was updated."),
    })
}
