use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::Date;

/// User record in the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,                    // assigned by the store
    pub username: String,           // unique
    pub hashed_password: String,    // Argon2 PHC string
    pub name: String,
    pub gender: Option<i32>,        // 1 = male, 2 = female
    pub birth_date: Option<Date>,
}

/// A user that has not been persisted yet.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub hashed_password: String,
    pub name: String,
    pub gender: Option<i32>,
    pub birth_date: Option<Date>,
}
