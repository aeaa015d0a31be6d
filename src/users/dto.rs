use serde::{Deserialize, Serialize};
use time::Date;

/// Request body for creating or updating a user.
///
/// On update `username` and `password` are accepted but not applied.
#[derive(Debug, Deserialize)]
pub struct UserInput {
    pub username: String,
    pub name: String,
    #[serde(default)]
    pub gender: Option<i32>,
    #[serde(default)]
    pub birth_date: Option<Date>,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
