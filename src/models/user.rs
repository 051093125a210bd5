use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{Id, UserRole};

/// Stored user record. The password never leaves the process; routes hand
/// out [`UserProfile`] instead.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Id,
    pub username: String,
    pub password: String,
    pub display_name: String,
    pub email: String,
    pub role: UserRole,
    pub avatar_initials: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Id,
    pub username: String,
    pub display_name: String,
    pub email: String,
    pub role: UserRole,
    pub avatar_initials: Option<String>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            display_name: user.display_name,
            email: user.email,
            role: user.role,
            avatar_initials: user.avatar_initials,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewUserRequest {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
    #[validate(length(min = 1))]
    pub display_name: String,
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    pub role: UserRole,
    pub avatar_initials: Option<String>,
}
