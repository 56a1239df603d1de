//! User model and session types

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::ToSchema;
use validator::Validate;

use crate::collection::CollectionItem;
use crate::error::{AppError, AppResult};

/// User role (authorization level)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Librarian,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Librarian => "librarian",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(UserRole::Admin),
            "librarian" => Ok(UserRole::Librarian),
            _ => Err(format!("Invalid user role: {}", s)),
        }
    }
}

// SQLx conversion for UserRole (stored as text)
impl sqlx::Type<Postgres> for UserRole {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for UserRole {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for UserRole {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        let s: String = self.as_str().to_string();
        <String as Encode<Postgres>>::encode(s, buf)
    }
}

/// User account status. Stored as i16 in the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[repr(i16)]
pub enum UserStatus {
    Active = 0,
    Blocked = 1,
}

impl From<i16> for UserStatus {
    fn from(v: i16) -> Self {
        match v {
            1 => UserStatus::Blocked,
            _ => UserStatus::Active,
        }
    }
}

/// Full user model from database. The password hash never leaves the server.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: i32,
    pub login: String,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub status: i16,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(skip)]
    pub password_hash: String,
}

/// Create user request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(length(min = 3, max = 64))]
    pub login: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    pub role: UserRole,
}

/// Update user request; absent fields are left unchanged
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUser {
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(min = 8, max = 128))]
    pub password: Option<String>,
    pub role: Option<UserRole>,
    pub status: Option<i16>,
}

/// Sort fields available on user list views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum UserSortField {
    Login,
    Name,
    Email,
    CreatedAt,
}

impl CollectionItem for User {
    type SortField = UserSortField;

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.login, &self.name, &self.email]
    }

    fn compare_by(&self, other: &Self, field: UserSortField) -> Ordering {
        match field {
            UserSortField::Login => self.login.to_lowercase().cmp(&other.login.to_lowercase()),
            UserSortField::Name => self.name.to_lowercase().cmp(&other.name.to_lowercase()),
            UserSortField::Email => self.email.to_lowercase().cmp(&other.email.to_lowercase()),
            UserSortField::CreatedAt => self.created_at.cmp(&other.created_at),
        }
    }

    fn is_active(&self) -> bool {
        UserStatus::from(self.status) == UserStatus::Active
    }
}

/// Authenticated session payload stored server-side in Redis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    pub user_id: i32,
    pub login: String,
    pub name: String,
    pub role: UserRole,
}

impl SessionUser {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Gate for user, role, and penalty-rule management
    pub fn require_admin(&self) -> AppResult<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::Authorization(
                "Administrator role required".to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        assert_eq!("admin".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert_eq!("Librarian".parse::<UserRole>().unwrap(), UserRole::Librarian);
        assert!("guest".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_require_admin() {
        let admin = SessionUser {
            user_id: 1,
            login: "root".to_string(),
            name: "Root".to_string(),
            role: UserRole::Admin,
        };
        let librarian = SessionUser {
            user_id: 2,
            login: "lib".to_string(),
            name: "Lib".to_string(),
            role: UserRole::Librarian,
        };
        assert!(admin.require_admin().is_ok());
        assert!(librarian.require_admin().is_err());
    }
}
