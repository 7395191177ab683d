//! User entity - Customers and administrators.
//!
//! Passwords are stored as Argon2id PHC strings, never in plaintext. The role is a
//! closed two-value enumeration persisted as an integer (`1` = admin, `2` = user).

use sea_orm::{Set, entity::prelude::*};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Access level of a user account
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum UserRole {
    /// Store administrator
    #[sea_orm(num_value = 1)]
    Admin,
    /// Regular customer
    #[default]
    #[sea_orm(num_value = 2)]
    User,
}

/// User database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Unique identifier for the user
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Display name
    #[sea_orm(column_type = "String(StringLen::N(50))")]
    pub name: String,
    /// Login name
    #[sea_orm(column_type = "String(StringLen::N(50))")]
    pub username: String,
    /// Argon2id password hash in PHC format
    #[serde(skip_serializing)]
    pub password: String,
    /// Avatar image URL
    #[sea_orm(column_type = "String(StringLen::N(100))")]
    pub avatar: String,
    /// Whether the account may sign in
    pub active: bool,
    /// Access level
    pub role: UserRole,
}

/// Defines relationships between User and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One user has many receipts
    #[sea_orm(has_many = "super::receipt::Entity")]
    Receipts,
    /// One user has many comments
    #[sea_orm(has_many = "super::comment::Entity")]
    Comments,
}

impl Related<super::receipt::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Receipts.def()
    }
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {
    /// New accounts are active regular users unless set otherwise.
    fn new() -> Self {
        Self {
            active: Set(true),
            role: Set(UserRole::default()),
            ..<Self as ActiveModelTrait>::default()
        }
    }
}

impl Model {
    /// Whether this account has administrator rights
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_values() {
        assert_eq!(UserRole::Admin.to_value(), 1);
        assert_eq!(UserRole::User.to_value(), 2);
        assert_eq!(UserRole::default(), UserRole::User);
    }

    #[test]
    fn test_role_rejects_unknown_values() {
        assert_eq!(UserRole::try_from_value(&1).ok(), Some(UserRole::Admin));
        assert_eq!(UserRole::try_from_value(&2).ok(), Some(UserRole::User));
        assert!(UserRole::try_from_value(&0).is_err());
        assert!(UserRole::try_from_value(&3).is_err());
    }

    #[tokio::test]
    async fn test_insert_with_only_required_fields() -> crate::errors::Result<()> {
        let db = crate::test_utils::setup_test_db().await?;

        let user = ActiveModel {
            name: Set("Nguyễn Văn A".to_string()),
            username: Set("vana".to_string()),
            password: Set(crate::test_utils::TEST_PASSWORD_HASH.to_string()),
            avatar: Set("https://example.com/a.png".to_string()),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        assert!(user.active);
        assert_eq!(user.role, UserRole::User);
        assert!(!user.is_admin());
        Ok(())
    }
}
