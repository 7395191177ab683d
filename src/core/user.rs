//! User account operations.
//!
//! Plaintext passwords only pass through [`create_user`], [`authenticate`] and
//! [`change_password`]; what is stored is an Argon2id hash.

use crate::{
    core::{
        password::{hash_password, verify_password},
        validation::{NAME_MAX_LEN, URL_MAX_LEN, required_text},
    },
    entities::{User, UserRole, user},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{debug, info, instrument, warn};

/// Input for [`create_user`]
#[derive(Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Display name
    pub name: String,
    /// Login name
    pub username: String,
    /// Plaintext password, hashed before storage
    pub password: String,
    /// Avatar image URL
    pub avatar: String,
    /// Whether the account may sign in
    pub active: bool,
    /// Access level
    pub role: UserRole,
}

impl NewUser {
    /// An active regular user.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        avatar: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            username: username.into(),
            password: password.into(),
            avatar: avatar.into(),
            active: true,
            role: UserRole::default(),
        }
    }
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("name", &self.name)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("avatar", &self.avatar)
            .field("active", &self.active)
            .field("role", &self.role)
            .finish()
    }
}

/// Creates a user account, hashing the password.
///
/// # Errors
/// Returns an error if:
/// - Name, username or avatar is blank or too long
/// - The password is empty
/// - Hashing or the database insert fails
#[instrument(skip(db, new_user), fields(username = %new_user.username, role = ?new_user.role))]
pub async fn create_user<C>(db: &C, new_user: NewUser) -> Result<user::Model>
where
    C: ConnectionTrait,
{
    let name = required_text("name", &new_user.name, NAME_MAX_LEN)?;
    let username = required_text("username", &new_user.username, NAME_MAX_LEN)?;
    let avatar = required_text("avatar", &new_user.avatar, URL_MAX_LEN)?;
    if new_user.password.is_empty() {
        return Err(Error::validation("password", "cannot be empty"));
    }
    let password = hash_password(&new_user.password)?;

    let user = user::ActiveModel {
        name: Set(name),
        username: Set(username),
        password: Set(password),
        avatar: Set(avatar),
        active: Set(new_user.active),
        role: Set(new_user.role),
        ..Default::default()
    };
    let user = user.insert(db).await?;
    info!(id = user.id, "User created");
    Ok(user)
}

/// Looks up a user by id.
pub async fn get_user_by_id<C>(db: &C, user_id: i32) -> Result<Option<user::Model>>
where
    C: ConnectionTrait,
{
    User::find_by_id(user_id).one(db).await.map_err(Into::into)
}

/// Looks up a user by login name. Usernames are not unique; the oldest match wins.
pub async fn get_user_by_username<C>(
    db: &C,
    username: &str,
) -> Result<Option<user::Model>>
where
    C: ConnectionTrait,
{
    User::find()
        .filter(user::Column::Username.eq(username.trim()))
        .order_by_asc(user::Column::Id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Checks a username/password pair.
///
/// Returns `Ok(None)` for an unknown user, a wrong password, or a stored
/// hash that is not a PHC string (such as a legacy MD5 digest). The `active`
/// flag is not consulted.
#[instrument(skip(db, password))]
pub async fn authenticate<C>(
    db: &C,
    username: &str,
    password: &str,
) -> Result<Option<user::Model>>
where
    C: ConnectionTrait,
{
    let Some(user) = get_user_by_username(db, username).await? else {
        debug!("Unknown username");
        return Ok(None);
    };

    match verify_password(password, &user.password) {
        Ok(true) => Ok(Some(user)),
        Ok(false) => {
            warn!(id = user.id, "Password mismatch");
            Ok(None)
        }
        Err(e) => {
            warn!(id = user.id, error = %e, "Stored password hash is unreadable");
            Ok(None)
        }
    }
}

async fn find_user<C>(db: &C, user_id: i32) -> Result<user::Model>
where
    C: ConnectionTrait,
{
    User::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "user",
            id: user_id,
        })
}

/// Replaces a user's password with a new hash.
#[instrument(skip(db, new_password))]
pub async fn change_password<C>(
    db: &C,
    user_id: i32,
    new_password: &str,
) -> Result<user::Model>
where
    C: ConnectionTrait,
{
    if new_password.is_empty() {
        return Err(Error::validation("password", "cannot be empty"));
    }
    let mut user: user::ActiveModel = find_user(db, user_id).await?.into();
    user.password = Set(hash_password(new_password)?);
    user.update(db).await.map_err(Into::into)
}

/// Changes a user's role.
#[instrument(skip(db))]
pub async fn set_user_role<C>(
    db: &C,
    user_id: i32,
    role: UserRole,
) -> Result<user::Model>
where
    C: ConnectionTrait,
{
    let mut user: user::ActiveModel = find_user(db, user_id).await?.into();
    user.role = Set(role);
    user.update(db).await.map_err(Into::into)
}

/// Sets or clears a user's `active` flag.
pub async fn set_user_active<C>(
    db: &C,
    user_id: i32,
    active: bool,
) -> Result<user::Model>
where
    C: ConnectionTrait,
{
    let mut user: user::ActiveModel = find_user(db, user_id).await?.into();
    user.active = Set(active);
    user.update(db).await.map_err(Into::into)
}

/// Lists every user in creation order.
pub async fn list_users<C>(db: &C) -> Result<Vec<user::Model>>
where
    C: ConnectionTrait,
{
    User::find()
        .order_by_asc(user::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Lists users whose `active` flag is set.
pub async fn list_active_users<C>(db: &C) -> Result<Vec<user::Model>>
where
    C: ConnectionTrait,
{
    User::find()
        .filter(user::Column::Active.eq(true))
        .order_by_asc(user::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Deletes a user. Fails with a foreign key violation while the user still has
/// receipts or comments.
#[instrument(skip(db))]
pub async fn delete_user<C>(db: &C, user_id: i32) -> Result<()>
where
    C: ConnectionTrait,
{
    let result = User::delete_by_id(user_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::NotFound {
            entity: "user",
            id: user_id,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::SqlErr;

    fn reader() -> NewUser {
        NewUser::new(
            "Nguyễn Văn A",
            "reader",
            "123456",
            "https://example.com/avatar.png",
        )
    }

    #[tokio::test]
    async fn test_create_user_hashes_password() -> Result<()> {
        let db = setup_test_db().await?;

        let user = create_user(&db, reader()).await?;

        assert_eq!(user.username, "reader");
        assert_eq!(user.role, UserRole::User);
        assert!(user.active);
        assert!(!user.is_admin());
        assert!(user.password.starts_with("$argon2id$"));
        assert_ne!(user.password, "123456");
        Ok(())
    }

    #[tokio::test]
    async fn test_create_user_validation() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_user(
            &db,
            NewUser {
                username: "  ".to_string(),
                ..reader()
            },
        )
        .await;
        assert!(matches!(result, Err(Error::Validation { field: "username", .. })));

        let result = create_user(
            &db,
            NewUser {
                avatar: String::new(),
                ..reader()
            },
        )
        .await;
        assert!(matches!(result, Err(Error::Validation { field: "avatar", .. })));

        let result = create_user(
            &db,
            NewUser {
                password: String::new(),
                ..reader()
            },
        )
        .await;
        assert!(matches!(result, Err(Error::Validation { field: "password", .. })));

        assert!(list_users(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_avatar_rejected_by_database() -> Result<()> {
        let db = setup_test_db().await?;

        let result = user::ActiveModel {
            name: Set("No avatar".to_string()),
            username: Set("noavatar".to_string()),
            password: Set("hash".to_string()),
            active: Set(true),
            role: Set(UserRole::User),
            ..Default::default()
        }
        .insert(&db)
        .await;
        assert!(result.is_err());
        Ok(())
    }

    #[tokio::test]
    async fn test_authenticate() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_user(&db, reader()).await?;

        let found = authenticate(&db, "reader", "123456").await?;
        assert_eq!(found.map(|u| u.id), Some(user.id));

        assert!(authenticate(&db, "reader", "654321").await?.is_none());
        assert!(authenticate(&db, "nobody", "123456").await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_authenticate_legacy_md5_hash_is_a_failed_login() -> Result<()> {
        let db = setup_test_db().await?;
        user::ActiveModel {
            name: Set("Legacy".to_string()),
            username: Set("legacy".to_string()),
            // md5("123456") as stored by older deployments
            password: Set("e10adc3949ba59abbe56e057f20f883e".to_string()),
            avatar: Set("https://example.com/a.png".to_string()),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        assert!(authenticate(&db, "legacy", "123456").await?.is_none());
        assert!(authenticate(&db, "legacy", "wrong").await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_change_password() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_user(&db, reader()).await?;

        change_password(&db, user.id, "new-password").await?;

        assert!(authenticate(&db, "reader", "123456").await?.is_none());
        assert!(authenticate(&db, "reader", "new-password").await?.is_some());
        assert!(matches!(
            change_password(&db, user.id, "").await,
            Err(Error::Validation { .. })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_roles_and_active_flag() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_user(&db, "someone").await?;
        let other = create_test_user(&db, "other").await?;

        let promoted = set_user_role(&db, user.id, UserRole::Admin).await?;
        assert!(promoted.is_admin());
        let reloaded = get_user_by_id(&db, user.id).await?.unwrap();
        assert_eq!(reloaded.role, UserRole::Admin);

        let disabled = set_user_active(&db, other.id, false).await?;
        assert!(!disabled.active);
        assert_eq!(list_active_users(&db).await?, vec![reloaded.clone()]);
        assert_eq!(list_users(&db).await?, vec![reloaded, disabled]);

        assert!(matches!(
            set_user_role(&db, 999, UserRole::User).await,
            Err(Error::NotFound { entity: "user", .. })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_user_with_receipts_is_restricted() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_user(&db, "buyer").await?;
        crate::core::receipt::create_receipt(&db, user.id).await?;

        let err = delete_user(&db, user.id).await.unwrap_err();
        assert!(matches!(
            err.constraint_violation(),
            Some(SqlErr::ForeignKeyConstraintViolation(_))
        ));

        let loner = create_test_user(&db, "loner").await?;
        delete_user(&db, loner.id).await?;
        assert!(get_user_by_id(&db, loner.id).await?.is_none());
        Ok(())
    }
}
