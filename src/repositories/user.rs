//! # User Repository
//!
//! Account lookup for sign-in plus provisioning used by the seed and the
//! `create_admin` maintenance binary.

use crate::error::RepositoryError;
use crate::models::user::{self, ActiveModel as UserActiveModel, Entity as User, Model as UserModel};
use crate::models::user_role::{
    self, ActiveModel as UserRoleActiveModel, Entity as UserRole,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use uuid::Uuid;

/// Repository for User and UserRole database operations
pub struct UserRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserRepository<'a> {
    /// Create a new UserRepository with the given database connection
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Look up a user by email together with their role names
    pub async fn find_by_email_with_roles(
        &self,
        email: &str,
    ) -> Result<Option<(UserModel, Vec<String>)>, RepositoryError> {
        let Some(found) = User::find()
            .filter(user::Column::Email.eq(email.trim().to_lowercase()))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let roles = self.roles_for(found.id).await?;

        Ok(Some((found, roles)))
    }

    /// Role names attached to a user
    pub async fn roles_for(&self, user_id: Uuid) -> Result<Vec<String>, RepositoryError> {
        let roles = UserRole::find()
            .filter(user_role::Column::UserId.eq(user_id))
            .all(self.db)
            .await?;

        Ok(roles.into_iter().map(|row| row.role).collect())
    }

    /// Create a user with a role, in one transaction. Used for
    /// provisioning; there is no public signup.
    pub async fn create_with_role(
        &self,
        email: &str,
        password_hash: &str,
        role: &str,
    ) -> Result<UserModel, RepositoryError> {
        let email = email.trim().to_lowercase();
        if !email.contains('@') {
            return Err(RepositoryError::validation("email is not valid"));
        }

        if User::find()
            .filter(user::Column::Email.eq(email.clone()))
            .one(self.db)
            .await?
            .is_some()
        {
            return Err(RepositoryError::conflict(format!(
                "A user with email '{}' already exists",
                email
            )));
        }

        let now = Utc::now();
        let txn = self.db.begin().await?;

        let created = UserActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(email),
            password_hash: Set(password_hash.to_string()),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(&txn)
        .await?;

        UserRoleActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(created.id),
            role: Set(role.to_string()),
            created_at: Set(now.into()),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        Ok(created)
    }
}
