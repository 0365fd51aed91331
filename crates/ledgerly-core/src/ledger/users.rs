//! User operations

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use super::{from_record, to_record, Ledger, USERS_TABLE};
use crate::error::{Error, Result};
use crate::models::{normalize_email, NewUser, User, UserPatch};
use crate::store::{DataStore, Query};

#[derive(Serialize)]
struct UserRow<'a> {
    #[serde(flatten)]
    user: &'a NewUser,
    registered_at: DateTime<Utc>,
}

impl Ledger {
    /// Store a new user. Fails with [`Error::Conflict`] if the email is
    /// already registered.
    pub async fn create_user(&self, user: &NewUser) -> Result<User> {
        if self.find_user_by_email(&user.email).await?.is_some() {
            return Err(Error::Conflict(format!(
                "email {} is already registered",
                user.email
            )));
        }

        let normalized = NewUser {
            email: normalize_email(&user.email),
            ..user.clone()
        };
        let row = to_record(&UserRow {
            user: &normalized,
            registered_at: Utc::now(),
        })?;

        let created: User = self.insert_as(USERS_TABLE, row).await?;
        info!(user_id = %created.id, "Registered user");
        Ok(created)
    }

    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.first_as(&Query::table(USERS_TABLE).eq("email", normalize_email(email)))
            .await
    }

    pub async fn get_user(&self, id: &str) -> Result<Option<User>> {
        self.first_as(&Query::table(USERS_TABLE).eq("id", id)).await
    }

    /// Apply profile changes; `None` when the user does not exist
    pub async fn update_user(&self, id: &str, patch: &UserPatch) -> Result<Option<User>> {
        let mut record = to_record(patch)?;
        record.insert("updated_at".to_string(), serde_json::to_value(Utc::now())?);

        let updated = self
            .store
            .update(&Query::table(USERS_TABLE).eq("id", id), record)
            .await?;
        match updated.into_iter().next() {
            Some(row) => from_record(row).map(Some),
            None => Ok(None),
        }
    }
}
