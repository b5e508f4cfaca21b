//! End-user accounts managed from the user table.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use pathway_core::{UserId, UserStatus, UserTier};

use super::{ValidationError, non_blank};
use crate::components::Record;

sort_field! {
    /// Sort choices for the user table.
    UserSortField {
        #[default]
        DateJoined => "date_joined", "dateJoined";
        LastActivity => "last_activity", "lastActivity";
    }
}

/// A customer account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub tier: UserTier,
    pub status: UserStatus,
    /// `YYYY-MM-DD`
    pub date_joined: String,
    /// `YYYY-MM-DD`
    pub last_activity: String,
    pub phone: String,
    pub address: String,
}

impl Record for User {
    type Id = UserId;
    type SortField = UserSortField;

    fn id(&self) -> &UserId {
        &self.id
    }

    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        let value: &str = match name {
            "id" => self.id.as_str(),
            "name" => &self.name,
            "email" => &self.email,
            "tier" => self.tier.as_str(),
            "status" => self.status.as_str(),
            "dateJoined" => &self.date_joined,
            "lastActivity" => &self.last_activity,
            "phone" => &self.phone,
            "address" => &self.address,
            _ => return None,
        };
        Some(Cow::Borrowed(value))
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.email.as_str()]
    }
}

/// Create/edit form for a user.
///
/// Blank dates mean "today" on create and "unchanged" on edit.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub tier: UserTier,
    pub status: UserStatus,
    #[serde(default)]
    pub date_joined: Option<String>,
    #[serde(default)]
    pub last_activity: Option<String>,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
}

impl UserForm {
    /// Check required fields.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the name or email is blank.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() || self.email.trim().is_empty() {
            return Err(ValidationError::new("Name and email are required."));
        }
        Ok(())
    }

    /// Build a new user.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if required fields are blank.
    pub fn into_user(self, id: UserId, today: &str) -> Result<User, ValidationError> {
        self.validate()?;
        Ok(User {
            id,
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            tier: self.tier,
            status: self.status,
            date_joined: non_blank(self.date_joined.as_deref()).unwrap_or(today).to_string(),
            last_activity: non_blank(self.last_activity.as_deref()).unwrap_or(today).to_string(),
            phone: self.phone.trim().to_string(),
            address: self.address.trim().to_string(),
        })
    }

    /// Overwrite `user` with this form, keeping dates left blank.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if required fields are blank; `user` is
    /// left untouched in that case.
    pub fn apply_to(self, user: &mut User) -> Result<(), ValidationError> {
        self.validate()?;
        user.name = self.name.trim().to_string();
        user.email = self.email.trim().to_string();
        user.tier = self.tier;
        user.status = self.status;
        if let Some(date) = non_blank(self.date_joined.as_deref()) {
            user.date_joined = date.to_string();
        }
        if let Some(date) = non_blank(self.last_activity.as_deref()) {
            user.last_activity = date.to_string();
        }
        user.phone = self.phone.trim().to_string();
        user.address = self.address.trim().to_string();
        Ok(())
    }
}
