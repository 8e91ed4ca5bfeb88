use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::organisation::{Organisation, OrganisationMember};
use super::profile::Profile;

/// Role carried by every account and embedded in its access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UserType {
    SuperAdmin,
    Admin,
    User,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::SuperAdmin => "super-admin",
            UserType::Admin => "admin",
            UserType::User => "user",
        }
    }

    pub fn is_super_admin(&self) -> bool {
        matches!(self, UserType::SuperAdmin)
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown user type: {0}")]
pub struct UnknownUserType(pub String);

impl FromStr for UserType {
    type Err = UnknownUserType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "super-admin" => Ok(UserType::SuperAdmin),
            "admin" => Ok(UserType::Admin),
            "user" => Ok(UserType::User),
            other => Err(UnknownUserType(other.to_string())),
        }
    }
}

impl TryFrom<String> for UserType {
    type Error = UnknownUserType;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub phone: Option<String>,
    #[sqlx(try_from = "String")]
    pub user_type: UserType,
    pub is_active: bool,
    pub secret: Option<String>,
    pub is_2fa_enabled: bool,
    pub backup_codes: Vec<String>,
    pub attempts_left: i32,
    pub time_left: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Fresh account with the column defaults applied. `password` must already be hashed.
    pub fn new(
        email: String,
        first_name: String,
        last_name: String,
        password: String,
        phone: Option<String>,
        user_type: UserType,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            first_name,
            last_name,
            password,
            phone,
            user_type,
            is_active: true,
            secret: None,
            is_2fa_enabled: false,
            backup_codes: Vec::new(),
            attempts_left: 3,
            time_left: 60,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Client-facing view of a user: credentials and 2FA material stripped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserView {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub user_type: UserType,
    pub is_active: bool,
    pub is_2fa_enabled: bool,
    pub attempts_left: i32,
    pub time_left: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            phone_number: user.phone.clone(),
            user_type: user.user_type,
            is_active: user.is_active,
            is_2fa_enabled: user.is_2fa_enabled,
            attempts_left: user.attempts_left,
            time_left: user.time_left,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// A user loaded together with its relations.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub user: User,
    pub profile: Option<Profile>,
    pub organisation_members: Vec<OrganisationMember>,
    pub owned_organisations: Vec<Organisation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_type_uses_kebab_case_on_the_wire() {
        assert_eq!(serde_json::to_value(UserType::SuperAdmin).unwrap(), "super-admin");
        let parsed: UserType = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(parsed, UserType::Admin);
    }

    #[test]
    fn user_type_parses_stored_values() {
        assert_eq!("super-admin".parse::<UserType>().unwrap(), UserType::SuperAdmin);
        assert!("root".parse::<UserType>().is_err());
    }

    #[test]
    fn view_drops_credentials() {
        let mut user = User::new(
            "jane@example.com".into(),
            "Jane".into(),
            "Doe".into(),
            "$2b$04$hash".into(),
            Some("1234567890".into()),
            UserType::User,
        );
        user.secret = Some("totp".into());
        user.backup_codes = vec!["code".into()];

        let value = serde_json::to_value(UserView::from(&user)).unwrap();
        assert!(value.get("password").is_none());
        assert!(value.get("secret").is_none());
        assert!(value.get("backup_codes").is_none());
        assert_eq!(value["phone_number"], "1234567890");
    }
}
