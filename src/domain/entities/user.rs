//! Shop account entity.

use serde::{Deserialize, Serialize};

use crate::domain::serde_utils::id_string;

/// Account role reported by the auth endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum Role {
    #[default]
    User,
    Admin,
}

/// Authenticated shop user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(alias = "_id", with = "id_string")]
    id: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    user_name: String,
    #[serde(default)]
    role: Role,
}

impl User {
    /// Creates a user with the default role.
    #[must_use]
    pub fn new(id: impl Into<String>, user_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            user_name: user_name.into(),
            role: Role::User,
        }
    }

    /// Server-side user id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name.
    #[must_use]
    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    /// Login email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Account role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// First letter of each word of the user name, uppercased.
    #[must_use]
    pub fn initials(&self) -> String {
        self.user_name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }
}

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    /// Creates login credentials.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initials() {
        assert_eq!(User::new("1", "ada lovelace", "a@x.io").initials(), "AL");
        assert_eq!(User::new("1", "Grace", "g@x.io").initials(), "G");
        assert_eq!(User::new("1", "", "n@x.io").initials(), "");
    }

    #[test]
    fn test_parse_auth_user() {
        let user: User = serde_json::from_str(
            r#"{"id": "u1", "email": "a@x.io", "userName": "Ada", "role": "admin"}"#,
        )
        .unwrap();

        assert_eq!(user.id(), "u1");
        assert_eq!(user.user_name(), "Ada");
        assert_eq!(user.role(), Role::Admin);
    }
}
