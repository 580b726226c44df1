//! User-creation payloads

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Form fields tracked by the user-creation form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UserField {
    Username,
    FirstName,
    LastName,
    Email,
    Password,
}

impl UserField {
    pub const ALL: [UserField; 5] = [
        UserField::Username,
        UserField::FirstName,
        UserField::LastName,
        UserField::Email,
        UserField::Password,
    ];

    /// Name used in JSON payloads and server hints
    pub fn as_str(&self) -> &'static str {
        match self {
            UserField::Username => "username",
            UserField::FirstName => "firstName",
            UserField::LastName => "lastName",
            UserField::Email => "email",
            UserField::Password => "password",
        }
    }
}

/// Create user request body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl NewUser {
    /// Build from raw field values, trimming each
    pub fn from_fields(mut value_of: impl FnMut(UserField) -> String) -> Self {
        let mut field = |f| value_of(f).trim().to_string();
        Self {
            username: field(UserField::Username),
            first_name: field(UserField::FirstName),
            last_name: field(UserField::LastName),
            email: field(UserField::Email),
            password: field(UserField::Password),
        }
    }
}

/// Body of a 409 response to a create user request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConflictBody {
    /// String entries of `hints`; anything else in the list is skipped
    pub hints: Vec<String>,
}

impl ConflictBody {
    /// Parse leniently: an unreadable body counts as `{}`
    pub fn parse(body: &str) -> Self {
        let value: Value = match serde_json::from_str(body) {
            Ok(value) => value,
            Err(e) => {
                tracing::debug!("Ignoring unparseable conflict body: {}", e);
                return Self::default();
            }
        };

        let hints = value
            .get("hints")
            .and_then(Value::as_array)
            .map(|hints| {
                hints
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        Self { hints }
    }
}
