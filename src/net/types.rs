//! Wire DTOs for the picture-library REST API.
//!
//! DESIGN
//! ======
//! Every backend response is wrapped in an `Envelope` whose `code` is an
//! application status independent of the HTTP status. Identity payloads keep
//! the backend's camelCase field names so serde round-trips stay lossless.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Envelope code for a successful call.
pub const SUCCESS_CODE: i64 = 0;

/// Display name carried by the anonymous sentinel snapshot.
pub const ANONYMOUS_NAME: &str = "Not logged in";

/// Application-level response wrapper `{code, data, message}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
    pub code: i64,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }
}

/// Role attached to an identity snapshot.
///
/// Unknown role strings from the backend decode as `User`: they are signed in
/// but hold no elevated capability the client knows about.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum UserRole {
    /// Anonymous sentinel; nobody is logged in.
    #[default]
    None,
    User,
    Admin,
}

impl UserRole {
    /// Whether a holder of `self` meets a route's `required` role.
    #[must_use]
    pub fn satisfies(self, required: UserRole) -> bool {
        match required {
            UserRole::None => true,
            UserRole::User => matches!(self, UserRole::User | UserRole::Admin),
            UserRole::Admin => self == UserRole::Admin,
        }
    }

    fn as_wire(self) -> Option<&'static str> {
        match self {
            UserRole::None => None,
            UserRole::User => Some("user"),
            UserRole::Admin => Some("admin"),
        }
    }
}

impl Serialize for UserRole {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_wire() {
            Some(raw) => serializer.serialize_str(raw),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for UserRole {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(match raw.as_deref().map(str::trim) {
            None | Some("") => UserRole::None,
            Some(role) if role.eq_ignore_ascii_case("admin") => UserRole::Admin,
            Some(_) => UserRole::User,
        })
    }
}

/// The logged-in identity as returned by `/api/user/get/login`.
///
/// `Default` is the anonymous sentinel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginUser {
    /// Opaque backend identifier; numeric ids are kept as strings so large
    /// snowflake values never lose precision.
    #[serde(deserialize_with = "deserialize_opaque_id")]
    pub id: Option<String>,
    pub user_name: String,
    pub user_role: UserRole,
    pub user_account: Option<String>,
    pub user_avatar: Option<String>,
    pub user_profile: Option<String>,
    pub create_time: Option<String>,
    pub update_time: Option<String>,
}

impl Default for LoginUser {
    fn default() -> Self {
        Self {
            id: None,
            user_name: ANONYMOUS_NAME.to_owned(),
            user_role: UserRole::None,
            user_account: None,
            user_avatar: None,
            user_profile: None,
            create_time: None,
            update_time: None,
        }
    }
}

impl LoginUser {
    /// The anonymous sentinel snapshot.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.id.is_none() && self.user_role == UserRole::None
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user_role == UserRole::Admin
    }
}

fn deserialize_opaque_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        Some(serde_json::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(D::Error::custom(format!("expected id string or number, got {other}"))),
    }
}
