use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt::Display;
use std::str::FromStr;

/// Type-safe identifier for Users. Serialized as a bare JSON number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl From<u64> for UserId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(UserId)
    }
}

/// Represents a registered user in the system.
///
/// # Record Framework
/// This struct implements the [`Record`](record_framework::Record) trait,
/// allowing it to be kept in a [`RecordStore`](record_framework::RecordStore).
///
/// The same shape is used as the request body of `POST /users` and `PUT /users/{id}`.
/// Only JSON objects decode. Missing or `null` fields decode as empty strings so that
/// the adapter can report them as validation failures. The store assigns ids, so an
/// `id` in a body is kept only when it is an unsigned integer and is otherwise dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub phone: String,
}

/// The string fields of a [`User`] body; `id` is handled separately.
#[derive(Deserialize)]
struct UserFields {
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    phone: Option<String>,
}

impl<'de> Deserialize<'de> for User {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut object = Map::<String, Value>::deserialize(deserializer)?;
        let id = object
            .remove("id")
            .and_then(|id| id.as_u64())
            .map(UserId)
            .unwrap_or_default();
        let fields: UserFields =
            serde_json::from_value(Value::Object(object)).map_err(D::Error::custom)?;
        Ok(Self {
            id,
            username: fields.username.unwrap_or_default(),
            email: fields.email.unwrap_or_default(),
            phone: fields.phone.unwrap_or_default(),
        })
    }
}

impl User {
    /// Creates a new User instance.
    ///
    /// # Notes
    /// The `id` field is initialized to `0` and will be set by the store.
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            id: UserId::default(),
            username: username.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }

    /// `username`, `email` and `phone` must all be non-empty.
    pub fn has_required_fields(&self) -> bool {
        !self.username.is_empty() && !self.email.is_empty() && !self.phone.is_empty()
    }
}

/// Payload for partially updating an existing user.
///
/// Only `username`, `email` and `phone` can be patched. The body must be a JSON object;
/// a field is `Some` only if it holds a non-empty string. `null`, numbers, objects and
/// `""` are treated as absent, and unknown keys (including `id`) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserPatch {
    pub username: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl<'de> Deserialize<'de> for UserPatch {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let object = Map::<String, Value>::deserialize(deserializer)?;
        Ok(Self {
            username: non_empty_string(&object, "username"),
            email: non_empty_string(&object, "email"),
            phone: non_empty_string(&object, "phone"),
        })
    }
}

fn non_empty_string(object: &Map<String, Value>, key: &str) -> Option<String> {
    match object.get(key) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}
