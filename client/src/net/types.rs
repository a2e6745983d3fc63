//! Wire DTOs for the hosted session/identity service.
//!
//! DESIGN
//! ======
//! Field names follow the service's JSON (`$id`, `providerUid`, ...) via serde
//! renames; everything the UI does not read is ignored on deserialization.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// The authenticated account behind the current session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "$id")]
    pub user_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

impl Session {
    /// Name shown in the menu and welcome heading: name, then email, then `User`.
    pub fn display_name(&self) -> &str {
        if !self.name.is_empty() {
            &self.name
        } else if !self.email.is_empty() {
            &self.email
        } else {
            "User"
        }
    }
}

/// A provider-scoped identity linked to the current account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "userId", default)]
    pub user_id: String,
    #[serde(default)]
    pub provider: String,
    #[serde(rename = "providerUid", default)]
    pub provider_uid: String,
}

/// `GET /account/identities` response body.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct IdentityList {
    #[serde(default)]
    pub identities: Vec<Identity>,
}

/// Error body returned by the service on non-2xx responses.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ServiceErrorBody {
    #[serde(default)]
    pub message: String,
    /// Machine-readable error type, e.g. `user_invalid_token`.
    #[serde(rename = "type", default)]
    pub kind: String,
}

impl ServiceErrorBody {
    /// `message (type)`, or just whichever of the two is present.
    pub fn describe(&self) -> Option<String> {
        match (self.message.is_empty(), self.kind.is_empty()) {
            (true, true) => None,
            (false, true) => Some(self.message.clone()),
            (true, false) => Some(self.kind.clone()),
            (false, false) => Some(format!("{} ({})", self.message, self.kind)),
        }
    }
}
