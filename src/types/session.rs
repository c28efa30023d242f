use std::fmt;

use serde::{Deserialize, Serialize};

/// The logged-in user as held by the auth context.
///
/// The password is kept in memory for the lifetime of the session but is
/// never serialized, so it does not reach local storage.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub email: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "senha", skip_serializing, default)]
    pub password: Option<String>,
}

impl Session {
    pub fn new(
        id: impl Into<String>,
        email: impl Into<String>,
        name: impl Into<String>,
        password: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            name: name.into(),
            password,
        }
    }

    /// Merge-patch: every field present in `patch` replaces the current value,
    /// absent fields are left untouched.
    #[must_use]
    pub fn merged(&self, patch: &SessionPatch) -> Self {
        Self {
            id: patch.id.clone().unwrap_or_else(|| self.id.clone()),
            email: patch.email.clone().unwrap_or_else(|| self.email.clone()),
            name: patch.name.clone().unwrap_or_else(|| self.name.clone()),
            password: patch.password.clone().or_else(|| self.password.clone()),
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("name", &self.name)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "nome", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "senha", skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl SessionPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.email.is_none() && self.name.is_none() && self.password.is_none()
    }
}
