//! Persisted session record and its typed decode step.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::user::{AuthUser, Role};

/// Why a persisted record could not be turned into an [`AuthUser`].
#[derive(Debug, Error)]
pub enum RecordError {
    /// The raw value is not valid JSON of the expected shape.
    #[error("record is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// A required field is missing or empty.
    #[error("record is missing required field '{0}'")]
    MissingField(&'static str),
    /// A role name is not one of the known roles.
    #[error("record contains unknown role '{0}'")]
    UnknownRole(String),
}

/// Wire shape of the persisted session:
/// `{ id, email, roles: [..], tenantId, token }`.
///
/// Fields are lenient on the way in so that shape problems surface as a
/// [`RecordError`] rather than an opaque JSON error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    /// User identifier.
    #[serde(default)]
    pub id: String,
    /// Login email.
    #[serde(default)]
    pub email: String,
    /// Role names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
    /// Tenant identifier.
    #[serde(default)]
    pub tenant_id: String,
    /// Bearer token.
    #[serde(default)]
    pub token: String,
}

impl SessionRecord {
    /// Parse and validate a raw persisted value.
    pub fn decode(raw: &str) -> Result<AuthUser, RecordError> {
        let record: SessionRecord = serde_json::from_str(raw)?;
        record.into_user()
    }

    /// Serialize a user into its persisted form.
    pub fn encode(user: &AuthUser) -> Result<String, serde_json::Error> {
        serde_json::to_string(&SessionRecord::from(user))
    }

    /// Validate the record shape and convert it into a typed user.
    pub fn into_user(self) -> Result<AuthUser, RecordError> {
        if self.id.is_empty() {
            return Err(RecordError::MissingField("id"));
        }
        if self.email.is_empty() {
            return Err(RecordError::MissingField("email"));
        }
        let names = self.roles.ok_or(RecordError::MissingField("roles"))?;

        let roles = names
            .iter()
            .map(|name| {
                name.parse::<Role>()
                    .map_err(|_| RecordError::UnknownRole(name.clone()))
            })
            .collect::<Result<_, _>>()?;

        Ok(AuthUser {
            id: self.id,
            email: self.email,
            roles,
            tenant_id: self.tenant_id,
            token: self.token,
        })
    }
}

impl From<&AuthUser> for SessionRecord {
    fn from(user: &AuthUser) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            roles: Some(user.roles.iter().map(|r| r.as_str().to_string()).collect()),
            tenant_id: user.tenant_id.clone(),
            token: user.token.clone(),
        }
    }
}
