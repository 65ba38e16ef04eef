use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of one asynchronous operation: where it came from, who started
/// it and the caller's own id for it.
///
/// Components are free-form. Empty strings are accepted; keeping them
/// distinct enough to avoid key collisions is up to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobIdentity {
    pub source: String,
    pub user: String,
    pub id: String,
}

impl JobIdentity {
    pub fn new(source: impl Into<String>, user: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            user: user.into(),
            id: id.into(),
        }
    }

    /// Composite registry key for this identity.
    pub fn key(&self) -> JobKey {
        JobKey::from(self)
    }
}

impl fmt::Display for JobIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.source, self.user, self.id)
    }
}

/// Composite job key.
///
/// Format: `{source}/{user}/{id}`. Deterministic, so the same identity always
/// maps to the same registry slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobKey(pub String);

impl JobKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&JobIdentity> for JobKey {
    fn from(identity: &JobIdentity) -> Self {
        Self(identity.to_string())
    }
}
