use serde::{Deserialize, Serialize};

/// Identifier of a contact inside a store.
///
/// `0` is reserved for records that have not been inserted yet; the store
/// hands out ids starting at 1 and never reuses them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(pub u64);

impl ContactId {
    pub const UNASSIGNED: ContactId = ContactId(0);

    #[inline]
    pub fn is_assigned(self) -> bool {
        self.0 != 0
    }
}

impl std::fmt::Display for ContactId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ContactId {
    fn from(id: u64) -> Self {
        ContactId(id)
    }
}

/// A contact record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default)]
    pub id: ContactId,
    pub name: String,
    pub phone_number: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub relationship: String,
}

impl Contact {
    /// Create a contact that has not been stored yet
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, phone_number: impl Into<String>) -> Self {
        Self {
            id: ContactId::UNASSIGNED,
            name: name.into(),
            phone_number: phone_number.into(),
            email: String::new(),
            relationship: String::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn with_id(mut self, id: impl Into<ContactId>) -> Self {
        self.id = id.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_relationship(mut self, relationship: impl Into<String>) -> Self {
        self.relationship = relationship.into();
        self
    }
}
