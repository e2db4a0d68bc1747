//! Contact record model

use serde::{Deserialize, Serialize};

/// A stored contact
///
/// The street and city are kept flat; callers read them through
/// [`Contact::address`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub street: String,
    pub city: String,
}

impl Contact {
    /// Create a contact with a freshly generated id
    pub fn new(new: NewContact) -> Self {
        Self::with_id(uuid::Uuid::new_v4().to_string(), new)
    }

    /// Create a contact with an explicit id
    pub fn with_id(id: impl Into<String>, new: NewContact) -> Self {
        Self {
            id: id.into(),
            name: new.name,
            phone: new.phone,
            street: new.street,
            city: new.city,
        }
    }

    /// Address projected from the flat street/city fields
    pub fn address(&self) -> Address {
        Address {
            street: self.street.clone(),
            city: self.city.clone(),
        }
    }

    pub fn has_phone(&self) -> bool {
        self.phone.is_some()
    }

    /// Copy of this contact with the phone replaced
    pub fn with_phone(&self, phone: impl Into<String>) -> Self {
        Self {
            phone: Some(phone.into()),
            ..self.clone()
        }
    }
}

/// Derived postal address of a contact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
}

/// Input for adding a contact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewContact {
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub street: String,
    pub city: String,
}

impl NewContact {
    pub fn new(name: impl Into<String>, street: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: None,
            street: street.into(),
            city: city.into(),
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }
}

/// Phone-presence filter for listing contacts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhoneFilter {
    /// Only contacts with a phone on file
    Yes,
    /// Only contacts without a phone on file
    No,
}

impl PhoneFilter {
    pub fn matches(self, contact: &Contact) -> bool {
        match self {
            PhoneFilter::Yes => contact.has_phone(),
            PhoneFilter::No => !contact.has_phone(),
        }
    }
}
