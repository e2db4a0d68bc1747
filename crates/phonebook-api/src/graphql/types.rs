//! GraphQL object and enum types

use async_graphql::{Enum, Object, SimpleObject, ID};
use phonebook_core::{Contact, PhoneFilter};

/// Phone-presence filter for `allPersons`
#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum YesNo {
    Yes,
    No,
}

impl From<YesNo> for PhoneFilter {
    fn from(value: YesNo) -> Self {
        match value {
            YesNo::Yes => PhoneFilter::Yes,
            YesNo::No => PhoneFilter::No,
        }
    }
}

/// Postal address derived from a contact
#[derive(SimpleObject, Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub street: Option<String>,
    pub city: Option<String>,
}

/// A contact as exposed through the API
#[derive(Debug, Clone)]
pub struct Person(pub Contact);

impl From<Contact> for Person {
    fn from(contact: Contact) -> Self {
        Person(contact)
    }
}

#[Object]
impl Person {
    async fn name(&self) -> String {
        self.0.name.clone()
    }

    async fn phone(&self) -> Option<String> {
        self.0.phone.clone()
    }

    async fn address(&self) -> Address {
        let address = self.0.address();
        Address {
            street: Some(address.street),
            city: Some(address.city),
        }
    }

    async fn id(&self) -> ID {
        ID(self.0.id.clone())
    }
}
