//! Initial contact data
//!
//! The store starts either from the built-in sample contacts or from a JSON
//! seed file:
//!
//! ```json
//! [
//!   { "id": "1", "name": "Jota", "phone": "1234567", "street": "Manolito", "city": "Sevilla" },
//!   { "name": "Elver", "street": "Juanjose", "city": "Huelva" }
//! ]
//! ```
//!
//! Entries without an `id` get a generated one.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{Contact, NewContact};
use crate::store::ContactStore;

/// One entry of a seed file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedContact {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub street: String,
    pub city: String,
}

impl From<SeedContact> for Contact {
    fn from(seed: SeedContact) -> Self {
        let new = NewContact {
            name: seed.name,
            phone: seed.phone,
            street: seed.street,
            city: seed.city,
        };
        match seed.id {
            Some(id) => Contact::with_id(id, new),
            None => Contact::new(new),
        }
    }
}

/// The three reference contacts
pub fn sample_contacts() -> Vec<Contact> {
    vec![
        Contact::with_id(
            "1",
            NewContact::new("Jota", "Manolito Trentaitreh", "Sevilla city").with_phone("1234567"),
        ),
        Contact::with_id("2", NewContact::new("Elver", "Juanjose", "Huelva")),
        Contact::with_id(
            "3",
            NewContact::new("Kerry", "Kopo", "Marbella").with_phone("8987495"),
        ),
    ]
}

/// Parse seed contacts from a JSON array
pub fn parse_seed(json: &str) -> Result<Vec<Contact>> {
    let entries: Vec<SeedContact> = serde_json::from_str(json)?;
    Ok(entries.into_iter().map(Contact::from).collect())
}

/// Build a store from a JSON seed file
pub fn load_seed_file(path: impl AsRef<Path>) -> Result<ContactStore> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let store = ContactStore::with_contacts(parse_seed(&content)?)?;
    tracing::info!(path = %path.display(), contacts = store.count(), "loaded seed file");
    Ok(store)
}
