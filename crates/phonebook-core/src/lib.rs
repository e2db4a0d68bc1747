//! Phonebook Core
//!
//! The contact record model and the in-memory store the GraphQL API serves.
//!
//! ## Modules
//!
//! - `model`: `Contact`, its derived `Address`, add input and phone filter
//! - `store`: `ContactStore`, the single owner of the contact collection
//! - `seed`: built-in sample contacts and JSON seed files
//! - `error`: `ContactError`

pub mod error;
pub mod model;
pub mod seed;
pub mod store;

pub use error::{ContactError, Result};
pub use model::{Address, Contact, NewContact, PhoneFilter};
pub use seed::{load_seed_file, sample_contacts, SeedContact};
pub use store::ContactStore;
