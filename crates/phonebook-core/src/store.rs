//! In-memory contact store
//!
//! Contacts live in a single `Vec` behind a `RwLock`. Reads share the lock;
//! every mutation performs its check and its write under one write guard, so
//! name uniqueness holds even when requests are served concurrently.
//!
//! # Example
//!
//! ```rust
//! use phonebook_core::{ContactStore, NewContact, PhoneFilter};
//!
//! let store = ContactStore::sample();
//! assert_eq!(store.count(), 3);
//!
//! let ana = store.add(NewContact::new("Ana", "X", "Y")).unwrap();
//! assert_eq!(store.count(), 4);
//! assert!(store.filter_by_phone(Some(PhoneFilter::No)).contains(&ana));
//! ```

use std::collections::HashSet;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{ContactError, Result};
use crate::model::{Contact, NewContact, PhoneFilter};

/// Shared handle to the contact collection
///
/// Cloning the handle shares the same underlying collection.
#[derive(Debug, Clone, Default)]
pub struct ContactStore {
    contacts: Arc<RwLock<Vec<Contact>>>,
}

impl ContactStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store from existing contacts
    ///
    /// Fails if two contacts share a name or an id.
    pub fn with_contacts(contacts: impl IntoIterator<Item = Contact>) -> Result<Self> {
        let mut names = HashSet::new();
        let mut ids = HashSet::new();
        let mut seeded = Vec::new();

        for contact in contacts {
            if !names.insert(contact.name.clone()) {
                return Err(ContactError::seed(format!("duplicate name '{}'", contact.name)));
            }
            if !ids.insert(contact.id.clone()) {
                return Err(ContactError::seed(format!("duplicate id '{}'", contact.id)));
            }
            seeded.push(contact);
        }

        Ok(Self {
            contacts: Arc::new(RwLock::new(seeded)),
        })
    }

    /// Store preloaded with the reference contacts
    pub fn sample() -> Self {
        Self {
            contacts: Arc::new(RwLock::new(crate::seed::sample_contacts())),
        }
    }

    // A panicking reader or writer never leaves a partially written record,
    // so a poisoned lock still guards a consistent collection.
    fn read(&self) -> RwLockReadGuard<'_, Vec<Contact>> {
        self.contacts.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Contact>> {
        self.contacts.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn count(&self) -> usize {
        self.read().len()
    }

    /// Snapshot of every contact in insertion order
    pub fn all(&self) -> Vec<Contact> {
        self.read().clone()
    }

    /// First contact whose name matches exactly (case-sensitive)
    pub fn find_by_name(&self, name: &str) -> Option<Contact> {
        self.read().iter().find(|c| c.name == name).cloned()
    }

    /// Contacts matching the phone filter, in store order
    ///
    /// With no filter every contact is returned.
    pub fn filter_by_phone(&self, filter: Option<PhoneFilter>) -> Vec<Contact> {
        let contacts = self.read();
        match filter {
            None => contacts.clone(),
            Some(filter) => contacts
                .iter()
                .filter(|c| filter.matches(c))
                .cloned()
                .collect(),
        }
    }

    /// Append a contact, rejecting duplicate names
    pub fn append(&self, contact: Contact) -> Result<Contact> {
        let mut contacts = self.write();
        if contacts.iter().any(|c| c.name == contact.name) {
            tracing::debug!(name = %contact.name, "rejecting duplicate contact name");
            return Err(ContactError::invalid_argument(contact.name));
        }
        contacts.push(contact.clone());
        Ok(contact)
    }

    /// Replace the first contact matching `predicate` with `update(old)`
    ///
    /// The replacement keeps the old id and position. Returns `None` when no
    /// contact matches.
    pub fn replace_at<P, F>(&self, predicate: P, update: F) -> Option<Contact>
    where
        P: Fn(&Contact) -> bool,
        F: FnOnce(&Contact) -> Contact,
    {
        let mut contacts = self.write();
        let slot = contacts.iter_mut().find(|c| predicate(&**c))?;

        let mut next = update(&*slot);
        next.id = slot.id.clone();
        *slot = next.clone();
        Some(next)
    }

    /// Add a new contact with a generated id
    pub fn add(&self, new: NewContact) -> Result<Contact> {
        let contact = self.append(Contact::new(new))?;
        tracing::info!(id = %contact.id, name = %contact.name, "contact added");
        Ok(contact)
    }

    /// Replace the phone of the contact with the given name
    pub fn edit_phone(&self, name: &str, phone: &str) -> Option<Contact> {
        let updated = self.replace_at(|c| c.name == name, |c| c.with_phone(phone));
        match &updated {
            Some(contact) => tracing::info!(id = %contact.id, name = %name, "phone number updated"),
            None => tracing::debug!(name = %name, "no contact to update"),
        }
        updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn names(contacts: &[Contact]) -> Vec<&str> {
        contacts.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_sample_store() {
        let store = ContactStore::sample();
        assert_eq!(store.count(), 3);
        assert_eq!(names(&store.all()), vec!["Jota", "Elver", "Kerry"]);
    }

    #[test]
    fn test_filter_by_phone() {
        let store = ContactStore::sample();

        assert_eq!(names(&store.filter_by_phone(None)), vec!["Jota", "Elver", "Kerry"]);
        assert_eq!(names(&store.filter_by_phone(Some(PhoneFilter::Yes))), vec!["Jota", "Kerry"]);
        assert_eq!(names(&store.filter_by_phone(Some(PhoneFilter::No))), vec!["Elver"]);
    }

    #[test]
    fn test_filter_on_empty_store() {
        let store = ContactStore::new();
        assert!(store.filter_by_phone(Some(PhoneFilter::Yes)).is_empty());
        assert!(store.filter_by_phone(None).is_empty());
    }

    #[test]
    fn test_find_by_name_is_exact() {
        let store = ContactStore::sample();

        assert_eq!(store.find_by_name("Jota").map(|c| c.id), Some("1".to_string()));
        assert!(store.find_by_name("jota").is_none());
        assert!(store.find_by_name("Jot").is_none());
    }

    #[test]
    fn test_add_appends_with_fresh_id() {
        let store = ContactStore::sample();
        let ana = store.add(NewContact::new("Ana", "X", "Y")).unwrap();

        assert_eq!(store.count(), 4);
        assert!(ana.phone.is_none());
        assert_eq!(ana.address().street, "X");
        assert_eq!(ana.address().city, "Y");
        assert!(!["1", "2", "3"].contains(&ana.id.as_str()));
        assert_eq!(store.all().last(), Some(&ana));
    }

    #[test]
    fn test_add_duplicate_name_leaves_store_unchanged() {
        let store = ContactStore::sample();
        let before = store.all();

        let err = store
            .add(NewContact::new("Jota", "Other", "Place").with_phone("1"))
            .unwrap_err();

        assert!(matches!(err, ContactError::InvalidArgument { ref name } if name == "Jota"));
        assert_eq!(store.all(), before);
    }

    #[test]
    fn test_add_name_uniqueness_is_case_sensitive() {
        let store = ContactStore::sample();
        assert!(store.add(NewContact::new("jota", "s", "c")).is_ok());
        assert_eq!(store.count(), 4);
    }

    #[test]
    fn test_edit_phone_updates_in_place() {
        let store = ContactStore::sample();
        let updated = store.edit_phone("Jota", "000").unwrap();

        assert_eq!(updated.id, "1");
        assert_eq!(updated.phone.as_deref(), Some("000"));

        let all = store.all();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0], updated);
        assert_eq!(all[1].phone, None);
        assert_eq!(all[2].phone.as_deref(), Some("8987495"));
    }

    #[test]
    fn test_edit_phone_missing_name_returns_none() {
        let store = ContactStore::sample();
        let before = store.all();

        assert!(store.edit_phone("Nobody", "000").is_none());
        assert_eq!(store.all(), before);
    }

    #[test]
    fn test_replace_at_preserves_id() {
        let store = ContactStore::sample();
        let updated = store
            .replace_at(
                |c| c.name == "Kerry",
                |c| Contact {
                    id: "other".to_string(),
                    ..c.with_phone("5")
                },
            )
            .unwrap();

        assert_eq!(updated.id, "3");
        assert_eq!(store.find_by_name("Kerry"), Some(updated));
    }

    #[test]
    fn test_with_contacts_rejects_duplicates() {
        let a = Contact::with_id("1", NewContact::new("A", "s", "c"));
        let b = Contact::with_id("2", NewContact::new("A", "s", "c"));
        assert!(matches!(
            ContactStore::with_contacts(vec![a.clone(), b]),
            Err(ContactError::Seed(ref msg)) if msg.contains("'A'")
        ));

        let c = Contact::with_id("1", NewContact::new("C", "s", "c"));
        assert!(matches!(
            ContactStore::with_contacts(vec![a, c]),
            Err(ContactError::Seed(_))
        ));
    }

    #[test]
    fn test_clones_share_contacts() {
        let store = ContactStore::new();
        let handle = store.clone();
        handle.add(NewContact::new("Ana", "X", "Y")).unwrap();
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn test_concurrent_adds_keep_names_unique() {
        let store = ContactStore::new();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || store.add(NewContact::new("Same", "s", "c")).is_ok())
            })
            .collect();

        let successes = handles
            .into_iter()
            .map(|h| h.join().unwrap_or(false))
            .filter(|ok| *ok)
            .count();
        assert_eq!(successes, 1);
        assert_eq!(store.count(), 1);
    }

    fn contacts_strategy() -> impl Strategy<Value = Vec<(String, Option<String>)>> {
        prop::collection::btree_map("[A-Za-z]{1,8}", prop::option::of("[0-9]{3,7}"), 0..12)
            .prop_map(|m| m.into_iter().collect())
    }

    fn build_store(entries: &[(String, Option<String>)]) -> ContactStore {
        ContactStore::with_contacts(entries.iter().enumerate().map(|(i, (name, phone))| {
            let mut new = NewContact::new(name.clone(), "street", "city");
            new.phone = phone.clone();
            Contact::with_id(i.to_string(), new)
        }))
        .unwrap()
    }

    proptest! {
        #[test]
        fn prop_count_matches_unfiltered_list(entries in contacts_strategy()) {
            let store = build_store(&entries);
            prop_assert_eq!(store.count(), store.filter_by_phone(None).len());
        }

        #[test]
        fn prop_phone_filters_partition(entries in contacts_strategy()) {
            let store = build_store(&entries);
            let yes = store.filter_by_phone(Some(PhoneFilter::Yes));
            let no = store.filter_by_phone(Some(PhoneFilter::No));

            prop_assert_eq!(yes.len() + no.len(), store.count());
            prop_assert!(yes.iter().all(|c| !no.contains(c)));
        }

        #[test]
        fn prop_find_by_name_iff_present(entries in contacts_strategy(), probe in "[A-Za-z]{1,8}") {
            let store = build_store(&entries);
            let present = entries.iter().any(|(name, _)| *name == probe);
            prop_assert_eq!(store.find_by_name(&probe).is_some(), present);
        }

        #[test]
        fn prop_duplicate_add_never_grows(entries in contacts_strategy()) {
            let store = build_store(&entries);
            if let Some((name, _)) = entries.first() {
                let before = store.count();
                prop_assert!(store.add(NewContact::new(name.clone(), "s", "c")).is_err());
                prop_assert_eq!(store.count(), before);
            }
        }
    }
}
