//! Query resolvers

use async_graphql::{Context, Object, Result};
use phonebook_core::ContactStore;

use super::types::{Person, YesNo};

#[derive(Debug, Default)]
pub struct QueryRoot;

#[Object(name = "Query")]
impl QueryRoot {
    /// Number of stored contacts
    async fn person_count(&self, ctx: &Context<'_>) -> Result<i32> {
        let count = ctx.data::<ContactStore>()?.count();
        Ok(i32::try_from(count).unwrap_or(i32::MAX))
    }

    /// Every contact, optionally filtered by whether a phone is on file
    async fn all_persons(&self, ctx: &Context<'_>, phone: Option<YesNo>) -> Result<Vec<Person>> {
        let store = ctx.data::<ContactStore>()?;
        Ok(store
            .filter_by_phone(phone.map(Into::into))
            .into_iter()
            .map(Person::from)
            .collect())
    }

    /// Contact with exactly this name, or null
    async fn find_person(&self, ctx: &Context<'_>, name: String) -> Result<Option<Person>> {
        let store = ctx.data::<ContactStore>()?;
        Ok(store.find_by_name(&name).map(Person::from))
    }
}
