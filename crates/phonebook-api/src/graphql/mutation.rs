//! Mutation resolvers

use async_graphql::{Context, ErrorExtensions, Object, Result};
use phonebook_core::{ContactError, ContactStore, NewContact};

use super::types::Person;

#[derive(Debug, Default)]
pub struct MutationRoot;

#[Object(name = "Mutation")]
impl MutationRoot {
    /// Add a contact; the name must not already be taken
    async fn add_person(
        &self,
        ctx: &Context<'_>,
        name: String,
        phone: Option<String>,
        street: String,
        city: String,
    ) -> Result<Option<Person>> {
        let store = ctx.data::<ContactStore>()?;
        let new = NewContact {
            name,
            phone,
            street,
            city,
        };

        store
            .add(new)
            .map(|contact| Some(Person::from(contact)))
            .map_err(to_graphql_error)
    }

    /// Replace the phone of the named contact; null when no contact matches
    async fn edit_phone_number(
        &self,
        ctx: &Context<'_>,
        name: String,
        phone: String,
    ) -> Result<Option<Person>> {
        let store = ctx.data::<ContactStore>()?;
        Ok(store.edit_phone(&name, &phone).map(Person::from))
    }
}

/// Map a store error onto the GraphQL error shape clients expect
///
/// Client errors surface as `BAD_USER_INPUT` with the rejected argument under
/// `invalidArgs`; anything else is `INTERNAL_SERVER_ERROR`.
pub fn to_graphql_error(err: ContactError) -> async_graphql::Error {
    let code = if err.is_user_error() {
        "BAD_USER_INPUT"
    } else {
        "INTERNAL_SERVER_ERROR"
    };
    let invalid_args = err.invalid_args().map(str::to_string);

    async_graphql::Error::new(err.to_string()).extend_with(|_, e| {
        e.set("code", code.to_string());
        if let Some(arg) = invalid_args {
            e.set("invalidArgs", arg);
        }
    })
}
