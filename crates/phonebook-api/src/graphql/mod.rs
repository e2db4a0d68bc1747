//! GraphQL schema for the phonebook
//!
//! ```graphql
//! query {
//!   personCount
//!   allPersons(phone: NO) { name address { street city } }
//!   findPerson(name: "Jota") { id phone }
//! }
//!
//! mutation {
//!   addPerson(name: "Ana", street: "X", city: "Y") { id }
//!   editPhoneNumber(name: "Jota", phone: "000") { phone }
//! }
//! ```

pub mod mutation;
pub mod query;
pub mod types;

use async_graphql::extensions::apollo_persisted_queries::{ApolloPersistedQueries, LruCacheStorage};
use async_graphql::extensions::Tracing;
use async_graphql::{EmptySubscription, Schema};
use phonebook_core::ContactStore;

use crate::config::SchemaConfig;
use mutation::MutationRoot;
use query::QueryRoot;

pub use mutation::to_graphql_error;
pub use types::{Address, Person, YesNo};

/// The phonebook GraphQL schema type
pub type PhonebookSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the GraphQL schema with the contact store as context
pub fn build_schema(store: ContactStore, config: &SchemaConfig) -> PhonebookSchema {
    let mut builder = Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(store)
        .extension(Tracing);

    if let Some(depth) = config.limit_depth {
        builder = builder.limit_depth(depth);
    }
    if let Some(complexity) = config.limit_complexity {
        builder = builder.limit_complexity(complexity);
    }
    if config.persisted_query_cache_size > 0 {
        builder = builder.extension(ApolloPersistedQueries::new(LruCacheStorage::new(
            config.persisted_query_cache_size,
        )));
    }

    builder.finish()
}

/// Schema definition language for the phonebook schema
pub fn sdl() -> String {
    build_schema(ContactStore::new(), &SchemaConfig::default()).sdl()
}
