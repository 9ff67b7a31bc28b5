pub mod mutation;
pub mod query;

use async_graphql::{EmptySubscription, MergedObject, Schema};

use mutation::{AccountMutation, BlogMutation};
use query::{AccountQuery, BlogQuery};

#[derive(MergedObject, Default)]
pub struct QueryRoot(AccountQuery, BlogQuery);

#[derive(MergedObject, Default)]
pub struct MutationRoot(AccountMutation, BlogMutation);

pub type ApiSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn create_schema() -> ApiSchema {
    Schema::build(
        QueryRoot::default(),
        MutationRoot::default(),
        EmptySubscription,
    )
    .finish()
}
