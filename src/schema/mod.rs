mod query;

pub use query::QueryRoot;

use async_graphql::{EmptyMutation, EmptySubscription, Schema};

use crate::repository::ParkingApi;

pub type GatewaySchema = Schema<QueryRoot, EmptyMutation, EmptySubscription>;

pub fn build_schema(api: ParkingApi) -> GatewaySchema {
    Schema::build(QueryRoot, EmptyMutation, EmptySubscription)
        .data(api)
        .finish()
}
