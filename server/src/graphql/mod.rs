mod inputs;
mod mutations;
mod queries;
mod types;

use anyhow::anyhow;
use async_graphql::{Context, EmptySubscription, ErrorExtensions, Schema};
use platform_api::{ApiError, internal_error};
use products_crm::{CrmError, CrmService};

pub use mutations::MutationRoot;
pub use queries::QueryRoot;

pub type SchemaType = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn build_schema(service: CrmService) -> SchemaType {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(service)
        .finish()
}

fn crm<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a CrmService> {
    ctx.data::<CrmService>()
        .map_err(|_| internal_error(anyhow!("missing CRM service")))
}

pub fn api_error(err: CrmError) -> ApiError {
    match err {
        CrmError::Validation(errors) => ApiError::Validation(types::field_issues(&errors)),
        CrmError::NotFound { .. } => ApiError::NotFound(err.to_string()),
        CrmError::Unavailable(message) => ApiError::Unavailable(message),
        CrmError::Busy => ApiError::Conflict(err.to_string()),
        CrmError::InvalidTransition(message) | CrmError::Conflict(message) => {
            ApiError::Conflict(message)
        }
        CrmError::Internal(message) => ApiError::internal(anyhow!(message)),
    }
}

fn gql_error(err: CrmError) -> async_graphql::Error {
    api_error(err).extend()
}
