use async_graphql::{Context, FieldError, Object, Result};
use std::sync::Arc;

use app_error::AppError;
use app_models::AccountProfile;

use crate::service::{ContentService, ContentServiceTrait};

#[derive(Default)]
pub struct AccountQuery;

#[Object]
impl AccountQuery {
    // Every account record in the store, in the store's natural order
    async fn accounts(&self, ctx: &Context<'_>) -> Result<Vec<AccountProfile>, FieldError> {
        let content_service = ctx.data::<Arc<ContentService>>().map_err(|_| {
            AppError::ServerError(anyhow::anyhow!(
                "Internal configuration error: Content service not available"
            ))
            .to_field_error()
        })?;

        content_service
            .list_accounts()
            .await
            .map_err(|err| err.to_field_error())
    }

    // Point lookup of one account by its identifier
    async fn account(
        &self,
        ctx: &Context<'_>,
        id: String,
    ) -> Result<AccountProfile, FieldError> {
        let content_service = ctx.data::<Arc<ContentService>>().map_err(|_| {
            AppError::ServerError(anyhow::anyhow!(
                "Internal configuration error: Content service not available"
            ))
            .to_field_error()
        })?;

        content_service
            .get_account(&id)
            .await
            .map_err(|err| err.to_field_error())
    }
}
