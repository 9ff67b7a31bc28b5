use async_graphql::{Context, FieldError, Object, Result};
use std::sync::Arc;

use app_error::AppError;
use app_models::BlogProfile;

use crate::service::{ContentService, ContentServiceTrait};

#[derive(Default)]
pub struct BlogQuery;

#[Object]
impl BlogQuery {
    // Blog records referencing the given account identifier
    async fn blogs(
        &self,
        ctx: &Context<'_>,
        account: String,
    ) -> Result<Vec<BlogProfile>, FieldError> {
        let content_service = ctx.data::<Arc<ContentService>>().map_err(|_| {
            AppError::ServerError(anyhow::anyhow!(
                "Internal configuration error: Content service not available"
            ))
            .to_field_error()
        })?;

        content_service
            .list_blogs(&account)
            .await
            .map_err(|err| err.to_field_error())
    }
}
