use async_graphql::{Context, FieldError, Object, Result};
use std::sync::Arc;
use tracing::error;

use app_error::AppError;
use app_models::{BlogProfile, CreateBlogInput};

use crate::service::{ContentService, ContentServiceTrait};

#[derive(Default)]
pub struct BlogMutation;

#[Object]
impl BlogMutation {
    // Create a blog referencing an account identifier; the reference is
    // stored as given, the discriminator argument is verified
    async fn create_blog(
        &self,
        ctx: &Context<'_>,
        input: CreateBlogInput,
    ) -> Result<BlogProfile, FieldError> {
        let content_service = match ctx.data::<Arc<ContentService>>() {
            Ok(service) => service,
            Err(e) => {
                error!("Failed to get content service: {:?}", e);
                return Err(AppError::ServerError(anyhow::anyhow!(
                    "Content service not available"
                ))
                .to_field_error());
            }
        };

        content_service
            .create_blog(input)
            .await
            .map_err(|err| err.to_field_error())
    }

    // Remove a blog and return its last stored state
    async fn delete_blog(
        &self,
        ctx: &Context<'_>,
        id: String,
    ) -> Result<BlogProfile, FieldError> {
        let content_service = match ctx.data::<Arc<ContentService>>() {
            Ok(service) => service,
            Err(e) => {
                error!("Failed to get content service: {:?}", e);
                return Err(AppError::ServerError(anyhow::anyhow!(
                    "Content service not available"
                ))
                .to_field_error());
            }
        };

        content_service
            .delete_blog(&id)
            .await
            .map_err(|err| err.to_field_error())
    }
}
