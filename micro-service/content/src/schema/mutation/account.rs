use async_graphql::{Context, FieldError, Object, Result};
use std::sync::Arc;
use tracing::error;

use app_error::AppError;
use app_models::{AccountProfile, CreateAccountInput, UpdateAccountInput};

use crate::service::{ContentService, ContentServiceTrait};

#[derive(Default)]
pub struct AccountMutation;

#[Object]
impl AccountMutation {
    // Create an account; the identifier and discriminator are generated
    // server-side
    async fn create_account(
        &self,
        ctx: &Context<'_>,
        input: CreateAccountInput,
    ) -> Result<AccountProfile, FieldError> {
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
            .create_account(input)
            .await
            .map_err(|err| err.to_field_error())
    }

    // Full overwrite of an existing account; the record must exist and
    // every field must be supplied
    async fn update_account(
        &self,
        ctx: &Context<'_>,
        input: UpdateAccountInput,
    ) -> Result<AccountProfile, FieldError> {
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
            .update_account(input)
            .await
            .map_err(|err| err.to_field_error())
    }

    // Remove an account and return its last stored state
    async fn delete_account(
        &self,
        ctx: &Context<'_>,
        id: String,
    ) -> Result<AccountProfile, FieldError> {
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
            .delete_account(&id)
            .await
            .map_err(|err| err.to_field_error())
    }
}
