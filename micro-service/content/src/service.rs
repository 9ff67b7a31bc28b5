use app_database::{Database, service::DbService};
use app_error::{AppError, AppResult};
use app_middleware::validation;
use app_models::{
    Account, AccountProfile, Blog, BlogProfile, CreateAccountInput, CreateBlogInput,
    RECORDS_TABLE, UpdateAccountInput,
};
use async_trait::async_trait;
use tracing::info;

/// Trait defining the content service interface
#[async_trait]
pub trait ContentServiceTrait: Send + Sync {
    /// List every account record in the store
    async fn list_accounts(&self) -> AppResult<Vec<AccountProfile>>;

    /// Fetch a single account by its identifier
    async fn get_account(&self, id: &str) -> AppResult<AccountProfile>;

    /// List the blog records referencing an account identifier
    async fn list_blogs(&self, account: &str) -> AppResult<Vec<BlogProfile>>;

    /// Create an account with a freshly generated identifier
    async fn create_account(&self, input: CreateAccountInput) -> AppResult<AccountProfile>;

    /// Replace every field of an existing account
    async fn update_account(&self, input: UpdateAccountInput) -> AppResult<AccountProfile>;

    /// Remove an account, returning the pre-delete snapshot
    async fn delete_account(&self, id: &str) -> AppResult<AccountProfile>;

    /// Create a blog with a freshly generated identifier
    async fn create_blog(&self, input: CreateBlogInput) -> AppResult<BlogProfile>;

    /// Remove a blog, returning the pre-delete snapshot
    async fn delete_blog(&self, id: &str) -> AppResult<BlogProfile>;
}

/// Resolver backend: one store round trip per operation, all records in the
/// shared keyspace table, filtered by the discriminator field.
pub struct ContentService {
    accounts: DbService<'static, Account>,
    blogs: DbService<'static, Blog>,
}

impl ContentService {
    pub fn new(db: &'static Database) -> Self {
        Self {
            accounts: DbService::new(db, RECORDS_TABLE),
            blogs: DbService::new(db, RECORDS_TABLE),
        }
    }
}

#[async_trait]
impl ContentServiceTrait for ContentService {
    async fn list_accounts(&self) -> AppResult<Vec<AccountProfile>> {
        let records = self
            .accounts
            .get_records_by_field("type", Account::RECORD_TYPE)
            .await?;

        Ok(records.into_iter().map(AccountProfile::from).collect())
    }

    async fn get_account(&self, id: &str) -> AppResult<AccountProfile> {
        validation::validate_identifier(id)?;

        let account = self
            .accounts
            .get_record_by_id(id)
            .await?
            .ok_or_else(|| AppError::resource_not_found("Account", id))?;

        Ok(account.into())
    }

    async fn list_blogs(&self, account: &str) -> AppResult<Vec<BlogProfile>> {
        validation::validate_identifier(account)?;

        let bindings = vec![
            (
                "record_type".to_string(),
                serde_json::json!(Blog::RECORD_TYPE),
            ),
            ("account".to_string(), serde_json::json!(account)),
        ];

        let records = self
            .blogs
            .run_custom_query(
                "SELECT * FROM records WHERE type = $record_type AND account = $account",
                bindings,
            )
            .await?;

        Ok(records.into_iter().map(BlogProfile::from).collect())
    }

    async fn create_account(&self, input: CreateAccountInput) -> AppResult<AccountProfile> {
        let firstname = validation::sanitize_string(&input.firstname);
        let lastname = validation::sanitize_string(&input.lastname);

        validation::validate_name("firstname", &firstname)?;
        validation::validate_name("lastname", &lastname)?;

        let account = Account::new(firstname, lastname);

        let created = self
            .accounts
            .create_record(account)
            .await?
            .ok_or_else(|| AppError::database_operation_failed("create", "Account"))?;

        info!(id = %created.id.id, "Account created");

        Ok(created.into())
    }

    async fn update_account(&self, input: UpdateAccountInput) -> AppResult<AccountProfile> {
        validation::validate_identifier(&input.id)?;
        validation::validate_record_type(&input.record_type, Account::RECORD_TYPE)?;

        let firstname = validation::sanitize_string(&input.firstname);
        let lastname = validation::sanitize_string(&input.lastname);

        validation::validate_name("firstname", &firstname)?;
        validation::validate_name("lastname", &lastname)?;

        // The record must exist before it can be replaced; a missing
        // identifier is the caller's error, not a silent upsert.
        let existing = self
            .accounts
            .get_record_by_id(&input.id)
            .await?
            .ok_or_else(|| AppError::resource_not_found("Account", &input.id))?;

        let replacement = Account::replacement(&existing, firstname, lastname);

        let updated = self
            .accounts
            .update_record(&input.id, replacement)
            .await?
            .ok_or_else(|| AppError::database_operation_failed("update", "Account"))?;

        info!(id = %updated.id.id, "Account updated");

        Ok(updated.into())
    }

    async fn delete_account(&self, id: &str) -> AppResult<AccountProfile> {
        validation::validate_identifier(id)?;

        // The store's remove returns the removed content: one round trip
        // both confirms the delete and supplies the snapshot.
        let deleted = self
            .accounts
            .delete_record(id)
            .await?
            .ok_or_else(|| AppError::resource_not_found("Account", id))?;

        info!(id = %deleted.id.id, "Account deleted");

        Ok(deleted.into())
    }

    async fn create_blog(&self, input: CreateBlogInput) -> AppResult<BlogProfile> {
        validation::validate_record_type(&input.record_type, Blog::RECORD_TYPE)?;
        validation::validate_identifier(&input.account)?;

        let title = validation::sanitize_string(&input.title);
        validation::validate_title(&title)?;
        validation::validate_content(&input.content)?;

        // The account reference is stored as given; whether it names a live
        // account is not checked.
        let blog = Blog::new(input.account, title, input.content);

        let created = self
            .blogs
            .create_record(blog)
            .await?
            .ok_or_else(|| AppError::database_operation_failed("create", "Blog"))?;

        info!(id = %created.id.id, account = %created.account, "Blog created");

        Ok(created.into())
    }

    async fn delete_blog(&self, id: &str) -> AppResult<BlogProfile> {
        validation::validate_identifier(id)?;

        let deleted = self
            .blogs
            .delete_record(id)
            .await?
            .ok_or_else(|| AppError::resource_not_found("Blog", id))?;

        info!(id = %deleted.id.id, "Blog deleted");

        Ok(deleted.into())
    }
}
