use crate::{ConnectionPool, Database, PooledConnection};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::{marker::PhantomData, sync::Mutex, time::Duration};
use surrealdb::{engine::any::Any, opt::auth::Root};
use tokio::time::timeout;

use app_error::{AppError, AppErrorExt, AppResult};

impl ConnectionPool {
    pub fn new(connection_url: &str, max_size: usize) -> Self {
        Self {
            connection_url: connection_url.to_string(),
            connections: Mutex::new(Vec::with_capacity(max_size)).into(),
            max_size,
        }
    }

    /// Get a connection from the pool or create a new one if needed
    ///
    /// This implementation:
    /// - Uses a single lock operation
    /// - Validates connections before returning them
    /// - Implements proper timeout handling
    /// - Provides detailed error messages for different failure scenarios
    pub async fn get_connection(&self) -> AppResult<PooledConnection> {
        // Try to get an existing connection from the pool with a single lock operation
        let conn_opt: Option<surrealdb::Surreal<Any>> = {
            let mut connections = self.connections.lock().map_err(|e| {
                AppError::ServerError(anyhow::anyhow!(
                    "Failed to lock connection pool mutex: {}",
                    e
                ))
            })?;
            connections.pop()
        };

        // If we got a connection, verify it's still alive
        if let Some(conn) = conn_opt {
            // Verify connection with timeout
            match timeout(Duration::from_secs(2), conn.health()).await {
                Ok(Ok(_)) => {
                    // Connection is valid
                    return Ok(PooledConnection {
                        conn: Some(conn),
                        pool: self,
                    });
                }
                _ => {
                    // Connection is not valid, we'll create a new one
                    tracing::debug!("Discarding invalid connection from pool");
                    // Not returning to pool - let it drop
                }
            }
        }

        // Set 5 second timeout for connection attempts
        let conn_future = surrealdb::engine::any::connect(&self.connection_url);
        match timeout(Duration::from_secs(5), conn_future).await {
            Ok(conn_result) => {
                let new_conn = conn_result
                    .context("Failed to connect to database")
                    .db_err()?;

                Ok(PooledConnection {
                    conn: Some(new_conn),
                    pool: self,
                })
            }
            Err(_) => Err(AppError::DatabaseError(anyhow::anyhow!(
                "Database connection timeout - could not establish connection within 5 seconds"
            ))),
        }
    }

    pub fn return_connection(&self, conn: surrealdb::Surreal<Any>) {
        if let Ok(mut connections) = self.connections.lock() {
            if connections.len() < self.max_size {
                connections.push(conn);
                return;
            }
        }
        // If we can't lock the mutex or the pool is full, the connection will be dropped
    }
}

#[derive(Clone)]
pub struct DbCredentials {
    username: String,
    password: String,
}

impl DbCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn get_username(&self) -> &str {
        &self.username
    }

    pub fn get_password(&self) -> &str {
        &self.password
    }
}

// Don't accidentally log credentials
impl std::fmt::Debug for DbCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbCredentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl Database {
    pub fn new(connection_url: &str, max_connections: usize) -> Self {
        // Validate connection URL format
        if !connection_url.starts_with("ws://")
            && !connection_url.starts_with("wss://")
            && !connection_url.starts_with("memory")
        {
            tracing::warn!(
                "Potentially invalid database connection URL format: {}",
                connection_url
            );
        }

        let pool = ConnectionPool::new(connection_url, max_connections);
        Self { pool }
    }

    pub async fn get_connection(&self) -> AppResult<PooledConnection> {
        self.pool.get_connection().await
    }

    pub async fn initialize(
        connection_url: &str,
        max_connections: usize,
        namespace: &str,
        database: &str,
        credentials: &DbCredentials,
    ) -> AppResult<Self> {
        // Validate inputs
        if namespace.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Database namespace cannot be empty".into(),
            ));
        }

        if database.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Database name cannot be empty".into(),
            ));
        }

        let db = Self::new(connection_url, max_connections);

        {
            let conn = db.get_connection().await?;

            // Sign in with secure credentials
            conn.get_ref()
                .signin(Root {
                    username: credentials.get_username(),
                    password: credentials.get_password(),
                })
                .await
                .context("Failed to authenticate with database")
                .db_err()?;

            conn.get_ref()
                .use_ns(namespace)
                .use_db(database)
                .await
                .context("Failed to select namespace and database")
                .db_err()?;
        }

        Ok(db)
    }

    pub async fn initialize_memory_db(
        max_connections: usize,
        namespace: &str,
        database: &str,
    ) -> AppResult<Self> {
        let db = Self::new("memory", max_connections);

        {
            let conn = db.get_connection().await?;

            conn.get_ref()
                .use_ns(namespace)
                .use_db(database)
                .await
                .context("Failed to select namespace and database")
                .db_err()?;
        }

        Ok(db)
    }

    pub fn create<T>(&self, table: &str) -> CreateBuilder<'_, T> {
        CreateBuilder {
            pool: &self.pool,
            table: table.to_string(),
            _phantom: PhantomData,
        }
    }

    pub fn update<T>(&self, location: (&str, &str)) -> UpdateBuilder<'_, T> {
        UpdateBuilder {
            pool: &self.pool,
            table: location.0.to_string(),
            id: location.1.to_string(),
            _phantom: PhantomData,
        }
    }

    pub async fn delete<T>(&self, location: (&str, &str)) -> AppResult<Option<T>>
    where
        T: for<'de> Deserialize<'de>,
    {
        let conn = self.get_connection().await?;
        conn.get_ref()
            .delete((location.0, location.1))
            .await
            .context("Failed to delete record")
            .db_err()
    }

    pub async fn select<T>(&self, location: (&str, &str)) -> AppResult<Option<T>>
    where
        T: for<'de> Deserialize<'de>,
    {
        let conn = self.get_connection().await?;
        conn.get_ref()
            .select((location.0, location.1))
            .await
            .context("Failed to select record")
            .db_err()
    }

    pub fn query(&self, sql: impl Into<String>) -> QueryBuilder<'_> {
        QueryBuilder {
            pool: &self.pool,
            sql: sql.into(),
            bindings: Vec::new(),
        }
    }
}

// Builders running against the pool
pub struct CreateBuilder<'a, T> {
    pool: &'a ConnectionPool,
    table: String,
    _phantom: PhantomData<T>,
}

impl<'a, T> CreateBuilder<'a, T>
where
    T: Serialize + Send + Sync + 'static,
{
    pub async fn content(self, data: T) -> AppResult<Option<T>>
    where
        T: for<'de> Deserialize<'de>,
    {
        let conn = self.pool.get_connection().await?;
        conn.get_ref()
            .create(&self.table)
            .content(data)
            .await
            .context("Failed to create record")
            .db_err()
    }
}

pub struct UpdateBuilder<'a, T> {
    pool: &'a ConnectionPool,
    table: String,
    id: String,
    _phantom: PhantomData<T>,
}

impl<'a, T> UpdateBuilder<'a, T>
where
    T: Serialize + Send + Sync + 'static,
{
    pub async fn content(self, data: T) -> AppResult<Option<T>>
    where
        T: for<'de> Deserialize<'de>,
    {
        let conn = self.pool.get_connection().await?;
        conn.get_ref()
            .update((&self.table, &self.id))
            .content(data)
            .await
            .context("Failed to update record")
            .db_err()
    }
}

pub struct QueryBuilder<'a> {
    pool: &'a ConnectionPool,
    sql: String,
    bindings: Vec<(String, serde_json::Value)>,
}

impl<'a> QueryBuilder<'a> {
    pub fn bind(mut self, binding: (impl Into<String>, impl Into<serde_json::Value>)) -> Self {
        self.bindings.push((binding.0.into(), binding.1.into()));
        self
    }

    pub async fn r#await(self) -> AppResult<QueryResponse> {
        let conn = self.pool.get_connection().await?;
        let mut query = conn.get_ref().query(&self.sql);

        for (name, value) in self.bindings {
            query = query.bind((name, value));
        }

        let response = query.await.context("Failed to execute query").db_err()?;
        Ok(QueryResponse(response))
    }
}

pub struct QueryResponse(surrealdb::Response);

impl QueryResponse {
    pub async fn take<T>(mut self, index: usize) -> AppResult<Vec<T>>
    where
        T: for<'de> Deserialize<'de>,
    {
        self.0
            .take(index)
            .map_err(|e| anyhow::anyhow!("Failed to extract query results: {}", e))
            .context("Failed to extract query results")
            .db_err()
    }
}

// Typed facade over one table of the store
pub struct DbService<'a, T> {
    db: &'a Database,
    table_name: String,
    _phantom: PhantomData<T>,
}

impl<'a, T> DbService<'a, T>
where
    T: Clone + Serialize + for<'de> Deserialize<'de> + Send + Sync + 'static,
{
    pub fn new(db: &'a Database, table_name: impl Into<String>) -> Self {
        Self {
            db,
            table_name: table_name.into(),
            _phantom: PhantomData,
        }
    }

    // Generic DB operation wrapper with consistent error handling and logging
    async fn execute_db_operation<F, R>(&self, operation: &str, execute: F) -> AppResult<R>
    where
        F: Future<Output = AppResult<R>>,
    {
        execute.await.map_err(|e| {
            if let AppError::DatabaseError(err) = e {
                AppError::DatabaseError(anyhow::anyhow!(
                    "Failed to {} {} record: {}",
                    operation,
                    self.table_name,
                    err
                ))
            } else {
                e
            }
        })
    }

    // Create a new record
    pub async fn create_record(&self, item: T) -> AppResult<Option<T>> {
        self.execute_db_operation("create", async {
            self.db.create(&self.table_name).content(item).await
        })
        .await
    }

    // Replace a record in full
    pub async fn update_record(&self, record_id: &str, updated_data: T) -> AppResult<Option<T>> {
        self.execute_db_operation("update", async {
            self.db
                .update((&self.table_name, record_id))
                .content(updated_data)
                .await
        })
        .await
    }

    // Delete a record, returning the removed content if it existed
    pub async fn delete_record(&self, record_id: &str) -> AppResult<Option<T>> {
        self.execute_db_operation("delete", async {
            self.db.delete((&self.table_name, record_id)).await
        })
        .await
    }

    // Get a record by its ID
    pub async fn get_record_by_id(&self, record_id: &str) -> AppResult<Option<T>> {
        self.execute_db_operation("fetch", async {
            self.db.select((&self.table_name, record_id)).await
        })
        .await
    }

    // Validate identifier for SQL injection prevention
    fn validate_identifier(&self, identifier: &str) -> AppResult<()> {
        // This is a simple validation - using a regex for SurrealDB's identifier rules
        let valid_pattern = regex::Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*$").unwrap();

        if !valid_pattern.is_match(identifier) {
            return Err(AppError::ValidationError(format!(
                "Invalid identifier '{}': must start with a letter or underscore and contain only alphanumeric characters and underscores",
                identifier
            )));
        }

        Ok(())
    }

    // Get records by a field and value
    pub async fn get_records_by_field<V>(&self, field: &str, value: V) -> AppResult<Vec<T>>
    where
        V: Serialize + Send + Sync + 'static,
    {
        // Validate field name and table name
        self.validate_identifier(field)?;
        self.validate_identifier(&self.table_name)?;

        let sql = format!("SELECT * FROM {} WHERE {} = $value", self.table_name, field);

        let value_json = serde_json::to_value(value).map_err(|e| {
            AppError::ValidationError(format!(
                "Failed to serialize value for field '{}': {}",
                field, e
            ))
        })?;

        self.execute_db_operation("query", async {
            let response = self
                .db
                .query(&sql)
                .bind(("value", value_json))
                .r#await()
                .await?;

            response.take(0).await
        })
        .await
    }

    // Parameterized custom query execution
    pub async fn run_custom_query(
        &self,
        sql: &str,
        bindings: Vec<(String, serde_json::Value)>,
    ) -> AppResult<Vec<T>> {
        // Log the query for security auditing (without parameter values)
        tracing::debug!("Executing custom query on {}: {}", self.table_name, sql);

        // SQL injection check: only parameterized queries are allowed through
        if sql.contains("${")
            || sql.contains("'+")
            || sql.contains("--")
            || sql.contains(";")
            || sql.contains("/*")
        {
            return Err(AppError::ValidationError(
                "Custom SQL queries must use parameterized queries ($param) for security".into(),
            ));
        }

        self.execute_db_operation("custom query", async {
            let mut query = self.db.query(sql);

            for (name, value) in bindings {
                // Validate parameter names
                if !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
                    return Err(AppError::ValidationError(format!(
                        "Invalid parameter name '{}': must contain only alphanumeric characters and underscores",
                        name
                    )));
                }

                query = query.bind((name, value));
            }

            let response = query.r#await().await?;
            response.take(0).await
        })
        .await
    }
}
