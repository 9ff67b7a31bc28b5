use async_graphql::{InputObject, SimpleObject};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;
use uuid::Uuid;

use crate::RECORDS_TABLE;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Account {
    #[serde(default = "Account::generate_id")]
    pub id: Thing,
    pub firstname: String,
    pub lastname: String,
    // Discriminator: always "account" for this record type. Stamped by the
    // server, never taken from the caller.
    #[serde(rename = "type")]
    pub record_type: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Account {
    pub const RECORD_TYPE: &'static str = "account";

    // Helper to generate a new ID
    fn generate_id() -> Thing {
        Thing::from((RECORDS_TABLE.to_string(), Uuid::new_v4().to_string()))
    }

    pub fn new(firstname: String, lastname: String) -> Self {
        let now = Utc::now();
        Self {
            id: Self::generate_id(),
            firstname,
            lastname,
            record_type: Self::RECORD_TYPE.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Full replacement at an existing identifier. The identifier is kept,
    /// the creation timestamp comes from the record being replaced.
    pub fn replacement(existing: &Account, firstname: String, lastname: String) -> Self {
        Self {
            id: existing.id.clone(),
            firstname,
            lastname,
            record_type: Self::RECORD_TYPE.to_string(),
            created_at: existing.created_at,
            updated_at: Utc::now(),
        }
    }
}

/// The externally visible shape of an account record.
#[derive(Debug, SimpleObject, Serialize, Deserialize)]
#[graphql(name = "Account")]
pub struct AccountProfile {
    pub id: String,
    pub firstname: String,
    pub lastname: String,
    #[graphql(name = "type")]
    pub record_type: String,
}

// Convert Account to AccountProfile (hiding storage-only fields).
// to_raw keeps generated identifiers free of record-id escaping.
impl From<Account> for AccountProfile {
    fn from(account: Account) -> Self {
        Self {
            id: account.id.id.to_raw(),
            firstname: account.firstname,
            lastname: account.lastname,
            record_type: account.record_type,
        }
    }
}

#[derive(InputObject, Debug, Deserialize)]
pub struct CreateAccountInput {
    pub firstname: String,
    pub lastname: String,
}

#[derive(InputObject, Debug, Deserialize)]
pub struct UpdateAccountInput {
    pub id: String,
    pub firstname: String,
    pub lastname: String,
    // Kept for surface compatibility; the server verifies it equals
    // "account" instead of storing it unchecked.
    #[graphql(name = "type")]
    pub record_type: String,
}
