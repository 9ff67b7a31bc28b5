use async_graphql::{InputObject, SimpleObject};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;
use uuid::Uuid;

use crate::RECORDS_TABLE;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Blog {
    #[serde(default = "Blog::generate_id")]
    pub id: Thing,
    // Reference to the owning account's identifier. Stored as given;
    // existence of the account is not checked.
    pub account: String,
    pub title: String,
    pub content: String,
    #[serde(rename = "type")]
    pub record_type: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Blog {
    pub const RECORD_TYPE: &'static str = "blog";

    fn generate_id() -> Thing {
        Thing::from((RECORDS_TABLE.to_string(), Uuid::new_v4().to_string()))
    }

    pub fn new(account: String, title: String, content: String) -> Self {
        let now = Utc::now();
        Self {
            id: Self::generate_id(),
            account,
            title,
            content,
            record_type: Self::RECORD_TYPE.to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// The externally visible shape of a blog record.
#[derive(Debug, SimpleObject, Serialize, Deserialize)]
#[graphql(name = "Blog")]
pub struct BlogProfile {
    pub id: String,
    pub account: String,
    pub title: String,
    pub content: String,
    #[graphql(name = "type")]
    pub record_type: String,
}

impl From<Blog> for BlogProfile {
    fn from(blog: Blog) -> Self {
        Self {
            id: blog.id.id.to_raw(),
            account: blog.account,
            title: blog.title,
            content: blog.content,
            record_type: blog.record_type,
        }
    }
}

#[derive(InputObject, Debug, Deserialize)]
pub struct CreateBlogInput {
    pub account: String,
    pub title: String,
    pub content: String,
    // Kept for surface compatibility; the server verifies it equals "blog"
    // instead of storing it unchecked.
    #[graphql(name = "type")]
    pub record_type: String,
}
