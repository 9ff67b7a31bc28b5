use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::test;
use tower::ServiceExt;

use crate::{routes::create_routes, schema::create_schema, service::ContentService};
use app_database::{DB_ARC, db_connect::initialize_memory_db};
use tracing::error;

async fn setup_test_app() -> axum::Router {
    let db_arc = DB_ARC
        .get_or_init(|| async {
            initialize_memory_db().await.unwrap_or_else(|e| {
                error!("Database initialization failed: {}", e);
                panic!("Database initialization failed");
            })
        })
        .await;

    let content_service = Arc::new(ContentService::new(db_arc));

    // Create GraphQL schema and configure application routes
    let schema = create_schema();
    create_routes(schema, content_service)
}

// Helper to POST a GraphQL document and parse the response envelope
async fn graphql_request(app: &axum::Router, query: &str, variables: Option<Value>) -> Value {
    let mut request_json = json!({ "query": query });
    if let Some(vars) = variables {
        request_json["variables"] = vars;
    }

    let request = Request::builder()
        .uri("/graphql")
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_string(&request_json).unwrap()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

async fn create_account(app: &axum::Router, firstname: &str, lastname: &str) -> Value {
    let mutation = r#"
        mutation CreateAccount($input: CreateAccountInput!) {
            createAccount(input: $input) {
                id
                firstname
                lastname
                type
            }
        }
    "#;

    let response = graphql_request(
        app,
        mutation,
        Some(json!({
            "input": { "firstname": firstname, "lastname": lastname }
        })),
    )
    .await;

    assert!(
        response["errors"].is_null(),
        "createAccount should not error: {}",
        response
    );
    response["data"]["createAccount"].clone()
}

#[test]
async fn test_health_check() {
    let app = setup_test_app().await;

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[test]
async fn test_graphiql_explorer_is_served() {
    let app = setup_test_app().await;

    let request = Request::builder()
        .uri("/graphiql")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[test]
async fn test_create_account_then_get_returns_equal_fields() {
    let app = setup_test_app().await;

    let created = create_account(&app, "Grace", "Hopper").await;
    let id = created["id"].as_str().unwrap();
    assert!(!id.is_empty(), "Generated identifier should be non-empty");
    assert_eq!(created["firstname"], "Grace");
    assert_eq!(created["lastname"], "Hopper");
    assert_eq!(created["type"], "account");

    let query = r#"
        query GetAccount($id: String!) {
            account(id: $id) {
                id
                firstname
                lastname
                type
            }
        }
    "#;

    let response = graphql_request(&app, query, Some(json!({ "id": id }))).await;
    assert!(response["errors"].is_null(), "{}", response);
    assert_eq!(response["data"]["account"], created);
}

#[test]
async fn test_generated_identifiers_are_unique() {
    let app = setup_test_app().await;

    let first = create_account(&app, "Alan", "Turing").await;
    let second = create_account(&app, "Alan", "Turing").await;
    assert_ne!(first["id"], second["id"]);
}

#[test]
async fn test_accounts_listing_excludes_blogs() {
    let app = setup_test_app().await;

    let a = create_account(&app, "Lise", "Meitner").await;
    let b = create_account(&app, "Emmy", "Noether").await;

    // A blog in the same keyspace must never show up in the accounts list
    let blog_mutation = r#"
        mutation CreateBlog($input: CreateBlogInput!) {
            createBlog(input: $input) {
                id
            }
        }
    "#;
    let blog = graphql_request(
        &app,
        blog_mutation,
        Some(json!({
            "input": {
                "account": a["id"],
                "title": "Fission",
                "content": "Notes",
                "type": "blog"
            }
        })),
    )
    .await;
    assert!(blog["errors"].is_null(), "{}", blog);
    let blog_id = blog["data"]["createBlog"]["id"].as_str().unwrap().to_string();

    let response = graphql_request(&app, "{ accounts { id type } }", None).await;
    assert!(response["errors"].is_null(), "{}", response);

    let accounts = response["data"]["accounts"].as_array().unwrap();
    assert!(accounts.len() >= 2, "Should list at least the two accounts");
    assert!(
        accounts.iter().all(|a| a["type"] == "account"),
        "Listing must only contain account records"
    );

    let ids: Vec<&str> = accounts.iter().filter_map(|a| a["id"].as_str()).collect();
    assert!(ids.contains(&a["id"].as_str().unwrap()));
    assert!(ids.contains(&b["id"].as_str().unwrap()));
    assert!(!ids.contains(&blog_id.as_str()));
}

#[test]
async fn test_update_account_replaces_all_fields() {
    let app = setup_test_app().await;

    let created = create_account(&app, "Margaret", "Hamilton").await;
    let id = created["id"].as_str().unwrap();

    let mutation = r#"
        mutation UpdateAccount($input: UpdateAccountInput!) {
            updateAccount(input: $input) {
                id
                firstname
                lastname
                type
            }
        }
    "#;

    let response = graphql_request(
        &app,
        mutation,
        Some(json!({
            "input": {
                "id": id,
                "firstname": "Peggy",
                "lastname": "Hamilton-Lickly",
                "type": "account"
            }
        })),
    )
    .await;

    assert!(response["errors"].is_null(), "{}", response);
    let updated = &response["data"]["updateAccount"];
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["firstname"], "Peggy");
    assert_eq!(updated["lastname"], "Hamilton-Lickly");
    assert_eq!(updated["type"], "account");

    // A separate fetch must observe the replacement
    let fetched = graphql_request(
        &app,
        "query($id: String!) { account(id: $id) { firstname lastname } }",
        Some(json!({ "id": id })),
    )
    .await;
    assert_eq!(fetched["data"]["account"]["firstname"], "Peggy");
    assert_eq!(fetched["data"]["account"]["lastname"], "Hamilton-Lickly");
}

#[test]
async fn test_update_account_with_partial_input_is_a_validation_error() {
    let app = setup_test_app().await;

    let created = create_account(&app, "Katherine", "Johnson").await;

    // lastname and type are missing: the engine must reject the document
    // before any resolver runs
    let mutation = r#"
        mutation UpdateAccount($input: UpdateAccountInput!) {
            updateAccount(input: $input) {
                id
            }
        }
    "#;

    let response = graphql_request(
        &app,
        mutation,
        Some(json!({
            "input": {
                "id": created["id"],
                "firstname": "Kat"
            }
        })),
    )
    .await;

    assert!(
        response["errors"].is_array(),
        "Partial input must be rejected: {}",
        response
    );
    assert!(response["data"].is_null());
}

#[test]
async fn test_update_account_with_wrong_discriminator_is_rejected() {
    let app = setup_test_app().await;

    let created = create_account(&app, "Dorothy", "Vaughan").await;

    let mutation = r#"
        mutation UpdateAccount($input: UpdateAccountInput!) {
            updateAccount(input: $input) {
                id
            }
        }
    "#;

    let response = graphql_request(
        &app,
        mutation,
        Some(json!({
            "input": {
                "id": created["id"],
                "firstname": "Dorothy",
                "lastname": "Vaughan",
                "type": "blog"
            }
        })),
    )
    .await;

    assert!(response["errors"].is_array(), "{}", response);
    assert_eq!(
        response["errors"][0]["extensions"]["code"],
        "VALIDATION_ERROR"
    );
}

#[test]
async fn test_update_missing_account_reports_not_found() {
    let app = setup_test_app().await;

    let mutation = r#"
        mutation UpdateAccount($input: UpdateAccountInput!) {
            updateAccount(input: $input) {
                id
            }
        }
    "#;

    let response = graphql_request(
        &app,
        mutation,
        Some(json!({
            "input": {
                "id": "00000000-0000-0000-0000-000000000000",
                "firstname": "Nobody",
                "lastname": "Here",
                "type": "account"
            }
        })),
    )
    .await;

    assert!(response["errors"].is_array(), "{}", response);
    assert_eq!(
        response["errors"][0]["extensions"]["code"],
        "NOT_FOUND_ERROR"
    );
}

#[test]
async fn test_delete_account_then_get_reports_not_found() {
    let app = setup_test_app().await;

    let created = create_account(&app, "Radia", "Perlman").await;
    let id = created["id"].as_str().unwrap();

    let mutation = r#"
        mutation DeleteAccount($id: String!) {
            deleteAccount(id: $id) {
                id
                firstname
                lastname
                type
            }
        }
    "#;

    let response = graphql_request(&app, mutation, Some(json!({ "id": id }))).await;
    assert!(response["errors"].is_null(), "{}", response);

    // The mutation returns the pre-delete snapshot
    assert_eq!(response["data"]["deleteAccount"], created);

    // A subsequent fetch must report not-found, never stale data
    let fetched = graphql_request(
        &app,
        "query($id: String!) { account(id: $id) { id } }",
        Some(json!({ "id": id })),
    )
    .await;
    assert!(fetched["errors"].is_array(), "{}", fetched);
    assert_eq!(
        fetched["errors"][0]["extensions"]["code"],
        "NOT_FOUND_ERROR"
    );
}

#[test]
async fn test_delete_missing_account_reports_not_found() {
    let app = setup_test_app().await;

    let response = graphql_request(
        &app,
        "mutation($id: String!) { deleteAccount(id: $id) { id } }",
        Some(json!({ "id": "11111111-1111-1111-1111-111111111111" })),
    )
    .await;

    assert!(response["errors"].is_array(), "{}", response);
    assert_eq!(
        response["errors"][0]["extensions"]["code"],
        "NOT_FOUND_ERROR"
    );
}

#[test]
async fn test_create_blog_with_wrong_discriminator_is_rejected() {
    let app = setup_test_app().await;

    let account = create_account(&app, "Annie", "Easley").await;

    let mutation = r#"
        mutation CreateBlog($input: CreateBlogInput!) {
            createBlog(input: $input) {
                id
            }
        }
    "#;

    let response = graphql_request(
        &app,
        mutation,
        Some(json!({
            "input": {
                "account": account["id"],
                "title": "Rockets",
                "content": "Centaur notes",
                "type": "account"
            }
        })),
    )
    .await;

    assert!(response["errors"].is_array(), "{}", response);
    assert_eq!(
        response["errors"][0]["extensions"]["code"],
        "VALIDATION_ERROR"
    );
}

#[test]
async fn test_invalid_query_document_reports_errors() {
    let app = setup_test_app().await;

    let response = graphql_request(&app, "query { this is not valid GraphQL", None).await;
    assert!(response["errors"].is_array(), "{}", response);
    assert!(response["data"].is_null());
}

#[test]
async fn test_get_request_with_query_string_executes() {
    let app = setup_test_app().await;

    let _ = create_account(&app, "Hedy", "Lamarr").await;

    // "{ accounts { id type } }" percent-encoded into the query string
    let request = Request::builder()
        .uri("/graphql?query=%7B%20accounts%20%7B%20id%20type%20%7D%20%7D")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    let json_response: Value = serde_json::from_slice(&body).unwrap();

    assert!(json_response["errors"].is_null(), "{}", json_response);
    assert!(json_response["data"]["accounts"].is_array());
}

#[test]
async fn test_end_to_end_account_and_blog_lifecycle() {
    let app = setup_test_app().await;

    // Create account {firstname: "Ada", lastname: "Lovelace"}
    let account = create_account(&app, "Ada", "Lovelace").await;
    let account_id = account["id"].as_str().unwrap();
    assert!(!account_id.is_empty());

    // Create blog {account: <that id>, title: "Hello", content: "World"}
    let create_blog = r#"
        mutation CreateBlog($input: CreateBlogInput!) {
            createBlog(input: $input) {
                id
                account
                title
                content
                type
            }
        }
    "#;

    let response = graphql_request(
        &app,
        create_blog,
        Some(json!({
            "input": {
                "account": account_id,
                "title": "Hello",
                "content": "World",
                "type": "blog"
            }
        })),
    )
    .await;
    assert!(response["errors"].is_null(), "{}", response);

    let blog = response["data"]["createBlog"].clone();
    let blog_id = blog["id"].as_str().unwrap();
    assert!(!blog_id.is_empty());
    assert_eq!(blog["account"], account_id);
    assert_eq!(blog["type"], "blog");

    // Listing blogs for that account returns exactly the created entry
    let list_query = r#"
        query Blogs($account: String!) {
            blogs(account: $account) {
                id
                account
                title
                content
                type
            }
        }
    "#;

    let listed = graphql_request(&app, list_query, Some(json!({ "account": account_id }))).await;
    assert!(listed["errors"].is_null(), "{}", listed);
    let blogs = listed["data"]["blogs"].as_array().unwrap();
    assert_eq!(blogs.len(), 1, "Exactly one blog for this account");
    assert_eq!(blogs[0], blog);

    // Delete the blog; the listing must then be empty
    let deleted = graphql_request(
        &app,
        "mutation($id: String!) { deleteBlog(id: $id) { id title } }",
        Some(json!({ "id": blog_id })),
    )
    .await;
    assert!(deleted["errors"].is_null(), "{}", deleted);
    assert_eq!(deleted["data"]["deleteBlog"]["id"], blog_id);

    let listed = graphql_request(&app, list_query, Some(json!({ "account": account_id }))).await;
    assert!(listed["errors"].is_null(), "{}", listed);
    assert_eq!(listed["data"]["blogs"].as_array().unwrap().len(), 0);
}
