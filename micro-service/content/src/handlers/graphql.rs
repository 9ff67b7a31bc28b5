use app_error::AppResult;
use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::Extension,
    response::{Html, IntoResponse},
};
use std::sync::Arc;

use crate::service::ContentService;

// Handler for GraphQL requests. The extractor accepts both POST bodies and
// GET query-string documents, so /graphql?query=... executes directly.
pub async fn graphql_handler(
    schema: Extension<crate::schema::ApiSchema>,
    content_service: Extension<Arc<ContentService>>,
    req: GraphQLRequest,
) -> AppResult<GraphQLResponse> {
    // Create a new request builder for modifying the GraphQL request
    let mut req_builder = req.into_inner();

    // Add the content service to the request context
    req_builder = req_builder.data(Arc::clone(&content_service));

    // Execute the GraphQL request
    let response = schema.execute(req_builder).await;

    Ok(response.into())
}

// Handler for the interactive query explorer UI
pub async fn graphql_playground() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}

// Simple health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (
        axum::http::StatusCode::OK,
        Html(
            "<html>
                <head>
                    <title>Content Service Health Check</title>
                    <style>
                        body {
                            font-family: Arial, sans-serif;
                            background-color: #f4f4f9;
                            color: #333;
                            text-align: center;
                            padding: 50px;
                        }
                        h1 {
                            color: green;
                        }
                        p {
                            font-size: 18px;
                        }
                    </style>
                </head>
                <body>
                    <h1>Content Service Health Check</h1>
                    <p>Status: <strong>OK</strong></p>
                    <p>The content service is up and running smoothly.</p>
                </body>
            </html>",
        ),
    )
}
