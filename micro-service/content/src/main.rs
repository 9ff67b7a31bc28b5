use anyhow::Context;
use micro_content::routes;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{Level, info};
use tracing_subscriber::{FmtSubscriber, layer::SubscriberExt};

use app_config::{AppConfig, Server};
use app_database::{DB_ARC, db_connect::initialize_content_db};
use app_error::AppError;
use micro_content::schema::create_schema;
use micro_content::service::ContentService;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Load configuration first; an invalid configuration must not serve
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Initialize sentry from the monitoring section (an empty DSN disables
    // the transport in development)
    let sentry_config = &config.monitoring.sentry;
    let _guard = sentry::init((
        sentry_config.dsn.clone(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: Some(sentry_config.environment.clone().into()),
            sample_rate: sentry_config.sample_rate,
            traces_sample_rate: sentry_config.traces_sample_rate,
            ..Default::default()
        },
    ));

    // Initialize the logger
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    let subscriber = subscriber.with(sentry_tracing::layer());
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");

    info!("Starting application at {}", chrono::Utc::now());

    // Initialize the database connection. Any connection or authentication
    // failure aborts startup before the listener binds.
    let db_arc = DB_ARC
        .get_or_try_init(|| async { initialize_content_db().await })
        .await?;

    let content_service = Arc::new(ContentService::new(db_arc));

    // Create GraphQL schema
    let schema = create_schema();

    // Configure application routes
    let app = routes::create_routes(schema, content_service);

    // Bind server to address and start it
    let server = Server::from(&config);
    let address = format!("{}:{}", server.address, server.port);
    let listener = TcpListener::bind(&address)
        .await
        .context(format!("Failed to bind to address: {}", address))?;

    info!("GraphiQL explorer available at: http://{}/graphiql", address);

    // Start server with graceful error handling
    info!("Server starting");
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
