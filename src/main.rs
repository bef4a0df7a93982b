use actix_cors::Cors;
use actix_web::{error, middleware, web, App, HttpRequest, HttpServer};
use kindred_match::config::Settings;
use kindred_match::core::Matcher;
use kindred_match::models::ErrorResponse;
use kindred_match::routes::{self, matches::DEFAULT_MAX_BATCH_SIZE, AppState};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Malformed bodies, including profile records that fail to deserialize, answer 400
fn json_error_handler(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    info!("JSON payload error on {}: {}", req.path(), err);
    ErrorResponse::new(400, "invalid_json", format!("Invalid JSON: {}", err)).into()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Configuration is read first so its logging section can seed the subscriber
    let settings = Settings::load();

    // Initialize logging; LOG_LEVEL / LOG_FORMAT override the config file
    let logging = settings
        .as_ref()
        .map(|s| s.logging.clone())
        .unwrap_or_default();
    let log_level = std::env::var("LOG_LEVEL").unwrap_or(logging.level);
    let log_format = std::env::var("LOG_FORMAT").unwrap_or(logging.format);

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }

    info!("Starting Kindred Match scoring service...");

    let settings = settings.map_err(|e| {
        error!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    info!("Configuration loaded successfully");

    let scoring = settings.scoring.scoring_config().map_err(|e| {
        error!("Invalid scoring configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;
    let policy = settings.matching.filter_policy();

    info!(
        "Matcher initialized with weights: {:?}, policy: {:?}",
        scoring.weights(),
        policy
    );

    let app_state = AppState {
        matcher: Matcher::new(policy, scoring),
        max_batch_size: settings
            .matching
            .max_batch_size
            .unwrap_or(DEFAULT_MAX_BATCH_SIZE),
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
