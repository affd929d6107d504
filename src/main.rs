use tracing::{error, info};

use folio::{ensure_default_admin, Config, CredentialNotifier, Database, WebServer};

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::load_with_env("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            eprintln!("Using default configuration.");
            let mut config = Config::default();
            config.apply_env_overrides();
            config
        }
    };

    // Initialize logging
    if let Err(e) = folio::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        folio::logging::init_console_only(&config.logging.level);
    }

    info!("Folio - personal portfolio backend");

    // Secrets are checked once at startup, never per-request
    if let Err(e) = config.validate() {
        error!("Invalid configuration: {e}");
        std::process::exit(1);
    }

    let db = match Database::open(&config.database.path).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to open database {}: {e}", config.database.path);
            std::process::exit(1);
        }
    };

    if let Err(e) = ensure_default_admin(&db, &config.auth).await {
        error!("Failed to ensure admin account: {e}");
        std::process::exit(1);
    }

    let notifier = match CredentialNotifier::from_config(&config.smtp) {
        Ok(notifier) => notifier,
        Err(e) => {
            error!("Failed to configure SMTP transport: {e}");
            std::process::exit(1);
        }
    };

    info!(
        "Server configured on {}:{}",
        config.server.host, config.server.port
    );

    let server = WebServer::from_database(&config.server, &config.auth, db, notifier);
    if let Err(e) = server.run().await {
        error!("Web server error: {e}");
        std::process::exit(1);
    }
}
