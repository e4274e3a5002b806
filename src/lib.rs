pub mod config;
pub mod handlers;
pub mod middleware;
pub mod server;
pub mod session;
pub mod tmdb;
pub mod view;

use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("TMDB client error: {0}")]
    Client(#[from] tmdb::ApiError),
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),
    #[error("Server error: {0}")]
    Server(String),
}

pub async fn run(config_path: &str, debug_logs: bool) -> Result<(), ServerError> {
    let config = config::Config::from_file(config_path)?;

    info!("Using config file: {}", config_path);
    if debug_logs {
        info!("Debug logging enabled");
    }

    // Read once; the credential is never refreshed for the lifetime of the process.
    let token = config.tmdb.resolve_token()?;
    let api = Arc::new(tmdb::TmdbClient::from_config(&config.tmdb, &token)?);
    info!("Using TMDB API at {}", config.tmdb.api_base);

    let renderer = view::Renderer::new(tmdb::ImageHost::from_config(&config.tmdb))?;

    let address = config.listen.address.as_deref().unwrap_or("[::]");
    let port = &config.listen.port;
    let addr: SocketAddr = format!("{}:{}", address, port)
        .parse()
        .map_err(|e| ServerError::Server(format!("Invalid address: {}", e)))?;

    let tls = match (&config.listen.tlscert, &config.listen.tlskey) {
        (Some(cert), Some(key)) => Some((cert, key)),
        _ => None,
    };

    let state = server::AppState::new(&config, api, renderer);
    state.sessions.clone().start_background_sweep(60);
    let app = server::build_router(state);

    if let Some((cert_path, key_path)) = tls {
        info!("Loading TLS certificate from {}", cert_path);
        info!("Loading TLS key from {}", key_path);

        let tls_config = axum_server::tls_rustls::RustlsConfig::from_pem_file(cert_path, key_path)
            .await
            .map_err(|e| ServerError::Server(format!("Failed to load TLS config: {}", e)))?;

        info!("Serving HTTPS on {}", addr);

        axum_server::bind_rustls(addr, tls_config)
            .serve(app.into_make_service())
            .await
            .map_err(|e| ServerError::Server(format!("Server error: {}", e)))?;
    } else {
        info!("Serving HTTP on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::Server(format!("Failed to bind: {}", e)))?;

        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Server(format!("Server error: {}", e)))?;
    }

    Ok(())
}
