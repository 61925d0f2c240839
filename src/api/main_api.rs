use crate::api::endpoints::addon_api::addon_api_register;
use crate::api::model::AppState;
use crate::model::{Config, ConfigApi, Healthcheck};
use crate::utils::sanitize_sensitive_info;
use crate::VERSION;
use axum::extract::State;
use log::{error, info, warn};
use std::io::ErrorKind;
use std::sync::Arc;
use tokio::net::TcpListener;

fn get_server_time() -> String {
    chrono::offset::Local::now().format("%Y-%m-%d %H:%M:%S %Z").to_string()
}

fn create_healthcheck(app_state: &AppState) -> Healthcheck {
    Healthcheck {
        status: "ok".to_string(),
        version: VERSION.to_string(),
        server_time: get_server_time(),
        cache: app_state.playlist.status(),
    }
}

async fn healthcheck(State(app_state): State<Arc<AppState>>) -> impl axum::response::IntoResponse {
    axum::Json(create_healthcheck(&app_state))
}

fn create_cors_layer() -> tower_http::cors::CorsLayer {
    tower_http::cors::CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::OPTIONS,
            axum::http::Method::HEAD,
        ])
        .allow_headers(tower_http::cors::Any)
        .max_age(std::time::Duration::from_secs(3600))
}

fn create_compression_layer() -> tower_http::compression::CompressionLayer {
    tower_http::compression::CompressionLayer::new()
        .br(true)
        .deflate(true)
        .gzip(true)
        .zstd(true)
}

pub fn create_router(app_state: Arc<AppState>) -> axum::Router<()> {
    axum::Router::new()
        .route("/healthcheck", axum::routing::get(healthcheck))
        .merge(addon_api_register())
        .layer(create_cors_layer())
        .layer(create_compression_layer())
        .with_state(app_state)
}

fn exec_update_on_boot(app_state: &Arc<AppState>) {
    if app_state.config.cache.update_on_boot {
        let playlist = Arc::clone(&app_state.playlist);
        tokio::spawn(async move {
            if playlist.get_snapshot().await.is_none() {
                warn!("Initial playlist update failed, retrying on first request");
            }
        });
    }
}

/// Binds the configured port, or the next free one when `port_search` allows it.
pub async fn bind_listener(api: &ConfigApi) -> std::io::Result<TcpListener> {
    let mut last_err = None;
    for port in api.candidate_ports() {
        match TcpListener::bind((api.host.as_str(), port)).await {
            Ok(listener) => return Ok(listener),
            Err(err) if err.kind() == ErrorKind::AddrInUse => {
                warn!("Port {port} is already in use");
                last_err = Some(err);
            }
            Err(err) => return Err(err),
        }
    }
    Err(last_err.unwrap_or_else(|| std::io::Error::new(ErrorKind::AddrNotAvailable, "no port to bind")))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for shutdown signal: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!("Failed to listen for terminate signal: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("Shutting down");
}

pub async fn start_server(cfg: Arc<Config>) -> std::io::Result<()> {
    let app_state = Arc::new(AppState::from_config(Arc::clone(&cfg)));

    info!("Playlist source: {}", sanitize_sensitive_info(&cfg.source.url));
    info!("Cache ttl: {}s, page size: {}", app_state.playlist.ttl().as_secs(), cfg.catalog.page_size);

    exec_update_on_boot(&app_state);

    let router = create_router(Arc::clone(&app_state));
    let listener = bind_listener(&cfg.api).await?;
    let addr = listener.local_addr()?;
    info!("Server running: http://{addr}");
    info!("Addon manifest: http://{addr}/manifest.json");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
}
