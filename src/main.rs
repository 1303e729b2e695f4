mod core;
mod features;
mod modules;
mod shared;

use crate::core::config::Config;
use crate::core::middleware::{self, SessionLayer};
use crate::features::admin::{routes as admin_routes, AdminService};
use crate::features::auth::{routes as auth_routes, AuthService};
use crate::features::map::{MapCapabilities, MapRenderer};
use crate::features::panels::PanelContext;
use crate::features::reports::{routes as reports_routes, ReportService};
use crate::features::worker::{routes as worker_routes, WorkerService};
use crate::modules::backend::{BackendClient, CivicApi};
use crate::modules::sessions::SessionStore;
use axum::extract::DefaultBodyLimit;
use axum::Router;
use std::sync::Arc;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

/// Browser-facing routes of every panel, behind the view-session middleware
pub(crate) fn app_router(
    api: Arc<dyn CivicApi>,
    pages: Arc<PanelContext>,
    sessions: SessionLayer,
) -> Router {
    let auth_service = Arc::new(AuthService::new(Arc::clone(&api)));
    let report_service = Arc::new(ReportService::new(Arc::clone(&api)));
    let admin_service = Arc::new(AdminService::new(Arc::clone(&api)));
    let worker_service = Arc::new(WorkerService::new(api));

    Router::new()
        .merge(auth_routes::routes(auth_service, Arc::clone(&pages)))
        .merge(reports_routes::routes(report_service, Arc::clone(&pages)))
        .merge(admin_routes::routes(admin_service, Arc::clone(&pages)))
        .merge(worker_routes::routes(worker_service, pages))
        .layer(axum::middleware::from_fn_with_state(
            sessions,
            middleware::session_middleware,
        ))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    let available_cpus = std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(1);
    tracing::info!(
        "System info: available_cpus={}, tokio_worker_threads={}, pid={}",
        available_cpus,
        worker_threads,
        std::process::id()
    );

    tracing::info!("Configuration loaded successfully");

    // Backend client shared by every panel
    let backend = BackendClient::new(&config.backend)
        .map_err(|e| anyhow::anyhow!("Failed to create backend client: {}", e))?;
    let api: Arc<dyn CivicApi> = Arc::new(backend);
    tracing::info!("Backend client initialized for {}", config.backend.base_url);

    // View sessions, pruned in the background
    let session_store = Arc::new(SessionStore::new(config.session.idle_ttl));
    Arc::clone(&session_store).spawn_pruner(config.session.prune_interval);
    tracing::info!(
        "View session store initialized (idle ttl: {:?})",
        config.session.idle_ttl
    );

    let capabilities = MapCapabilities::from(&config.map);
    tracing::info!(
        "Map capabilities: widget={}, static_image={}, embed={}",
        capabilities.widget,
        capabilities.static_image_key.is_some(),
        capabilities.embed
    );
    let pages = Arc::new(PanelContext {
        maps: MapRenderer::new(capabilities),
        secure_cookies: config.app.secure_cookies,
        refresh_interval: config.refresh.interval,
        geolocation_timeout: config.refresh.geolocation_timeout,
        asset_base: config.backend.public_url.clone(),
    });

    let sessions = SessionLayer {
        store: session_store,
        secure_cookies: config.app.secure_cookies,
    };

    // Simple health check endpoint (no session required)
    async fn health_check() -> axum::http::StatusCode {
        axum::http::StatusCode::OK
    }
    let health_route = Router::new().route("/health", axum::routing::get(health_check));

    let app = Router::new()
        .merge(app_router(api, pages, sessions))
        .merge(health_route)
        .layer(DefaultBodyLimit::max(config.app.max_request_body_size))
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid));

    // Start server
    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    // Use socket2 for TCP listener configuration
    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.set_nodelay(true)?;

    #[cfg(target_os = "linux")]
    {
        let keepalive = socket2::TcpKeepalive::new()
            .with_time(std::time::Duration::from_secs(60))
            .with_interval(std::time::Duration::from_secs(10))
            .with_retries(3);
        socket.set_tcp_keepalive(&keepalive)?;
    }
    #[cfg(not(target_os = "linux"))]
    {
        let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
        socket.set_tcp_keepalive(&keepalive)?;
    }

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on {}", format!("http://{}", addr));

    axum::serve(listener, app).await?;

    Ok(())
}
