mod handlers;
mod route;

use axum::{handler::HandlerWithoutStateExt, http::StatusCode, Router};
use std::{net::SocketAddr, sync::Arc};
use tower_http::services::ServeDir;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use model::UserData;

const PORT: u16 = 8088;
const PWA_DIR: &str = "volume/pwa";

#[derive(Clone)]
pub struct AppState {
    pub user: Arc<UserData>,
}

impl AppState {
    fn new() -> Self {
        Self {
            user: Arc::new(UserData {
                name: String::from("Ada"),
                email: String::from("ada@example.org"),
            }),
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hyper=warn,tower_http=debug,axum=trace,backend=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let handle_404 = handle_404.into_service();
    let root_dir = ServeDir::new(PWA_DIR)
        .precompressed_br()
        .precompressed_gzip()
        .not_found_service(handle_404);

    let app = Router::new()
        .nest("/api", route::router(AppState::new()))
        .fallback_service(root_dir);
    serve_http(PORT, app).await;
}

async fn serve_http(port: u16, app: Router) {
    let http_addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = match tokio::net::TcpListener::bind(http_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("cannot bind {}: {}", http_addr, e);
            return;
        }
    };
    info!(
        "HTTP server started listening on {}, please Ctrl-c to terminate server.",
        http_addr
    );
    if let Err(e) = axum::serve(listener, app).await {
        error!("server stopped: {}", e);
    }
}

async fn handle_404() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not found")
}
