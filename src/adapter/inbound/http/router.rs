//! Route table, middleware and the serve loop.

use std::future::Future;

use axum::http::HeaderValue;
use axum::routing::{delete, get, put};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use super::state::AppState;
use super::{agents, announcements, cash_offers, dashboard, sales, teams, ws};
use crate::error::Result;

/// Build the full router.
///
/// An empty `cors_origins` allows any origin.
pub fn router(state: AppState, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/health", get(dashboard::health))
        .route("/api/teams", get(teams::list).post(teams::create))
        .route(
            "/api/teams/{id}",
            get(teams::get).put(teams::update).delete(teams::delete),
        )
        .route("/api/agents", get(agents::list).post(agents::create))
        .route(
            "/api/agents/{id}",
            get(agents::get).put(agents::update).delete(agents::delete),
        )
        .route("/api/sales", get(sales::list).post(sales::create))
        .route("/api/sales/{id}", delete(sales::delete))
        .route(
            "/api/announcements",
            get(announcements::list).post(announcements::create),
        )
        .route(
            "/api/announcements/{id}",
            put(announcements::update).delete(announcements::delete),
        )
        .route(
            "/api/cash-offers",
            get(cash_offers::list).post(cash_offers::create),
        )
        .route(
            "/api/cash-offers/{id}",
            get(cash_offers::get)
                .put(cash_offers::update)
                .delete(cash_offers::delete),
        )
        .route("/api/leaderboard", get(dashboard::leaderboard))
        .route("/api/dashboard/progress", get(dashboard::progress))
        .route("/api/dashboard/targets", get(dashboard::targets))
        .route("/ws", get(ws::upgrade))
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Serve `app` on `listener` until `shutdown` resolves.
///
/// # Errors
/// Returns an error if the server fails.
pub async fn serve<S>(listener: TcpListener, app: Router, shutdown: S) -> Result<()>
where
    S: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "Listening");
    }
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}
