use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/refuel", post(handlers::refuel_form))
        .route("/history/clear", post(handlers::clear_history_form))
        .route("/api/config", get(handlers::get_config))
        .route(
            "/api/history",
            get(handlers::get_history).delete(handlers::clear_history),
        )
        .route("/api/calculate", post(handlers::calculate))
        .route("/api/refuel", post(handlers::refuel))
        .route("/api/monthly", get(handlers::get_monthly))
        .route("/api/report", get(handlers::get_report))
        .route("/api/chart", get(handlers::get_chart))
        .with_state(state)
}
