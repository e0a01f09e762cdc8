use axum::Router;
use axum::middleware as axum_mw;
use axum::routing::{get, post, put};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use crate::middleware;
use crate::routes;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route(
            "/professionals",
            get(routes::professionals::list_professionals)
                .post(routes::professionals::upsert_professional),
        )
        .route(
            "/professionals/{id}/name",
            put(routes::professionals::rename_professional),
        )
        .route(
            "/professionals/{id}/shifts",
            get(routes::professionals::list_professional_shifts),
        )
        .route("/shifts", get(routes::shifts::list_shifts))
        .route("/shifts/assign", post(routes::shifts::assign_shifts))
        .route("/shifts/generate", post(routes::shifts::generate_shifts))
        .route("/shifts/samples", post(routes::shifts::generate_samples))
        .route("/shifts/{id}", get(routes::shifts::get_shift))
        .route("/shifts/{id}/status", put(routes::shifts::update_status))
        .route("/shifts/{id}/reassign", post(routes::shifts::reassign_shift))
        .route(
            "/shifts/{id}/reassignments",
            get(routes::reassignments::shift_reassignments),
        )
        .route(
            "/calendar/{year}/{month}",
            get(routes::calendar::monthly_view),
        )
        .route(
            "/reassignments",
            get(routes::reassignments::list_reassignments),
        )
        .layer(
            ServiceBuilder::new()
                .layer(cors)
                .layer(axum_mw::from_fn(middleware::request_log::request_log)),
        )
        .with_state(state)
}
