use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::AppState;

pub mod health;
pub mod matches;
pub mod players;

/// The full HTTP surface. Static segments such as `stadiums` and `search`
/// take precedence over `{id}` in axum's router regardless of declaration
/// order.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Root and health
        .route("/", get(|| async { "League API - v1.0" }))
        .route("/health", get(health::health_check))

        // Match endpoints
        .route("/matches", get(matches::get_matches).post(matches::create_match))
        .route("/matches/stadiums", get(matches::get_stadiums))
        .route(
            "/matches/{id}",
            get(matches::get_match_by_id)
                .put(matches::update_match)
                .delete(matches::delete_match),
        )
        .route(
            "/matches/{id}/lineup",
            get(matches::get_match_lineup).post(matches::add_match_appearance),
        )

        // Player endpoints
        .route("/players", get(players::get_players).post(players::create_player))
        .route("/players/search", get(players::search_players))
        .route(
            "/players/{id}",
            get(players::get_player_by_id)
                .put(players::update_player)
                .delete(players::delete_player),
        )
        .route("/players/{id}/transfer", post(players::transfer_player))
        .route("/players/{id}/transfers", get(players::get_player_transfer_history))

        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
