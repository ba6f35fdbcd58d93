use axum::Router;

use crate::AppState;

mod health;
mod production;
mod weather;

// ---

pub fn router(state: AppState) -> Router {
    // ---
    Router::new()
        .merge(production::router())
        .merge(weather::router())
        .merge(health::router())
        .with_state(state)
}
