use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{delete, get, post},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/survey", get(handlers::survey_page))
        .route("/survey/options", post(handlers::form_add))
        .route("/survey/options/:id/increment", post(handlers::form_increment))
        .route("/survey/options/:id/decrement", post(handlers::form_decrement))
        .route("/survey/options/:id/remove", post(handlers::form_remove))
        .route("/api/survey", get(handlers::get_survey))
        .route("/api/options", post(handlers::add_option))
        .route("/api/options/:id", delete(handlers::remove_option))
        .route("/api/options/:id/increment", post(handlers::increment))
        .route("/api/options/:id/decrement", post(handlers::decrement))
        .with_state(state)
}
