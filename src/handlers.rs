use crate::models::{AddOptionRequest, SurveyResponse};
use crate::state::AppState;
use crate::survey::Mutation;
use crate::ui::{render_home, render_survey};
use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    Form, Json,
};
use tracing::debug;

pub async fn home() -> Html<String> {
    Html(render_home())
}

pub async fn survey_page(State(state): State<AppState>) -> Html<String> {
    let survey = state.survey.lock().await;
    Html(render_survey(&survey))
}

pub async fn get_survey(State(state): State<AppState>) -> Json<SurveyResponse> {
    let survey = state.survey.lock().await;
    Json(survey.to_response())
}

pub async fn add_option(
    State(state): State<AppState>,
    Json(payload): Json<AddOptionRequest>,
) -> Json<SurveyResponse> {
    Json(apply_mutation(&state, Mutation::Add(payload.name)).await)
}

pub async fn increment(State(state): State<AppState>, Path(id): Path<u64>) -> Json<SurveyResponse> {
    Json(apply_mutation(&state, Mutation::Increment(id)).await)
}

pub async fn decrement(State(state): State<AppState>, Path(id): Path<u64>) -> Json<SurveyResponse> {
    Json(apply_mutation(&state, Mutation::Decrement(id)).await)
}

pub async fn remove_option(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Json<SurveyResponse> {
    Json(apply_mutation(&state, Mutation::Remove(id)).await)
}

pub async fn form_add(
    State(state): State<AppState>,
    Form(payload): Form<AddOptionRequest>,
) -> Redirect {
    apply_mutation(&state, Mutation::Add(payload.name)).await;
    Redirect::to("/survey")
}

pub async fn form_increment(State(state): State<AppState>, Path(id): Path<u64>) -> Redirect {
    apply_mutation(&state, Mutation::Increment(id)).await;
    Redirect::to("/survey")
}

pub async fn form_decrement(State(state): State<AppState>, Path(id): Path<u64>) -> Redirect {
    apply_mutation(&state, Mutation::Decrement(id)).await;
    Redirect::to("/survey")
}

pub async fn form_remove(State(state): State<AppState>, Path(id): Path<u64>) -> Redirect {
    apply_mutation(&state, Mutation::Remove(id)).await;
    Redirect::to("/survey")
}

/// Applies a mutation and, if the list changed, arms a save of the new snapshot.
/// Refused mutations leave both the list and the pending save untouched.
async fn apply_mutation(state: &AppState, mutation: Mutation) -> SurveyResponse {
    let mut survey = state.survey.lock().await;
    if survey.apply(&mutation) {
        debug!(?mutation, total = survey.total_votes(), "survey updated");
        state.persistence.schedule_save(survey.snapshot()).await;
    } else {
        debug!(?mutation, "mutation refused");
    }
    survey.to_response()
}
