//! Lobby button actions.
//!
//! The anti-abuse token is carried through untouched; assessing it is left to
//! whatever sits in front of this server.

use axum::{
    Form,
    extract::{Query, State, rejection::FormRejection},
    response::Response,
};
use plurabus_core::{Action, LaunchMode, LaunchToken};
use serde::Deserialize;

use crate::{error::AppError, pages::Page, state::AppState, util::generate_lobby_key};

/// Longest verification token passed along.
pub const MAX_TOKEN_LEN: usize = 4096;

#[derive(Debug, Deserialize)]
pub struct ActionQuery {
    pub a: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ActionForm {
    #[serde(rename = "recaptcha-token", default)]
    pub recaptcha_token: Option<String>,
}

/// Query of the redirect older lobby pages use: action in `a`, token in `q`.
#[derive(Debug, Deserialize)]
pub struct AssessQuery {
    pub a: Option<String>,
    pub q: Option<String>,
}

/// `POST /action?a={public|private|practice}`.
pub async fn dispatch(
    State(state): State<AppState>,
    Query(query): Query<ActionQuery>,
    form: Result<Form<ActionForm>, FormRejection>,
) -> Result<Response, AppError> {
    let form = form.map(|Form(form)| form).unwrap_or_default();
    run(&state, query.a, form.recaptcha_token)
}

/// `GET /assess?a={action}&q={token}`.
pub async fn assess(
    State(state): State<AppState>,
    Query(query): Query<AssessQuery>,
) -> Result<Response, AppError> {
    run(&state, query.a, query.q)
}

fn run(state: &AppState, action: Option<String>, token: Option<String>) -> Result<Response, AppError> {
    let action: Action = action.ok_or(AppError::MissingQueries)?.parse()?;

    if action.needs_token() {
        let token = token
            .filter(|token| !token.trim().is_empty())
            .ok_or(AppError::MissingQueries)?;
        if token.len() > MAX_TOKEN_LEN {
            return Err(AppError::InvalidToken);
        }
    }

    tracing::info!(%action, "action dispatched");

    match action {
        Action::Public | Action::Practice => {
            let mode = if action == Action::Public {
                LaunchMode::Public
            } else {
                LaunchMode::Practice
            };
            let token = LaunchToken::open(state.default_game_size());
            let payload = state.payload(mode, &token);
            Page::Play { payload: &payload }.render()
        }
        Action::Private => {
            let lobby_key = generate_lobby_key()?;
            tracing::info!(lobby_key = %lobby_key, "private lobby created");
            Page::Private {
                lobby_key: &lobby_key,
            }
            .render()
        }
    }
}
