//! Play page entry points: the launch form and shared lobby links.

use axum::{
    Form,
    extract::{Path, State, rejection::FormRejection},
    response::Response,
};
use plurabus_core::{LaunchMode, LaunchRequest, LobbyKey, ValidationError};

use crate::{error::AppError, pages::Page, state::AppState};

/// `POST /submit` with `pstr` and `gameSize`.
pub async fn submit(
    State(state): State<AppState>,
    form: Result<Form<LaunchRequest>, FormRejection>,
) -> Result<Response, AppError> {
    let Ok(Form(request)) = form else {
        return Err(ValidationError::MissingFields.into());
    };

    let token = request.validate(state.pair_string_rule())?;
    tracing::info!(
        game_size = token.game_size(),
        paired = !token.pair_string().is_empty(),
        "launch form accepted"
    );

    let payload = state.payload(LaunchMode::Direct, &token);
    Page::Play { payload: &payload }.render()
}

/// `GET /g/{key}`: join the private lobby named by the key.
pub async fn lobby(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Response, AppError> {
    let key = LobbyKey::parse(&key).map_err(|err| {
        tracing::debug!(error = %err, "rejected lobby path");
        AppError::NotFound
    })?;

    let token = key.launch_token(state.default_game_size());
    let payload = state.payload(LaunchMode::Lobby, &token);
    Page::Play { payload: &payload }.render()
}
