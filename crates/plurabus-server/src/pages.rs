//! Page templates embedded in the binary.
//!
//! Templates carry `{{NAME}}` placeholders. Every substituted value is escaped
//! for its context: HTML escaping for text and attributes, script-safe JSON
//! for the launch payload.

use axum::{
    http::{HeaderValue, Uri, header},
    response::{Html, IntoResponse, Response},
};
use plurabus_core::{ContentSecurityPolicy, LaunchPayload, LobbyKey};
use rust_embed::Embed;

use crate::{error::AppError, util::escape_html};

#[derive(Embed)]
#[folder = "web/"]
struct Assets;

pub enum Page<'a> {
    Index { site_key: &'a str },
    Play { payload: &'a LaunchPayload },
    Private { lobby_key: &'a LobbyKey },
}

impl Page<'_> {
    fn template(&self) -> &'static str {
        match self {
            Page::Index { .. } => "templates/index.html",
            Page::Play { .. } => "templates/play.html",
            Page::Private { .. } => "templates/private.html",
        }
    }

    fn values(&self) -> Result<Vec<(&'static str, String)>, AppError> {
        Ok(match self {
            Page::Index { site_key } => vec![("{{SITE_KEY}}", escape_html(site_key))],
            Page::Play { payload } => vec![("{{LAUNCH_PAYLOAD}}", payload.to_script_json()?)],
            Page::Private { lobby_key } => {
                vec![("{{LOBBY_KEY}}", escape_html(lobby_key.as_str()))]
            }
        })
    }

    fn csp(&self) -> ContentSecurityPolicy {
        match self {
            Page::Play { .. } => ContentSecurityPolicy::for_game(),
            Page::Index { .. } | Page::Private { .. } => ContentSecurityPolicy::default(),
        }
    }

    pub fn render(&self) -> Result<Response, AppError> {
        let name = self.template();
        let file = Assets::get(name).ok_or(AppError::MissingTemplate(name))?;
        let mut body = String::from_utf8_lossy(&file.data).into_owned();
        for (placeholder, value) in self.values()? {
            body = body.replace(placeholder, &value);
        }

        let csp = HeaderValue::try_from(self.csp().to_string())
            .unwrap_or_else(|_| HeaderValue::from_static("default-src 'self';"));
        Ok(([(header::CONTENT_SECURITY_POLICY, csp)], Html(body)).into_response())
    }
}

/// Serve files from `web/static/`, used when the asset directory has no match.
pub async fn serve_static(uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/');
    if path.split('/').any(|segment| segment == "..") {
        return AppError::NotFound.into_response();
    }
    let embedded = format!("static/{path}");

    match Assets::get(&embedded) {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            (
                [(header::CONTENT_TYPE, mime.as_ref())],
                content.data.into_owned(),
            )
                .into_response()
        }
        None => AppError::NotFound.into_response(),
    }
}
