use axum::{
    Router,
    handler::HandlerWithoutStateExt,
    routing::{get, post},
};
use http::{HeaderName, HeaderValue, header};
use plurabus_core::{ContentSecurityPolicy, link::ASSESS_PATH};
use tower_http::{services::ServeDir, set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::{
    handler,
    pages::serve_static,
    state::{ASSET_PREFIX, AppState},
};

/// Headers sent with every response.
const SECURITY_HEADERS: [(&str, &str); 6] = [
    ("cross-origin-embedder-policy", "require-corp"),
    ("cross-origin-opener-policy", "same-origin"),
    ("cross-origin-resource-policy", "same-origin"),
    (
        "strict-transport-security",
        "max-age=31536000; includeSubDomains",
    ),
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
];

pub fn build(state: AppState) -> Router {
    let assets = ServeDir::new(&state.config().asset_dir).fallback(serve_static.into_service());

    let mut router = Router::new()
        .route("/", get(handler::index))
        .route("/submit", post(handler::launch::submit))
        .route("/action", post(handler::action::dispatch))
        .route(ASSESS_PATH, get(handler::action::assess))
        .route("/g/{key}", get(handler::launch::lobby))
        .nest_service(ASSET_PREFIX, assets)
        .fallback(handler::not_found)
        .with_state(state);

    // Pages set their own policy; everything else gets the default one.
    let default_csp = HeaderValue::try_from(ContentSecurityPolicy::default().to_string())
        .unwrap_or_else(|_| HeaderValue::from_static("default-src 'self';"));
    router = router.layer(SetResponseHeaderLayer::if_not_present(
        header::CONTENT_SECURITY_POLICY,
        default_csp,
    ));
    for (name, value) in SECURITY_HEADERS {
        router = router.layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        ));
    }

    router.layer(TraceLayer::new_for_http())
}
