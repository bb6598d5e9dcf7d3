//! Small DOM lookups shared by the page wiring.

use plurabus_core::{LinkError, SizingError};
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Window};

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("no global window")]
    NoWindow,

    #[error("window has no document")]
    NoDocument,

    #[error("page has no #{0} element")]
    MissingElement(&'static str),

    #[error("element #{id} is not a {expected}")]
    WrongElement { id: String, expected: &'static str },

    #[error("launch payload is malformed: {0}")]
    Payload(#[from] serde_json::Error),

    #[error(transparent)]
    Sizing(#[from] SizingError),

    #[error(transparent)]
    Link(#[from] LinkError),

    #[error("verification token unavailable")]
    Token,

    #[error("javascript error: {0}")]
    Js(String),
}

impl From<JsValue> for ClientError {
    fn from(value: JsValue) -> Self {
        let message = value
            .dyn_ref::<js_sys::Error>()
            .map(|err| String::from(err.message()))
            .or_else(|| value.as_string())
            .unwrap_or_else(|| format!("{value:?}"));
        ClientError::Js(message)
    }
}

pub fn window() -> Result<Window, ClientError> {
    web_sys::window().ok_or(ClientError::NoWindow)
}

pub fn document() -> Result<Document, ClientError> {
    window()?.document().ok_or(ClientError::NoDocument)
}

/// Element with `id` cast to `T`. `Ok(None)` when the page has no such
/// element, which is how each feature detects whether it applies.
pub fn element_by_id<T: JsCast>(document: &Document, id: &str) -> Result<Option<T>, ClientError> {
    let Some(element) = document.get_element_by_id(id) else {
        return Ok(None);
    };
    element
        .dyn_into::<T>()
        .map(Some)
        .map_err(|_| ClientError::WrongElement {
            id: id.to_string(),
            expected: std::any::type_name::<T>(),
        })
}

/// `data-{name}` attribute of `<body>`, filled in by the page template.
pub fn body_data(document: &Document, name: &str) -> Option<String> {
    document
        .body()?
        .get_attribute(&format!("data-{name}"))
        .filter(|value| !value.is_empty())
}

/// Origin of the current page, e.g. `https://plurabus.me`.
pub fn origin() -> Result<String, ClientError> {
    Ok(window()?.location().origin()?)
}

/// Full page navigation.
pub fn navigate(href: &str) -> Result<(), ClientError> {
    window()?.location().set_href(href)?;
    Ok(())
}

pub fn viewport() -> Result<plurabus_core::Viewport, ClientError> {
    let window = window()?;
    let width = window.inner_width()?.as_f64().unwrap_or_default();
    let height = window.inner_height()?.as_f64().unwrap_or_default();
    Ok(plurabus_core::Viewport::from_css_pixels(width, height))
}
