//! Lobby buttons.
//!
//! Current pages have a `{action}formbutton` per action. Clicking it fetches
//! an anti-abuse token (except for practice), writes it to the hidden
//! `{action}forminput` and submits `{action}form`. Older pages only have the
//! forms; submitting one fetches a token and navigates to `/assess` instead.

use gloo::events::{EventListener, EventListenerOptions};
use js_sys::{Function, Object, Promise, Reflect};
use plurabus_core::{Action, link::assess_url};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{Document, HtmlElement, HtmlFormElement, HtmlInputElement};

use crate::dom::{self, ClientError};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["grecaptcha", "enterprise"], js_name = ready)]
    fn recaptcha_ready(callback: &Function) -> Result<(), JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["grecaptcha", "enterprise"], js_name = execute)]
    fn recaptcha_execute(site_key: &str, options: &JsValue) -> Result<Promise, JsValue>;
}

/// Ask the anti-abuse service for a token scoped to `action`.
pub async fn fetch_token(site_key: &str, action: Action) -> Result<String, ClientError> {
    let mut registered = Ok(());
    let ready = Promise::new(&mut |resolve, _reject| {
        registered = recaptcha_ready(&resolve);
    });
    registered?;
    JsFuture::from(ready).await?;

    let options = Object::new();
    Reflect::set(&options, &"action".into(), &action.as_str().into())?;
    let token = JsFuture::from(recaptcha_execute(site_key, &options)?).await?;
    token.as_string().ok_or(ClientError::Token)
}

pub fn wire(document: &Document) -> Result<(), ClientError> {
    let site_key = dom::body_data(document, "sitekey");

    for action in Action::ALL {
        let Some(form) = dom::element_by_id::<HtmlFormElement>(document, &action.form_id())? else {
            continue;
        };
        let button = dom::element_by_id::<HtmlElement>(document, &action.button_id())?;

        if action.needs_token() && site_key.is_none() {
            tracing::warn!(%action, "page has no site key; action left inert");
            continue;
        }

        match button {
            Some(button) => wire_button(document, action, &button, form, site_key.clone())?,
            None => wire_redirect(action, &form, site_key.clone()),
        }
    }

    show_player_count(document)?;
    Ok(())
}

fn wire_button(
    document: &Document,
    action: Action,
    button: &HtmlElement,
    form: HtmlFormElement,
    site_key: Option<String>,
) -> Result<(), ClientError> {
    let input = dom::element_by_id::<HtmlInputElement>(document, &action.token_input_id())?;

    EventListener::new(button, "click", move |_| {
        let form = form.clone();
        let input = input.clone();
        let site_key = site_key.clone();
        spawn_local(async move {
            if let Err(err) = submit_action(action, &form, input.as_ref(), site_key.as_deref()).await
            {
                tracing::warn!(%action, error = %err, "action not submitted");
            }
        });
    })
    .forget();
    Ok(())
}

async fn submit_action(
    action: Action,
    form: &HtmlFormElement,
    input: Option<&HtmlInputElement>,
    site_key: Option<&str>,
) -> Result<(), ClientError> {
    if let (true, Some(site_key)) = (action.needs_token(), site_key) {
        let token = fetch_token(site_key, action).await?;
        let input = input.ok_or(ClientError::WrongElement {
            id: action.token_input_id(),
            expected: "input",
        })?;
        input.set_value(&token);
    }
    form.submit()?;
    Ok(())
}

fn wire_redirect(action: Action, form: &HtmlFormElement, site_key: Option<String>) {
    EventListener::new_with_options(
        form,
        "submit",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            event.prevent_default();
            let site_key = site_key.clone();
            spawn_local(async move {
                let target = redirect_target(action, site_key.as_deref()).await;
                if let Err(err) = target.and_then(|href| dom::navigate(&href)) {
                    tracing::warn!(%action, error = %err, "action not submitted");
                }
            });
        },
    )
    .forget();
}

async fn redirect_target(action: Action, site_key: Option<&str>) -> Result<String, ClientError> {
    let token = match (action.needs_token(), site_key) {
        (true, Some(site_key)) => fetch_token(site_key, action).await?,
        _ => String::new(),
    };
    let encoded = String::from(js_sys::encode_uri_component(&token));
    Ok(assess_url(action, &encoded))
}

/// Copy `data-numplayers` into the `numPlayers` field when both exist.
fn show_player_count(document: &Document) -> Result<(), ClientError> {
    let Some(count) = dom::body_data(document, "numplayers") else {
        return Ok(());
    };
    if let Some(field) = dom::element_by_id::<HtmlInputElement>(document, "numPlayers")? {
        field.set_attribute("value", &count)?;
    }
    Ok(())
}
