//! Private lobby page: shareable link, copy button and the play form.

use gloo::events::{EventListener, EventListenerOptions};
use plurabus_core::LobbyKey;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{Document, HtmlElement, HtmlFormElement, HtmlInputElement};

use crate::dom::{self, ClientError};

pub const LINK_INPUT_ID: &str = "gamelink";
pub const COPY_BUTTON_ID: &str = "copybutton";
pub const PLAY_FORM_ID: &str = "playprivateform";

pub fn wire(document: &Document) -> Result<(), ClientError> {
    let Some(raw_key) = dom::body_data(document, "lobbykey") else {
        return Ok(());
    };
    let key = LobbyKey::parse(&raw_key)?;

    if let Some(input) = dom::element_by_id::<HtmlInputElement>(document, LINK_INPUT_ID)? {
        input.set_attribute("value", &key.url(&dom::origin()?))?;

        if let Some(button) = dom::element_by_id::<HtmlElement>(document, COPY_BUTTON_ID)? {
            EventListener::new(&button, "click", move |_| {
                let input = input.clone();
                spawn_local(async move {
                    if let Err(err) = copy_link(&input).await {
                        tracing::warn!(error = %err, "failed to copy lobby link");
                    }
                });
            })
            .forget();
        }
    }

    if let Some(form) = dom::element_by_id::<HtmlFormElement>(document, PLAY_FORM_ID)? {
        let path = key.path();
        EventListener::new_with_options(
            &form,
            "submit",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                event.prevent_default();
                if let Err(err) = dom::navigate(&path) {
                    tracing::warn!(error = %err, "failed to open lobby");
                }
            },
        )
        .forget();
    }

    Ok(())
}

async fn copy_link(input: &HtmlInputElement) -> Result<(), ClientError> {
    input.select();
    input.set_selection_range(0, 99_999)?;

    let clipboard = dom::window()?.navigator().clipboard();
    JsFuture::from(clipboard.write_text(&input.value())).await?;
    tracing::debug!("lobby link copied");
    Ok(())
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_link_written_into_input() {
        let document = dom::document().unwrap();
        let body = document.body().unwrap();
        body.set_attribute("data-lobbykey", "Ab3dEf6hIj9lMn0p").unwrap();
        let input = document.create_element("input").unwrap();
        input.set_id(LINK_INPUT_ID);
        body.append_child(&input).unwrap();

        wire(&document).unwrap();

        let expected = format!("{}/g/Ab3dEf6hIj9lMn0p", dom::origin().unwrap());
        assert_eq!(input.get_attribute("value"), Some(expected));

        input.remove();
        body.remove_attribute("data-lobbykey").unwrap();
    }

    #[wasm_bindgen_test]
    fn test_malformed_key_is_an_error() {
        let document = dom::document().unwrap();
        let body = document.body().unwrap();
        body.set_attribute("data-lobbykey", "../etc").unwrap();

        assert!(matches!(wire(&document), Err(ClientError::Link(_))));
        body.remove_attribute("data-lobbykey").unwrap();
    }
}
