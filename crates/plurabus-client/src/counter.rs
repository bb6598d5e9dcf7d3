//! Live player counter overlay.

use plurabus_core::{CounterDisplay, link::counter_socket_url};
use wasm_bindgen::prelude::*;
use web_sys::{CloseEvent, Document, Element, MessageEvent, WebSocket};

use crate::dom::{self, ClientError};

pub const COUNTER_ELEMENT_ID: &str = "counterDiv";

/// Subscribe `counterDiv` to the counter feed when the page has one.
pub fn wire(document: &Document) -> Result<(), ClientError> {
    let Some(target) = dom::element_by_id::<Element>(document, COUNTER_ELEMENT_ID)? else {
        return Ok(());
    };
    let url = counter_socket_url(&dom::origin()?)?;
    subscribe(&url, target)
}

/// One socket, one element. Every text message replaces the element's text;
/// a closed socket is not reopened.
pub fn subscribe(url: &str, target: Element) -> Result<(), ClientError> {
    let socket = WebSocket::new(url)?;
    let mut display = CounterDisplay::new();

    let on_message = Closure::wrap(Box::new(move |event: MessageEvent| {
        let Some(text) = event.data().as_string() else {
            return;
        };
        target.set_text_content(Some(display.receive(text)));
    }) as Box<dyn FnMut(MessageEvent)>);

    let on_close = Closure::wrap(Box::new(move |event: CloseEvent| {
        tracing::info!(code = event.code(), "player counter feed closed");
    }) as Box<dyn FnMut(CloseEvent)>);

    socket.set_onmessage(Some(on_message.as_ref().unchecked_ref()));
    socket.set_onclose(Some(on_close.as_ref().unchecked_ref()));

    // The socket lives as long as the page.
    on_message.forget();
    on_close.forget();

    tracing::debug!(url, "subscribed to player counter");
    Ok(())
}
