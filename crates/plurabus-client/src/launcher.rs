//! Starts the external game module on the play page.
//!
//! The module reads a global `Module` object with the target `canvas` and an
//! `arguments` array of strings, so that object must exist before its script
//! is added to the page.

use gloo::events::{EventListener, EventListenerOptions};
use js_sys::{Array, Object, Reflect};
use plurabus_core::{CanvasFit, LaunchArguments, LaunchPayload};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlCanvasElement, HtmlScriptElement};

use crate::dom::{self, ClientError};

pub const PAYLOAD_ELEMENT_ID: &str = "launch-payload";
pub const CANVAS_ELEMENT_ID: &str = "canvas";

/// Launch payload embedded by the server, if this is a play page.
pub fn read_payload(document: &Document) -> Result<Option<LaunchPayload>, ClientError> {
    let Some(element) = document.get_element_by_id(PAYLOAD_ELEMENT_ID) else {
        return Ok(None);
    };
    let json = element.text_content().unwrap_or_default();
    Ok(Some(LaunchPayload::from_json(&json)?))
}

pub fn launch(document: &Document, payload: &LaunchPayload) -> Result<(), ClientError> {
    let canvas: HtmlCanvasElement = dom::element_by_id(document, CANVAS_ELEMENT_ID)?
        .ok_or(ClientError::MissingElement(CANVAS_ELEMENT_ID))?;

    // Right clicks belong to the game.
    EventListener::new_with_options(
        &canvas,
        "contextmenu",
        EventListenerOptions::enable_prevent_default(),
        |event| event.prevent_default(),
    )
    .forget();

    let viewport = dom::viewport()?;
    let fit = payload.fit(viewport)?;
    let arguments = LaunchArguments::new(payload, &fit);
    tracing::info!(
        revision = ?payload.revision,
        mode = ?payload.mode,
        width = viewport.width,
        height = viewport.height,
        scale = fit.scale,
        display_size = fit.display_size,
        "launching game module"
    );

    install_module(&canvas, &arguments, &fit)?;

    let script: HtmlScriptElement = document.create_element("script")?.unchecked_into();
    script.set_src(&payload.module_script);
    document
        .body()
        .ok_or(ClientError::NoDocument)?
        .append_child(&script)?;
    Ok(())
}

fn install_module(
    canvas: &HtmlCanvasElement,
    arguments: &LaunchArguments,
    fit: &CanvasFit,
) -> Result<(), ClientError> {
    let args: Array = arguments
        .as_slice()
        .iter()
        .map(|arg| JsValue::from_str(arg))
        .collect();

    let module = Object::new();
    Reflect::set(&module, &"canvas".into(), canvas)?;
    Reflect::set(&module, &"arguments".into(), &args)?;
    Reflect::set(
        &module,
        &"displaySize".into(),
        &JsValue::from(fit.display_size),
    )?;

    let window = dom::window()?;
    Reflect::set(&window, &"Module".into(), &module)?;
    Ok(())
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_read_payload() {
        let document = dom::document().unwrap();
        assert!(read_payload(&document).unwrap().is_none());

        let script = document.create_element("script").unwrap();
        script.set_id(PAYLOAD_ELEMENT_ID);
        script.set_attribute("type", "application/json").unwrap();
        script.set_text_content(Some(
            r#"{"revision":"hivemind","mode":"direct","game_size":8,"launch_token":"AB128",
               "panel_size":240,"menu_items":6,"unit_limit":4096,"padding":10,
               "module_script":"/d/hivemindweb.js"}"#,
        ));
        document.body().unwrap().append_child(&script).unwrap();

        let payload = read_payload(&document).unwrap().unwrap();
        assert_eq!(payload.launch_token, "AB128");
        script.remove();
    }

    #[wasm_bindgen_test]
    fn test_install_module_sets_global() {
        let document = dom::document().unwrap();
        let canvas: HtmlCanvasElement = document.create_element("canvas").unwrap().unchecked_into();
        let payload = LaunchPayload::from_json(
            r#"{"revision":"hivemind","mode":"direct","game_size":64,"launch_token":"AB1264",
               "panel_size":240,"menu_items":6,"unit_limit":4096,"padding":10,
               "module_script":"/d/hivemindweb.js"}"#,
        )
        .unwrap();
        let fit = payload.fit(plurabus_core::Viewport::new(1280, 720)).unwrap();
        let arguments = LaunchArguments::new(&payload, &fit);

        install_module(&canvas, &arguments, &fit).unwrap();

        let window = dom::window().unwrap();
        let module = Reflect::get(&window, &"Module".into()).unwrap();
        let args: Array = Reflect::get(&module, &"arguments".into()).unwrap().unchecked_into();
        let args: Vec<String> = args.iter().filter_map(|arg| arg.as_string()).collect();
        assert_eq!(args, ["64", "240", "9", "AB1264"]);
        assert_eq!(
            Reflect::get(&module, &"displaySize".into()).unwrap().as_f64(),
            Some(576.0)
        );
    }
}
