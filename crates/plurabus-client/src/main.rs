//! Plurabus Client
//!
//! WASM entry point shared by every plurabus page. Each feature looks for its
//! own elements and stays idle when the page does not have them.
//!
//! Build with `cargo build --target wasm32-unknown-unknown`, then run
//! `wasm-bindgen --target web --out-dir dist/pkg` on the binary.

mod actions;
mod counter;
mod dom;
mod launcher;
mod lobby;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Layer};
use tracing_web::MakeWebConsoleWriter;

fn main() {
    console_error_panic_hook::set_once();

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_writer(MakeWebConsoleWriter::new())
        .with_filter(EnvFilter::new("info"));
    tracing_subscriber::registry().with(fmt_layer).init();

    let document = match dom::document() {
        Ok(document) => document,
        Err(err) => {
            tracing::error!(error = %err, "no document to wire");
            return;
        }
    };

    match launcher::read_payload(&document) {
        Ok(Some(payload)) => report("launcher", launcher::launch(&document, &payload)),
        Ok(None) => {}
        Err(err) => report("launcher", Err(err)),
    }
    report("actions", actions::wire(&document));
    report("counter", counter::wire(&document));
    report("lobby", lobby::wire(&document));
}

fn report(feature: &str, result: Result<(), dom::ClientError>) {
    if let Err(err) = result {
        tracing::error!(feature, error = %err, "page feature failed to start");
    }
}
