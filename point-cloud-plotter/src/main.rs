mod engine;
mod error;
mod rpc;

use engine::core::app_setup::create_app;
use engine::core::window_config::{probe_render_context, report_render_context_failure};

#[cfg(target_arch = "wasm32")]
fn main() {
    wasm_bindgen_futures::spawn_local(async {
        // Without a usable GPU adapter the app is never created and stays idle.
        if let Err(err) = probe_render_context().await {
            report_render_context_failure(&err);
            return;
        }

        create_app().run();
    });
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    if let Err(err) = probe_render_context() {
        report_render_context_failure(&err);
        return;
    }

    create_app().run();
}
