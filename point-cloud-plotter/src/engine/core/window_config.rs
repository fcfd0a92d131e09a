use bevy::prelude::*;
use bevy::window::PresentMode;

use crate::error::PlotError;

pub fn create_window_config() -> Window {
    #[cfg(target_arch = "wasm32")]
    {
        Window {
            title: "Point Cloud Plotter".into(),
            canvas: Some("#bevy".into()),
            fit_canvas_to_parent: true,
            prevent_default_event_handling: false,
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        Window {
            title: "Point Cloud Plotter".into(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }
}

/// Turn the outcome of an adapter request into the startup verdict.
pub fn require_adapter<A>(adapter: Option<A>, backend: &str) -> Result<A, PlotError> {
    adapter.ok_or_else(|| {
        PlotError::RenderContextUnavailable(format!("{backend} returned no usable GPU adapter"))
    })
}

/// Ask the browser for a WebGPU adapter before the renderer is created.
/// `navigator.gpu` can exist while `requestAdapter()` still resolves to null.
#[cfg(target_arch = "wasm32")]
pub async fn probe_render_context() -> Result<(), PlotError> {
    use js_sys::{Function, Promise, Reflect};
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;

    let unavailable = |reason: &str| PlotError::RenderContextUnavailable(reason.into());

    let window = web_sys::window().ok_or_else(|| unavailable("no window object"))?;
    let gpu = Reflect::get(&window.navigator(), &JsValue::from_str("gpu"))
        .ok()
        .filter(|gpu| !gpu.is_undefined() && !gpu.is_null())
        .ok_or_else(|| unavailable("this browser does not expose WebGPU (navigator.gpu)"))?;

    let request_adapter = Reflect::get(&gpu, &JsValue::from_str("requestAdapter"))
        .ok()
        .and_then(|method| method.dyn_into::<Function>().ok())
        .ok_or_else(|| unavailable("navigator.gpu.requestAdapter is missing"))?;
    let pending = request_adapter
        .call0(&gpu)
        .ok()
        .and_then(|promise| promise.dyn_into::<Promise>().ok())
        .ok_or_else(|| unavailable("navigator.gpu.requestAdapter() did not return a promise"))?;

    let adapter = JsFuture::from(pending)
        .await
        .map_err(|err| unavailable(&format!("adapter request rejected: {err:?}")))?;

    require_adapter(
        Some(adapter).filter(|adapter| !adapter.is_null() && !adapter.is_undefined()),
        "navigator.gpu.requestAdapter()",
    )
    .map(|_| ())
}

/// Request an adapter the same way the renderer will, so a host without one
/// is reported instead of failing inside renderer setup.
#[cfg(not(target_arch = "wasm32"))]
pub fn probe_render_context() -> Result<(), PlotError> {
    let instance = wgpu::Instance::default();
    let adapter =
        bevy::tasks::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions::default()));

    require_adapter(adapter, "wgpu").map(|_| ())
}

/// Reported once, before any app exists, so the logger is not available yet.
pub fn report_render_context_failure(err: &PlotError) {
    #[cfg(target_arch = "wasm32")]
    {
        use crate::rpc::web_rpc::{RpcNotification, send_message_to_parent};

        web_sys::console::error_1(&wasm_bindgen::JsValue::from_str(&err.to_string()));
        send_message_to_parent(&RpcNotification::new(
            "render_context_failed",
            serde_json::json!({ "message": err.to_string() }),
        ));
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        eprintln!("{err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_adapter_is_a_render_context_failure() {
        let err = require_adapter(None::<()>, "wgpu").unwrap_err();

        assert!(matches!(err, PlotError::RenderContextUnavailable(_)));
        assert_eq!(
            err.to_string(),
            "rendering context unavailable: wgpu returned no usable GPU adapter"
        );
    }

    #[test]
    fn found_adapter_is_passed_through() {
        assert_eq!(require_adapter(Some(7), "wgpu").unwrap(), 7);
    }
}
