//! Browser scheduling and DOM lookup

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, Window};

use super::{FrameHandle, IntervalHandle, StartupError};

impl From<StartupError> for JsValue {
    fn from(err: StartupError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

pub fn window() -> Result<Window, StartupError> {
    web_sys::window().ok_or(StartupError::NoWindow)
}

pub fn document() -> Result<Document, StartupError> {
    window()?.document().ok_or(StartupError::NoDocument)
}

/// Required element by CSS selector
pub fn require_element(
    document: &Document,
    selector: &'static str,
) -> Result<Element, StartupError> {
    document
        .query_selector(selector)
        .map_err(|e| StartupError::Js(format!("{:?}", e)))?
        .ok_or(StartupError::MissingElement(selector))
}

/// The first `<canvas>` on the page and its 2D context
pub fn require_canvas(
    document: &Document,
) -> Result<(HtmlCanvasElement, CanvasRenderingContext2d), StartupError> {
    let canvas: HtmlCanvasElement = require_element(document, "canvas")?
        .dyn_into()
        .map_err(|_| StartupError::WrongElementType("canvas"))?;
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(|e| StartupError::Js(format!("{:?}", e)))?
        .ok_or(StartupError::NoContext2d)?
        .dyn_into()
        .map_err(|_| StartupError::NoContext2d)?;
    Ok((canvas, ctx))
}

/// Run `f` on the next display refresh
pub fn request_animation_frame(f: impl FnOnce(f64) + 'static) -> Option<FrameHandle> {
    let window = web_sys::window()?;
    let callback = Closure::once_into_js(f);
    match window.request_animation_frame(callback.unchecked_ref()) {
        Ok(id) => Some(FrameHandle(id)),
        Err(e) => {
            log::warn!("requestAnimationFrame failed: {:?}", e);
            None
        }
    }
}

pub fn cancel_animation_frame(handle: FrameHandle) {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.cancel_animation_frame(handle.0) {
            log::warn!("cancelAnimationFrame failed: {:?}", e);
        }
    }
}

/// Run `f` every `millis` until cleared
pub fn set_interval(f: impl FnMut() + 'static, millis: i32) -> Option<IntervalHandle> {
    let window = web_sys::window()?;
    let closure = Closure::<dyn FnMut()>::new(f);
    let id = window
        .set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            millis,
        )
        .map_err(|e| log::warn!("setInterval failed: {:?}", e))
        .ok()?;
    closure.forget();
    Some(IntervalHandle(id))
}

pub fn clear_interval(handle: IntervalHandle) {
    if let Some(window) = web_sys::window() {
        window.clear_interval_with_handle(handle.0);
    }
}

/// Run `f` after the current synchronous pass (zero-delay timeout)
pub fn defer(f: impl FnOnce() + 'static) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let callback = Closure::once_into_js(f);
    if let Err(e) =
        window.set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), 0)
    {
        log::warn!("setTimeout failed: {:?}", e);
    }
}
