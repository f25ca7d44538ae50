use crate::slot::CallbackSlot;
use crate::WebViewer;
use std::cell::RefCell;
use std::rc::Weak;
use turntable_core::ViewerError;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// Load and decode one image.
pub async fn load_image(url: &str) -> Result<web::HtmlImageElement, String> {
    let image = web::HtmlImageElement::new().map_err(|e| format!("{:?}", e))?;
    let promise = js_sys::Promise::new(&mut |resolve, reject| {
        image.set_onload(Some(&resolve));
        image.set_onerror(Some(&reject));
    });
    image.set_src(url);
    let result = JsFuture::from(promise).await;
    image.set_onload(None);
    image.set_onerror(None);
    result.map(|_| image).map_err(|e| {
        e.as_string()
            .unwrap_or_else(|| "image failed to load or decode".to_string())
    })
}

/// Load `queue` strictly one image at a time, in the given order, feeding
/// each result to the viewer. A failure is reported and loading moves on.
/// Stops early if the viewer is dropped. `on_complete` runs once the whole
/// queue has settled.
pub async fn preload_all(
    viewer: Weak<RefCell<WebViewer>>,
    queue: Vec<(usize, String)>,
    on_error: CallbackSlot<js_sys::Function>,
    on_complete: impl FnOnce(),
) {
    log::info!("[preload] loading {} resources", queue.len());
    for (index, url) in queue {
        let result = load_image(&url).await;
        let Some(shared) = viewer.upgrade() else {
            log::debug!("[preload] viewer dropped, abandoning queue");
            return;
        };
        let failure = {
            let mut v = shared.borrow_mut();
            match result {
                Ok(image) => {
                    v.resource_loaded(index, image);
                    None
                }
                Err(reason) => Some(v.resource_failed(index, reason)),
            }
        };
        if let Some(err) = failure {
            report(on_error.get().as_ref(), &err);
        }
    }
    on_complete();
}

fn report(on_error: Option<&js_sys::Function>, err: &ViewerError) {
    let Some(callback) = on_error else {
        return;
    };
    let (index, url) = match err {
        ViewerError::ResourceLoad { index, url, .. } => (*index as f64, url.as_str()),
        ViewerError::Config(_) => (-1.0, ""),
    };
    if let Err(e) = callback.call3(
        &JsValue::NULL,
        &JsValue::from_f64(index),
        &JsValue::from_str(url),
        &JsValue::from_str(&err.to_string()),
    ) {
        log::error!("[preload] onError callback threw: {:?}", e);
    }
}
