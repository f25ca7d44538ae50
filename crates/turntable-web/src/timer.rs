use turntable_core::Timer;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// `setTimeout`-backed single-shot timer. Every tick runs the same bound
/// callback, which forwards to the viewer.
pub struct TimeoutTimer {
    window: web::Window,
    callback: Option<Closure<dyn FnMut()>>,
}

impl TimeoutTimer {
    pub fn new(window: web::Window) -> Self {
        Self {
            window,
            callback: None,
        }
    }

    /// Install the tick callback. Must happen before the first schedule.
    pub fn bind(&mut self, callback: Closure<dyn FnMut()>) {
        self.callback = Some(callback);
    }
}

impl Timer for TimeoutTimer {
    type Handle = i32;

    fn schedule(&mut self, delay_ms: u32) -> i32 {
        let Some(callback) = &self.callback else {
            log::warn!("[timer] schedule before bind; tick dropped");
            return 0;
        };
        self.window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                delay_ms.min(i32::MAX as u32) as i32,
            )
            .unwrap_or_else(|e| {
                log::error!("[timer] setTimeout failed: {:?}", e);
                0
            })
    }

    fn cancel(&mut self, handle: i32) {
        // Clearing a fired or unknown handle is a no-op in the browser.
        self.window.clear_timeout_with_handle(handle);
    }
}
