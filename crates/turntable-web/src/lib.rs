#![cfg(target_arch = "wasm32")]
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use turntable_core::{RenderMode, ShowOutcome, Viewer, ViewerConfig};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod canvas;
mod css;
mod dom;
mod events;
mod preload;
mod render;
mod slot;
mod sprite;
mod timer;

use render::WebRenderer;
use slot::CallbackSlot;
use timer::TimeoutTimer;

pub(crate) type WebViewer = Viewer<WebRenderer, TimeoutTimer>;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("turntable-web loaded");
    Ok(())
}

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// 360° product viewer bound to one container element.
///
/// ```js
/// const player = new Player3d({ frames: [...], intervalDefault: 200 });
/// player.show();
/// ```
#[wasm_bindgen]
pub struct Player3d {
    viewer: Rc<RefCell<WebViewer>>,
    subscriptions: Option<events::Subscriptions>,
    geometry: dom::Geometry,
    window: web::Window,
    document: web::Document,
    loader_url: String,
    preloading: Rc<Cell<bool>>,
    on_error: CallbackSlot<js_sys::Function>,
    epoch: Instant,
}

#[wasm_bindgen]
impl Player3d {
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<Player3d, JsValue> {
        let config: ViewerConfig = serde_wasm_bindgen::from_value(options).map_err(js_err)?;
        config.validate().map_err(js_err)?;
        Self::build(config).map_err(|e| js_err(format!("{:#}", e)))
    }

    /// Start rotating, loading frames first if needed.
    pub fn show(&mut self) {
        if self.subscriptions.is_none() {
            self.subscriptions = Some(events::subscribe(
                &self.viewer,
                &self.geometry,
                &self.window,
                &self.document,
                self.epoch,
            ));
        }
        let outcome = self.viewer.borrow_mut().show(self.geometry.viewport());
        match outcome {
            ShowOutcome::Started => {}
            ShowOutcome::NeedsPreload => self.begin_preload(),
            ShowOutcome::Unavailable => log::warn!("[player] no frames available"),
        }
    }

    /// Stop rotating and detach every listener.
    pub fn hide(&mut self) {
        self.viewer.borrow_mut().hide();
        self.subscriptions = None;
    }

    /// Register `callback(index, url, message)` for frames that fail to load.
    #[wasm_bindgen(js_name = onError)]
    pub fn set_on_error(&mut self, callback: js_sys::Function) {
        self.on_error.set(callback);
    }

    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> usize {
        self.viewer.borrow().frames().current_index()
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.viewer.borrow().is_running()
    }
}

impl Player3d {
    fn build(config: ViewerConfig) -> anyhow::Result<Self> {
        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| anyhow::anyhow!("no document"))?;
        let container = dom::query_html_element(&document, &config.container)?;

        let (renderer, slider) = match &config.mode {
            RenderMode::Frames => (
                WebRenderer::Canvas(canvas::CanvasRenderer::attach(&document, &container)?),
                None,
            ),
            RenderMode::Sprite { frame_count, .. } => {
                let slider = dom::query_html_element(&document, &config.slider)
                    .map_err(|e| log::warn!("[player] {}; sizing from container", e))
                    .ok();
                (
                    WebRenderer::Sprite(sprite::SpriteRenderer::new(
                        container.clone(),
                        *frame_count,
                    )),
                    slider,
                )
            }
        };

        if let Some(selector) = &config.preview {
            match (dom::query_html_element(&document, selector), config.first_frame()) {
                (Ok(preview), Some(first)) => {
                    let background = css::preview_background(&config.preview_overlay_url, first);
                    dom::set_style(&preview, "background", &background);
                    dom::set_style(&preview, "background-size", css::PREVIEW_BACKGROUND_SIZE);
                }
                (Err(e), _) => log::warn!("[player] preview: {}", e),
                (Ok(_), None) => {}
            }
        }

        let viewer = Rc::new(RefCell::new(Viewer::new(
            &config,
            renderer,
            TimeoutTimer::new(window.clone()),
        )));
        bind_tick(&viewer);

        log::info!(
            "[player] {} frames, {}ms default interval, drag {}",
            viewer.borrow().frames().len(),
            config.effective_interval(),
            if config.mouse_handling { "on" } else { "off" }
        );

        Ok(Self {
            viewer,
            subscriptions: None,
            geometry: dom::Geometry { container, slider },
            window,
            document,
            loader_url: config.loader_url,
            preloading: Rc::new(Cell::new(false)),
            on_error: CallbackSlot::default(),
            epoch: Instant::now(),
        })
    }

    fn begin_preload(&mut self) {
        if self.preloading.replace(true) {
            return;
        }
        let queue: Vec<(usize, String)> = self
            .viewer
            .borrow()
            .frames()
            .preload_order()
            .map(|(i, url)| (i, url.to_string()))
            .collect();
        let container = self.geometry.container.clone();
        dom::show_loader(&container, &self.loader_url);

        let weak = Rc::downgrade(&self.viewer);
        let viewer_done = weak.clone();
        let preloading = self.preloading.clone();
        let on_error = self.on_error.clone();
        spawn_local(async move {
            preload::preload_all(weak, queue, on_error, move || {
                preloading.set(false);
                // The sprite renderer replaces the loader with the sheet itself.
                let sheet_shown = viewer_done.upgrade().map_or(false, |v| {
                    let v = v.borrow();
                    v.renderer().is_sprite() && v.frames().loaded_count() > 0
                });
                if !sheet_shown {
                    dom::clear_loader(&container);
                }
            })
            .await;
        });
    }
}

impl Drop for Player3d {
    fn drop(&mut self) {
        // Cancels the pending timeout before its callback is freed.
        if let Ok(mut v) = self.viewer.try_borrow_mut() {
            v.hide();
        }
    }
}

/// Route timer expiries back into the viewer without an `Rc` cycle.
fn bind_tick(viewer: &Rc<RefCell<WebViewer>>) {
    let weak = Rc::downgrade(viewer);
    let tick = Closure::wrap(Box::new(move || {
        let Some(viewer) = weak.upgrade() else {
            return;
        };
        match viewer.try_borrow_mut() {
            Ok(mut v) => v.tick(),
            Err(_) => log::warn!("[player] tick while viewer busy; skipped"),
        };
    }) as Box<dyn FnMut()>);
    viewer.borrow_mut().timer_mut().bind(tick);
}
