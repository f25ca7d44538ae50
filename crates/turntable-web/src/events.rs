//! DOM listener wiring.
//!
//! Listeners exist only while the viewer is shown: [`subscribe`] builds them
//! on show and dropping the returned [`Subscriptions`] on hide detaches them.
//! Move/up/cancel listeners on the document are attached only for the length
//! of a drag.

use crate::dom::{self, Geometry};
use crate::WebViewer;
use instant::Instant;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// One event listener that can be attached and detached repeatedly. The
/// closure lives as long as the guard, so detaching from inside its own
/// callback is safe.
pub struct Listener {
    target: web::EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
    attached: bool,
}

impl Listener {
    pub fn new(
        target: web::EventTarget,
        event: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> Self {
        Self {
            target,
            event,
            closure: Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>),
            attached: false,
        }
    }

    pub fn attach(&mut self) {
        if self.attached {
            return;
        }
        match self
            .target
            .add_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref())
        {
            Ok(()) => self.attached = true,
            Err(e) => log::warn!("[events] attach {} failed: {:?}", self.event, e),
        }
    }

    pub fn detach(&mut self) {
        if !self.attached {
            return;
        }
        _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
        self.attached = false;
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        self.detach();
    }
}

struct DragListeners {
    pointer_move: Listener,
    pointer_up: Listener,
    pointer_cancel: Listener,
}

impl DragListeners {
    fn attach(&mut self) {
        self.pointer_move.attach();
        self.pointer_up.attach();
        self.pointer_cancel.attach();
    }

    fn detach(&mut self) {
        self.pointer_move.detach();
        self.pointer_up.detach();
        self.pointer_cancel.detach();
    }
}

/// Live listeners for one shown viewer.
pub struct Subscriptions {
    _resize: Listener,
    _pointer_down: Option<Listener>,
    _drag: Option<Rc<RefCell<DragListeners>>>,
}

fn with_viewer(viewer: &Weak<RefCell<WebViewer>>, f: impl FnOnce(&mut WebViewer)) {
    let Some(viewer) = viewer.upgrade() else {
        return;
    };
    match viewer.try_borrow_mut() {
        Ok(mut v) => f(&mut v),
        Err(_) => log::warn!("[events] viewer busy; event dropped"),
    };
}

#[inline]
fn page_x(ev: &web::Event) -> Option<f64> {
    ev.dyn_ref::<web::MouseEvent>().map(|m| m.page_x() as f64)
}

#[inline]
fn elapsed_ms(epoch: Instant) -> f64 {
    epoch.elapsed().as_secs_f64() * 1000.0
}

pub fn subscribe(
    viewer: &Rc<RefCell<WebViewer>>,
    geometry: &Geometry,
    window: &web::Window,
    document: &web::Document,
    epoch: Instant,
) -> Subscriptions {
    // resize
    let mut resize = {
        let viewer = Rc::downgrade(viewer);
        let geometry = geometry.clone();
        Listener::new(window.clone().into(), "resize", move |_ev| {
            let viewport = geometry.viewport();
            with_viewer(&viewer, |v| v.resize(viewport));
        })
    };
    resize.attach();

    if !viewer.borrow().drag_enabled() {
        return Subscriptions {
            _resize: resize,
            _pointer_down: None,
            _drag: None,
        };
    }

    // Keep touch drags from being taken over as page pans.
    dom::set_style(&geometry.container, "touch-action", "none");

    // pointermove / pointerup / pointercancel, attached only during a drag
    let drag = Rc::new_cyclic(|drag_weak: &Weak<RefCell<DragListeners>>| {
        let viewer_move = Rc::downgrade(viewer);
        let pointer_move = Listener::new(document.clone().into(), "pointermove", move |ev| {
            if let Some(x) = page_x(&ev) {
                with_viewer(&viewer_move, |v| v.pointer_move(x));
            }
        });

        let viewer_up = Rc::downgrade(viewer);
        let drag_up = drag_weak.clone();
        let pointer_up = Listener::new(document.clone().into(), "pointerup", move |ev| {
            if let Some(drag) = drag_up.upgrade() {
                drag.borrow_mut().detach();
            }
            if let Some(x) = page_x(&ev) {
                let t = elapsed_ms(epoch);
                with_viewer(&viewer_up, |v| {
                    v.pointer_up(x, t);
                });
            }
        });

        let viewer_cancel = Rc::downgrade(viewer);
        let drag_cancel = drag_weak.clone();
        let pointer_cancel = Listener::new(document.clone().into(), "pointercancel", move |_ev| {
            if let Some(drag) = drag_cancel.upgrade() {
                drag.borrow_mut().detach();
            }
            let t = elapsed_ms(epoch);
            with_viewer(&viewer_cancel, |v| v.pointer_cancel(t));
        });

        RefCell::new(DragListeners {
            pointer_move,
            pointer_up,
            pointer_cancel,
        })
    });

    // pointerdown on the container
    let mut pointer_down = {
        let viewer = Rc::downgrade(viewer);
        let drag = Rc::downgrade(&drag);
        Listener::new(geometry.container.clone().into(), "pointerdown", move |ev| {
            let Some(x) = page_x(&ev) else {
                return;
            };
            let t = elapsed_ms(epoch);
            with_viewer(&viewer, |v| v.pointer_down(x, t));
            if let Some(drag) = drag.upgrade() {
                drag.borrow_mut().attach();
            }
            ev.prevent_default();
        })
    };
    pointer_down.attach();

    Subscriptions {
        _resize: resize,
        _pointer_down: Some(pointer_down),
        _drag: Some(drag),
    }
}
