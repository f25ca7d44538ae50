use crate::css;
use turntable_core::Viewport;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn query_html_element(
    document: &web::Document,
    selector: &str,
) -> anyhow::Result<web::HtmlElement> {
    document
        .query_selector(selector)
        .map_err(|e| anyhow::anyhow!("bad selector {}: {:?}", selector, e))?
        .ok_or_else(|| anyhow::anyhow!("missing {}", selector))?
        .dyn_into::<web::HtmlElement>()
        .map_err(|_| anyhow::anyhow!("{} is not an HTML element", selector))
}

#[inline]
pub fn set_style(el: &web::HtmlElement, property: &str, value: &str) {
    if let Err(e) = el.style().set_property(property, value) {
        log::warn!("[dom] set {}={} failed: {:?}", property, value, e);
    }
}

/// Centred, unrepeated loader image as the element background.
pub fn show_loader(el: &web::HtmlElement, loader_url: &str) {
    set_style(el, "background-image", &css::url(loader_url));
    set_style(el, "background-position", "center");
    set_style(el, "background-repeat", "no-repeat");
}

pub fn clear_loader(el: &web::HtmlElement) {
    set_style(el, "background-image", "");
    set_style(el, "background-position", "");
    set_style(el, "background-repeat", "");
}

/// Where the viewer's size comes from: the container itself, or for sprite
/// sheets the height of the surrounding slider slot.
#[derive(Clone)]
pub struct Geometry {
    pub container: web::HtmlElement,
    pub slider: Option<web::HtmlElement>,
}

impl Geometry {
    pub fn viewport(&self) -> Viewport {
        let width = self.container.offset_width() as f32;
        let height = match &self.slider {
            Some(slider) => slider.client_height() as f32,
            None => self.container.offset_height() as f32,
        };
        Viewport::new(width, height)
    }
}
