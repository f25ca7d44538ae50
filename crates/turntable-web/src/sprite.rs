use crate::{css, dom};
use glam::Vec2;
use turntable_core::{FrameView, Renderer, TileLayout, Viewport};
use web_sys as web;

/// Shows one sprite sheet as the container background and walks its
/// horizontal offset one frame width per step.
pub struct SpriteRenderer {
    container: web::HtmlElement,
    frame_count: usize,
    sheet_size: Option<Vec2>,
    layout: Option<TileLayout>,
    viewport: Viewport,
}

impl SpriteRenderer {
    pub fn new(container: web::HtmlElement, frame_count: usize) -> Self {
        dom::set_style(&container, "background-position-x", "0");
        Self {
            container,
            frame_count,
            sheet_size: None,
            layout: None,
            viewport: Viewport::default(),
        }
    }

    fn relayout(&mut self) {
        let Some(sheet) = self.sheet_size else {
            return;
        };
        self.layout = TileLayout::compute(sheet, self.frame_count, self.viewport.height);
        if let Some(layout) = &self.layout {
            let el = &self.container;
            dom::set_style(el, "width", &css::px(layout.container_width));
            dom::set_style(el, "height", &css::px(layout.container_height));
            dom::set_style(el, "background-size", &css::px(layout.background_width));
        }
    }
}

impl Renderer for SpriteRenderer {
    type Image = web::HtmlImageElement;

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.relayout();
    }

    fn render(&mut self, frame: FrameView<'_, Self::Image>) {
        if let Some(layout) = &self.layout {
            let offset = layout.offset_for(frame.index);
            dom::set_style(&self.container, "background-position-x", &css::px(offset));
        }
    }

    fn resource_ready(&mut self, _index: usize, image: &Self::Image) {
        self.sheet_size = Some(Vec2::new(
            image.natural_width() as f32,
            image.natural_height() as f32,
        ));
        let el = &self.container;
        dom::set_style(el, "background-position", "");
        dom::set_style(el, "background-repeat", "");
        dom::set_style(el, "background-image", &css::url(&image.src()));
        dom::set_style(el, "background-position-x", "0");
        self.relayout();
    }

    fn clear(&mut self) {
        dom::set_style(&self.container, "background-position-x", "0");
    }
}
