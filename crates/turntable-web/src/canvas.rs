use glam::Vec2;
use turntable_core::{fit_frame, FrameView, Renderer, Viewport};
use wasm_bindgen::JsCast;
use web_sys as web;

/// Draws discrete frames onto a canvas appended to the container.
pub struct CanvasRenderer {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
}

impl CanvasRenderer {
    pub fn attach(document: &web::Document, container: &web::HtmlElement) -> anyhow::Result<Self> {
        let canvas: web::HtmlCanvasElement = document
            .create_element("canvas")
            .map_err(|e| anyhow::anyhow!("create canvas: {:?}", e))?
            .dyn_into()
            .map_err(|_| anyhow::anyhow!("canvas element has the wrong type"))?;
        let ctx: web::CanvasRenderingContext2d = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!("2d context: {:?}", e))?
            .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
            .dyn_into()
            .map_err(|_| anyhow::anyhow!("2d context has the wrong type"))?;
        container
            .append_child(&canvas)
            .map_err(|e| anyhow::anyhow!("append canvas: {:?}", e))?;
        Ok(Self { canvas, ctx })
    }
}

impl Renderer for CanvasRenderer {
    type Image = web::HtmlImageElement;

    fn resize(&mut self, viewport: Viewport) {
        // Collapse first so a relatively sized container can shrink.
        self.canvas.set_width(0);
        self.canvas.set_height(0);
        self.canvas.set_width(viewport.width.max(0.0) as u32);
        self.canvas.set_height(viewport.height.max(0.0) as u32);
    }

    fn render(&mut self, frame: FrameView<'_, Self::Image>) {
        let Some(image) = frame.image else {
            return;
        };
        let box_size = Vec2::new(self.canvas.width() as f32, self.canvas.height() as f32);
        let image_size = Vec2::new(image.natural_width() as f32, image.natural_height() as f32);
        let Some(rect) = fit_frame(box_size, image_size) else {
            return;
        };
        self.ctx
            .clear_rect(0.0, 0.0, box_size.x as f64, box_size.y as f64);
        if let Err(e) = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
            image,
            rect.origin.x as f64,
            rect.origin.y as f64,
            rect.size.x as f64,
            rect.size.y as f64,
        ) {
            log::warn!("[canvas] draw frame {} failed: {:?}", frame.index, e);
        }
    }
}

impl Drop for CanvasRenderer {
    fn drop(&mut self) {
        self.canvas.remove();
    }
}
