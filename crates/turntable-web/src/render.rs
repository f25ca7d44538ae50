use crate::canvas::CanvasRenderer;
use crate::sprite::SpriteRenderer;
use turntable_core::{FrameView, Renderer, Viewport};
use web_sys as web;

/// Paint strategy picked from the configured render mode.
pub enum WebRenderer {
    Canvas(CanvasRenderer),
    Sprite(SpriteRenderer),
}

impl WebRenderer {
    pub fn is_sprite(&self) -> bool {
        matches!(self, WebRenderer::Sprite(_))
    }
}

impl Renderer for WebRenderer {
    type Image = web::HtmlImageElement;

    fn resize(&mut self, viewport: Viewport) {
        match self {
            WebRenderer::Canvas(r) => r.resize(viewport),
            WebRenderer::Sprite(r) => r.resize(viewport),
        }
    }

    fn render(&mut self, frame: FrameView<'_, Self::Image>) {
        match self {
            WebRenderer::Canvas(r) => r.render(frame),
            WebRenderer::Sprite(r) => r.render(frame),
        }
    }

    fn resource_ready(&mut self, index: usize, image: &Self::Image) {
        match self {
            WebRenderer::Canvas(r) => r.resource_ready(index, image),
            WebRenderer::Sprite(r) => r.resource_ready(index, image),
        }
    }

    fn clear(&mut self) {
        match self {
            WebRenderer::Canvas(r) => r.clear(),
            WebRenderer::Sprite(r) => r.clear(),
        }
    }
}
