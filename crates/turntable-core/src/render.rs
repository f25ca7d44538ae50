use glam::Vec2;

/// Size of the host display area in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// The frame the loop wants on screen.
#[derive(Debug)]
pub struct FrameView<'a, I> {
    pub index: usize,
    /// `None` when the resource for this frame failed to load.
    pub image: Option<&'a I>,
}

/// Paints one frame. Implementations differ only in the paint primitive;
/// stepping and timing belong to the viewer.
pub trait Renderer {
    type Image;

    /// Recompute geometry after show or a viewport change.
    fn resize(&mut self, viewport: Viewport);

    fn render(&mut self, frame: FrameView<'_, Self::Image>);

    /// A resource finished decoding.
    fn resource_ready(&mut self, _index: usize, _image: &Self::Image) {}

    /// The viewer was hidden.
    fn clear(&mut self) {}
}
