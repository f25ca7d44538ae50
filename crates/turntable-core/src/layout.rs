//! Geometry for the two paint strategies.

use glam::Vec2;

/// Destination rectangle for a discrete frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawRect {
    pub origin: Vec2,
    pub size: Vec2,
}

/// Fit an image into a box: never upscale, shrink to the box height, keep the
/// aspect ratio and centre it. Returns `None` for degenerate image sizes.
pub fn fit_frame(box_size: Vec2, image_size: Vec2) -> Option<DrawRect> {
    if image_size.x <= 0.0 || image_size.y <= 0.0 {
        return None;
    }
    let scale = (box_size.y / image_size.y).min(1.0).max(0.0);
    let size = image_size * scale;
    Some(DrawRect {
        origin: box_size * 0.5 - size * 0.5,
        size,
    })
}

/// Container and background sizing for a horizontal sprite sheet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileLayout {
    pub frame_count: usize,
    /// Exact on-screen width of one frame; every step shifts by this much.
    pub container_width: f32,
    pub container_height: f32,
    /// CSS `background-size` width for the whole sheet.
    pub background_width: f32,
    /// Largest offset magnitude before wrapping back to 0.
    pub limit_shift: f32,
}

impl TileLayout {
    /// `slot_height` is the height available to the viewer. The container
    /// width is floored to whole pixels so offsets stay frame-aligned, and the
    /// height follows from it.
    pub fn compute(sheet_size: Vec2, frame_count: usize, slot_height: f32) -> Option<Self> {
        if frame_count == 0 || sheet_size.x <= 0.0 || sheet_size.y <= 0.0 {
            return None;
        }
        let n = frame_count as f32;
        let base_height = sheet_size.y.min(slot_height.max(0.0));
        let frame_width = sheet_size.x / n;
        let coefficient = sheet_size.y / frame_width;
        let container_width = (base_height / coefficient).floor();
        Some(Self {
            frame_count,
            container_width,
            container_height: container_width * coefficient,
            background_width: container_width * n,
            limit_shift: container_width * (n - 1.0),
        })
    }

    /// Horizontal background offset that shows `index`. Stepping forward from
    /// the last frame wraps the offset back to 0.
    pub fn offset_for(&self, index: usize) -> f32 {
        let index = if self.frame_count == 0 {
            0
        } else {
            index % self.frame_count
        };
        0.0 - index as f32 * self.container_width
    }
}
