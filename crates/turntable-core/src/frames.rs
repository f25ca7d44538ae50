use crate::state::Direction;
use fnv::{FnvHashMap, FnvHashSet};

/// Where the frames of a rotation come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FrameSource {
    /// One image per viewing angle.
    Frames(Vec<String>),
    /// One wide sprite sheet holding `frame_count` angles side by side.
    Sheet { url: String, frame_count: usize },
}

/// Ordered, fixed-length set of frames with a wrapping cursor.
///
/// Frame resources are decoded by the host and handed back through
/// [`FrameSequence::resource_loaded`]; `I` is whatever image handle the host
/// paints with. In sheet mode every frame maps to resource 0.
pub struct FrameSequence<I> {
    source: FrameSource,
    current: usize,
    loaded: FnvHashMap<usize, I>,
    failed: FnvHashSet<usize>,
}

impl<I> FrameSequence<I> {
    pub fn new(source: FrameSource) -> Self {
        Self {
            source,
            current: 0,
            loaded: FnvHashMap::default(),
            failed: FnvHashSet::default(),
        }
    }

    pub fn from_frames(frames: Vec<String>) -> Self {
        Self::new(FrameSource::Frames(frames))
    }

    pub fn sheet(url: impl Into<String>, frame_count: usize) -> Self {
        Self::new(FrameSource::Sheet {
            url: url.into(),
            frame_count,
        })
    }

    pub fn source(&self) -> &FrameSource {
        &self.source
    }

    /// Number of frames (viewing angles) in the rotation.
    pub fn len(&self) -> usize {
        match &self.source {
            FrameSource::Frames(frames) => frames.len(),
            FrameSource::Sheet { frame_count, .. } => *frame_count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Index one step away from the current frame, wrapping at both ends.
    /// An empty sequence always yields 0.
    pub fn step_index(&self, direction: Direction) -> usize {
        let n = self.len();
        if n == 0 {
            return 0;
        }
        match direction {
            Direction::Backward => {
                if self.current == 0 {
                    n - 1
                } else {
                    self.current - 1
                }
            }
            Direction::Forward => {
                if self.current == n - 1 {
                    0
                } else {
                    self.current + 1
                }
            }
        }
    }

    /// Move the cursor one step and return the new index.
    pub fn advance(&mut self, direction: Direction) -> usize {
        self.current = self.step_index(direction);
        self.current
    }

    /// Locators to fetch. Sheet mode has a single resource.
    pub fn resources(&self) -> &[String] {
        match &self.source {
            FrameSource::Frames(frames) => frames,
            FrameSource::Sheet { url, .. } => std::slice::from_ref(url),
        }
    }

    /// Resources that still need loading, last-declared first.
    ///
    /// Hosts load these strictly one at a time in the yielded order.
    pub fn preload_order(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.resources()
            .iter()
            .enumerate()
            .rev()
            .filter(move |(i, _)| !self.is_settled_at(*i))
            .map(|(i, url)| (i, url.as_str()))
    }

    /// Store a decoded resource. Returns false for an out-of-range index.
    pub fn resource_loaded(&mut self, index: usize, image: I) -> bool {
        if index >= self.resources().len() {
            return false;
        }
        self.failed.remove(&index);
        self.loaded.insert(index, image);
        true
    }

    /// Record a resource that could not be loaded. Returns false for an
    /// out-of-range index.
    pub fn resource_failed(&mut self, index: usize) -> bool {
        if index >= self.resources().len() {
            return false;
        }
        self.loaded.remove(&index);
        self.failed.insert(index);
        true
    }

    fn is_settled_at(&self, index: usize) -> bool {
        self.loaded.contains_key(&index) || self.failed.contains(&index)
    }

    /// Every resource has either loaded or failed.
    pub fn is_settled(&self) -> bool {
        (0..self.resources().len()).all(|i| self.is_settled_at(i))
    }

    /// Frames can be rendered: the set is non-empty, fully settled, and at
    /// least one resource decoded.
    pub fn is_ready(&self) -> bool {
        !self.is_empty() && self.is_settled() && !self.loaded.is_empty()
    }

    pub fn loaded_count(&self) -> usize {
        self.loaded.len()
    }

    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }

    /// Decoded image for a frame, `None` if it failed or is not loaded yet.
    pub fn image_for(&self, frame_index: usize) -> Option<&I> {
        match &self.source {
            FrameSource::Frames(_) => self.loaded.get(&frame_index),
            FrameSource::Sheet { .. } => self.loaded.get(&0),
        }
    }

    pub fn current_image(&self) -> Option<&I> {
        self.image_for(self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("/img/{i}.jpg")).collect()
    }

    #[test]
    fn forward_wraps_from_last_to_first() {
        let mut seq = FrameSequence::<()>::from_frames(urls(3));
        assert_eq!(seq.advance(Direction::Forward), 1);
        assert_eq!(seq.advance(Direction::Forward), 2);
        assert_eq!(seq.advance(Direction::Forward), 0);
    }

    #[test]
    fn backward_wraps_from_first_to_last() {
        let mut seq = FrameSequence::<()>::from_frames(urls(4));
        assert_eq!(seq.advance(Direction::Backward), 3);
        assert_eq!(seq.advance(Direction::Backward), 2);
    }

    #[test]
    fn single_frame_stays_put() {
        let mut seq = FrameSequence::<()>::from_frames(urls(1));
        assert_eq!(seq.advance(Direction::Forward), 0);
        assert_eq!(seq.advance(Direction::Backward), 0);
    }

    #[test]
    fn empty_sequence_is_inert() {
        let mut seq = FrameSequence::<()>::from_frames(Vec::new());
        assert_eq!(seq.advance(Direction::Forward), 0);
        assert_eq!(seq.preload_order().count(), 0);
        assert!(!seq.is_ready());
    }

    #[test]
    fn preload_order_is_reverse_declared() {
        let seq = FrameSequence::<()>::from_frames(urls(3));
        let order: Vec<usize> = seq.preload_order().map(|(i, _)| i).collect();
        assert_eq!(order, vec![2, 1, 0]);
    }

    #[test]
    fn preload_order_skips_settled_resources() {
        let mut seq = FrameSequence::from_frames(urls(3));
        seq.resource_loaded(2, ());
        seq.resource_failed(1);
        let order: Vec<&str> = seq.preload_order().map(|(_, u)| u).collect();
        assert_eq!(order, vec!["/img/0.jpg"]);
    }

    #[test]
    fn ready_only_after_every_resource_settles() {
        let mut seq = FrameSequence::from_frames(urls(2));
        seq.resource_loaded(1, "b");
        assert!(!seq.is_ready());
        seq.resource_failed(0);
        assert!(seq.is_ready());
        assert_eq!(seq.image_for(0), None);
        assert_eq!(seq.image_for(1), Some(&"b"));
        assert_eq!((seq.loaded_count(), seq.failed_count()), (1, 1));
        assert_eq!(seq.current_image(), None);
        seq.advance(Direction::Forward);
        assert_eq!(seq.current_image(), Some(&"b"));
    }

    #[test]
    fn all_failed_is_never_ready() {
        let mut seq = FrameSequence::<()>::from_frames(urls(2));
        seq.resource_failed(0);
        seq.resource_failed(1);
        assert!(seq.is_settled());
        assert!(!seq.is_ready());
    }

    #[test]
    fn out_of_range_resources_are_rejected() {
        let mut seq = FrameSequence::from_frames(urls(2));
        assert!(!seq.resource_loaded(5, ()));
        assert!(!seq.resource_failed(2));
        assert_eq!(seq.loaded_count(), 0);
    }

    #[test]
    fn sheet_maps_every_frame_to_one_resource() {
        let mut seq = FrameSequence::sheet("/img/sheet.jpg", 36);
        assert_eq!(seq.len(), 36);
        assert_eq!(seq.resources().len(), 1);
        seq.resource_loaded(0, 7u8);
        assert!(seq.is_ready());
        assert_eq!(seq.image_for(35), Some(&7));
        assert_eq!(seq.advance(Direction::Backward), 35);
    }
}
