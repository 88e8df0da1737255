pub const MIN_ZOOM: f32 = 0.5;
pub const MAX_ZOOM: f32 = 3.0;
pub const ZOOM_STEP: f32 = 0.25;

/// Zoom and pan state of the image panel. View-only; never saved.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    zoom: f32,
    offset: (i32, i32),
    /// Pointer position minus offset at drag start.
    drag_origin: Option<(i32, i32)>,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            offset: (0, 0),
            drag_origin: None,
        }
    }
}

impl Viewport {
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn offset(&self) -> (i32, i32) {
        self.offset
    }

    pub fn zoom_percent(&self) -> u32 {
        (self.zoom * 100.0).round() as u32
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_origin.is_some()
    }

    /// Panning only applies while zoomed in.
    pub fn can_pan(&self) -> bool {
        self.zoom > 1.0
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom + ZOOM_STEP).min(MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom - ZOOM_STEP).max(MIN_ZOOM);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn begin_drag(&mut self, x: i32, y: i32) {
        if self.can_pan() {
            self.drag_origin = Some((x - self.offset.0, y - self.offset.1));
        }
    }

    pub fn drag_to(&mut self, x: i32, y: i32) {
        if let Some((ox, oy)) = self.drag_origin
            && self.can_pan()
        {
            self.offset = (x - ox, y - oy);
        }
    }

    pub fn end_drag(&mut self) {
        self.drag_origin = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_is_clamped() {
        let mut v = Viewport::default();
        for _ in 0..20 {
            v.zoom_in();
        }
        assert_eq!(v.zoom(), MAX_ZOOM);
        for _ in 0..20 {
            v.zoom_out();
        }
        assert_eq!(v.zoom(), MIN_ZOOM);
        assert_eq!(v.zoom_percent(), 50);
    }

    #[test]
    fn drag_ignored_at_base_zoom() {
        let mut v = Viewport::default();
        v.begin_drag(10, 10);
        v.drag_to(50, 0);
        assert!(!v.is_dragging());
        assert_eq!(v.offset(), (0, 0));
    }

    #[test]
    fn drag_moves_relative_to_start() {
        let mut v = Viewport::default();
        v.zoom_in();
        v.zoom_in();
        v.zoom_in();
        v.zoom_in();
        assert_eq!(v.zoom(), 2.0);

        v.begin_drag(100, 100);
        v.drag_to(140, 90);
        assert_eq!(v.offset(), (40, -10));
        v.end_drag();

        // A second drag continues from the current offset.
        v.begin_drag(0, 0);
        v.drag_to(5, 5);
        assert_eq!(v.offset(), (45, -5));
        v.end_drag();
        v.drag_to(500, 500);
        assert_eq!(v.offset(), (45, -5));
    }

    #[test]
    fn reset_restores_origin() {
        let mut v = Viewport::default();
        v.zoom_in();
        v.zoom_in();
        v.begin_drag(0, 0);
        v.drag_to(3, 4);
        v.reset();
        assert_eq!(v, Viewport::default());
    }
}
