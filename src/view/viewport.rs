use crate::{pos, Pos, Vec2};

pub const MIN_SCALE: f64 = 1.0;
pub const DEFAULT_SCALE: f64 = 4.0;
pub const MAX_SCALE: f64 = 32.0;

/// scale factor of one wheel notch; zooming out applies the exact
/// reciprocal so an in/out pair lands back on the starting scale.
pub const ZOOM_STEP: f64 = 1.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Gesture {
    Idle,
    Panning { anchor: Vec2, start_offset: Vec2 },
}

/// the camera mapping world (grid) coordinates to screen character cells.
///
/// `scale` is the edge length of one world cell on screen, `offset` the
/// screen position of world origin (0, 0). both only change through the
/// pan gesture, a zoom notch, a keyboard nudge or an explicit recenter.
#[derive(Debug, Clone)]
pub struct Viewport {
    scale: f64,
    offset: Vec2,
    gesture: Gesture,
    width: f64,
    height: f64,
}

impl Viewport {
    /// a viewport over a `width` x `height` surface, centered on world
    /// cell (0, 0) at the default scale.
    pub fn new(width: f64, height: f64) -> Self {
        let mut viewport = Self {
            scale: DEFAULT_SCALE,
            offset: Vec2::default(),
            gesture: Gesture::Idle,
            width,
            height,
        };
        viewport.recenter();
        viewport
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn is_panning(&self) -> bool {
        matches!(self.gesture, Gesture::Panning { .. })
    }

    pub fn screen_to_world(&self, px: f64, py: f64) -> (f64, f64) {
        (
            (px - self.offset.x) / self.scale,
            (py - self.offset.y) / self.scale,
        )
    }

    pub fn world_to_screen(&self, wx: f64, wy: f64) -> (f64, f64) {
        (
            wx * self.scale + self.offset.x,
            wy * self.scale + self.offset.y,
        )
    }

    /// starts a pan gesture anchored at the passed screen position.
    /// starting while already panning re-anchors the gesture there; the
    /// terminal may never deliver the matching release event.
    pub fn begin_pan(&mut self, px: f64, py: f64) {
        self.gesture = Gesture::Panning {
            anchor: Vec2::new(px, py),
            start_offset: self.offset,
        };
    }

    /// moves the view by the drag since the anchor; ignored while idle.
    pub fn update_pan(&mut self, px: f64, py: f64) {
        if let Gesture::Panning {
            anchor,
            start_offset,
        } = self.gesture
        {
            self.offset = start_offset + (Vec2::new(px, py) - anchor);
        }
    }

    pub fn end_pan(&mut self) {
        self.gesture = Gesture::Idle;
    }

    /// applies one zoom notch anchored at the passed screen position: the
    /// world point under it stays put on screen. a notch that would push
    /// the scale out of bounds leaves scale and offset both untouched.
    pub fn zoom_at(&mut self, px: f64, py: f64, direction: ZoomDirection) {
        let factor = match direction {
            ZoomDirection::In => ZOOM_STEP,
            ZoomDirection::Out => 1.0 / ZOOM_STEP,
        };
        let new_scale = self.scale * factor;
        if !(MIN_SCALE..=MAX_SCALE).contains(&new_scale) {
            return;
        }

        let (wx, wy) = self.screen_to_world(px, py);
        self.scale = new_scale;
        self.offset = Vec2::new(px - wx * new_scale, py - wy * new_scale);
    }

    /// records the new surface size; offset and scale are preserved.
    pub fn on_resize(&mut self, new_width: f64, new_height: f64) {
        self.width = new_width;
        self.height = new_height;
    }

    /// unconditional translation, used for keyboard nudges. not part of
    /// the pointer gesture machine.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.offset = self.offset + Vec2::new(dx, dy);
    }

    /// restores the centering default for the current surface size,
    /// keeping the current scale.
    pub fn recenter(&mut self) {
        self.offset = Vec2::new(
            self.width / 2.0 - self.scale / 2.0,
            self.height / 2.0 - self.scale / 2.0,
        );
    }

    /// inclusive range of world cells overlapping the surface.
    pub fn visible_bounds(&self) -> (Pos, Pos) {
        let (left, top) = self.screen_to_world(0.0, 0.0);
        let (right, bottom) = self.screen_to_world(self.width, self.height);
        (
            pos!(left.floor() as i64, top.floor() as i64),
            pos!(right.floor() as i64, bottom.floor() as i64),
        )
    }
}
