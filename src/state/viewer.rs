//! Gesture engine for the fullscreen image viewer.
//!
//! Pure pointer arithmetic; the component layer feeds it coordinates from
//! mouse and touch events and applies the resulting transform as CSS. One
//! gesture is active at a time: a second finger promotes a drag to a pinch
//! and the drag is abandoned.

use crate::constants::gesture;

/// Visual transform applied to the viewed image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale: gesture::SCALE_MIN,
        }
    }
}

/// Navigation request produced by releasing a swipe past its threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwipeAction {
    Next,
    Prev,
    Info,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Phase {
    Idle,
    /// Horizontal feedback drag at rest scale. Tracks the raw pointer so
    /// the release decision can use the full displacement even though the
    /// visible offset is pinned to the x axis.
    Swiping {
        start_x: f64,
        start_y: f64,
        last_x: f64,
        last_y: f64,
    },
    /// Two-axis pan of a zoomed image, accumulated on top of the offset
    /// held when the drag began.
    Panning {
        start_x: f64,
        start_y: f64,
        base_x: f64,
        base_y: f64,
    },
    Pinching {
        start_dist: f64,
        start_scale: f64,
    },
}

pub struct GestureEngine {
    transform: Transform,
    phase: Phase,
}

impl Default for GestureEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureEngine {
    pub fn new() -> Self {
        Self {
            transform: Transform::default(),
            phase: Phase::Idle,
        }
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// Whether the view may animate toward the current transform. During a
    /// gesture the image must track the pointer directly; between gestures
    /// the snap-home is eased.
    pub fn animate(&self) -> bool {
        matches!(self.phase, Phase::Idle)
    }

    pub fn is_zoomed(&self) -> bool {
        self.transform.scale > gesture::PAN_SCALE_GATE
    }

    /// Back to the neutral transform, e.g. when the viewed image changes.
    pub fn reset(&mut self) {
        self.transform = Transform::default();
        self.phase = Phase::Idle;
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) {
        if matches!(self.phase, Phase::Pinching { .. }) {
            return;
        }
        self.phase = if self.is_zoomed() {
            Phase::Panning {
                start_x: x,
                start_y: y,
                base_x: self.transform.x,
                base_y: self.transform.y,
            }
        } else {
            Phase::Swiping {
                start_x: x,
                start_y: y,
                last_x: x,
                last_y: y,
            }
        };
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        match &mut self.phase {
            Phase::Swiping {
                start_x,
                last_x,
                last_y,
                ..
            } => {
                *last_x = x;
                *last_y = y;
                self.transform.x = x - *start_x;
                self.transform.y = 0.0;
            }
            Phase::Panning {
                start_x,
                start_y,
                base_x,
                base_y,
            } => {
                self.transform.x = *base_x + (x - *start_x);
                self.transform.y = *base_y + (y - *start_y);
            }
            Phase::Pinching { .. } | Phase::Idle => {}
        }
    }

    /// End the active drag. A released swipe snaps the offset home and, if
    /// the displacement cleared the threshold, reports the action: left
    /// beats right beats up when several thresholds are crossed at once.
    /// Exactly hitting the threshold does not fire.
    pub fn pointer_up(&mut self) -> Option<SwipeAction> {
        match self.phase {
            Phase::Swiping {
                start_x,
                start_y,
                last_x,
                last_y,
            } => {
                self.phase = Phase::Idle;
                self.transform.x = 0.0;
                self.transform.y = 0.0;
                let dx = last_x - start_x;
                let dy = last_y - start_y;
                if dx < -gesture::SWIPE_THRESHOLD_PX {
                    Some(SwipeAction::Next)
                } else if dx > gesture::SWIPE_THRESHOLD_PX {
                    Some(SwipeAction::Prev)
                } else if dy < -gesture::SWIPE_THRESHOLD_PX {
                    Some(SwipeAction::Info)
                } else {
                    None
                }
            }
            Phase::Panning { .. } => {
                self.phase = Phase::Idle;
                None
            }
            Phase::Pinching { .. } | Phase::Idle => None,
        }
    }

    /// Second finger landed; any drag in flight is abandoned.
    pub fn pinch_begin(&mut self, dist: f64) {
        if dist <= 0.0 {
            return;
        }
        self.phase = Phase::Pinching {
            start_dist: dist,
            start_scale: self.transform.scale,
        };
    }

    pub fn pinch_move(&mut self, dist: f64) {
        if let Phase::Pinching {
            start_dist,
            start_scale,
        } = self.phase
        {
            let factor = dist / start_dist;
            self.transform.scale =
                (start_scale * factor).clamp(gesture::SCALE_MIN, gesture::SCALE_MAX);
        }
    }

    pub fn pinch_end(&mut self) {
        if matches!(self.phase, Phase::Pinching { .. }) {
            self.phase = Phase::Idle;
            self.settle();
        }
    }

    /// Mouse-wheel zoom about the image center.
    pub fn wheel(&mut self, delta_y: f64) {
        let factor = if delta_y < 0.0 {
            gesture::WHEEL_ZOOM_STEP
        } else {
            1.0 / gesture::WHEEL_ZOOM_STEP
        };
        self.transform.scale =
            (self.transform.scale * factor).clamp(gesture::SCALE_MIN, gesture::SCALE_MAX);
        self.settle();
    }

    /// A fully zoomed-out image must not remain stranded at a pan offset.
    fn settle(&mut self) {
        if self.transform.scale <= gesture::SCALE_MIN {
            self.transform.x = 0.0;
            self.transform.y = 0.0;
        }
    }
}

/// Straight-line distance between two touch points.
pub fn touch_distance(ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    let dx = bx - ax;
    let dy = by - ay;
    (dx * dx + dy * dy).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swipe(engine: &mut GestureEngine, dx: f64, dy: f64) -> Option<SwipeAction> {
        engine.pointer_down(200.0, 300.0);
        engine.pointer_move(200.0 + dx, 300.0 + dy);
        engine.pointer_up()
    }

    #[test]
    fn starts_neutral() {
        let engine = GestureEngine::new();
        assert_eq!(engine.transform(), Transform { x: 0.0, y: 0.0, scale: 1.0 });
    }

    #[test]
    fn reset_returns_to_neutral_after_zoom_and_pan() {
        let mut engine = GestureEngine::new();
        engine.pinch_begin(100.0);
        engine.pinch_move(250.0);
        engine.pinch_end();
        engine.pointer_down(50.0, 50.0);
        engine.pointer_move(90.0, 10.0);
        engine.pointer_up();
        engine.reset();
        assert_eq!(engine.transform(), Transform { x: 0.0, y: 0.0, scale: 1.0 });
    }

    #[test]
    fn swipe_past_threshold_left_fires_next() {
        let mut engine = GestureEngine::new();
        assert_eq!(swipe(&mut engine, -51.0, 0.0), Some(SwipeAction::Next));
    }

    #[test]
    fn swipe_past_threshold_right_fires_prev() {
        let mut engine = GestureEngine::new();
        assert_eq!(swipe(&mut engine, 51.0, 0.0), Some(SwipeAction::Prev));
    }

    #[test]
    fn swipe_past_threshold_up_fires_info() {
        let mut engine = GestureEngine::new();
        assert_eq!(swipe(&mut engine, 0.0, -51.0), Some(SwipeAction::Info));
    }

    #[test]
    fn short_swipe_fires_nothing() {
        let mut engine = GestureEngine::new();
        assert_eq!(swipe(&mut engine, -49.0, 0.0), None);
        assert_eq!(swipe(&mut engine, 49.0, 0.0), None);
        assert_eq!(swipe(&mut engine, 0.0, -49.0), None);
    }

    #[test]
    fn exact_threshold_fires_nothing() {
        let mut engine = GestureEngine::new();
        assert_eq!(swipe(&mut engine, -50.0, 0.0), None);
        assert_eq!(swipe(&mut engine, 50.0, 0.0), None);
        assert_eq!(swipe(&mut engine, 0.0, -50.0), None);
    }

    #[test]
    fn leftward_component_wins_over_upward() {
        let mut engine = GestureEngine::new();
        assert_eq!(swipe(&mut engine, -60.0, -80.0), Some(SwipeAction::Next));
    }

    #[test]
    fn swipe_feedback_is_horizontal_only_and_snaps_home() {
        let mut engine = GestureEngine::new();
        engine.pointer_down(100.0, 100.0);
        engine.pointer_move(70.0, 140.0);
        let t = engine.transform();
        assert_eq!(t.x, -30.0);
        assert_eq!(t.y, 0.0);
        engine.pointer_up();
        let t = engine.transform();
        assert_eq!((t.x, t.y), (0.0, 0.0));
    }

    #[test]
    fn pinch_scale_is_clamped_high() {
        let mut engine = GestureEngine::new();
        engine.pinch_begin(100.0);
        engine.pinch_move(1000.0);
        assert_eq!(engine.transform().scale, 4.0);
    }

    #[test]
    fn pinch_scale_is_clamped_low() {
        let mut engine = GestureEngine::new();
        engine.pinch_begin(100.0);
        engine.pinch_move(20.0);
        assert_eq!(engine.transform().scale, 1.0);
    }

    #[test]
    fn pinch_scales_relative_to_its_starting_scale() {
        let mut engine = GestureEngine::new();
        engine.pinch_begin(100.0);
        engine.pinch_move(200.0);
        engine.pinch_end();
        assert_eq!(engine.transform().scale, 2.0);
        engine.pinch_begin(80.0);
        engine.pinch_move(120.0);
        assert_eq!(engine.transform().scale, 3.0);
    }

    #[test]
    fn zoomed_drag_pans_both_axes_and_persists() {
        let mut engine = GestureEngine::new();
        engine.pinch_begin(100.0);
        engine.pinch_move(200.0);
        engine.pinch_end();
        engine.pointer_down(300.0, 300.0);
        engine.pointer_move(320.0, 270.0);
        assert_eq!(engine.pointer_up(), None);
        let t = engine.transform();
        assert_eq!((t.x, t.y), (20.0, -30.0));

        engine.pointer_down(0.0, 0.0);
        engine.pointer_move(5.0, 5.0);
        engine.pointer_up();
        let t = engine.transform();
        assert_eq!((t.x, t.y), (25.0, -25.0));
    }

    #[test]
    fn drag_is_ignored_while_pinching() {
        let mut engine = GestureEngine::new();
        engine.pinch_begin(100.0);
        engine.pointer_down(10.0, 10.0);
        engine.pointer_move(200.0, 10.0);
        assert_eq!(engine.pointer_up(), None);
        engine.pinch_move(150.0);
        assert_eq!(engine.transform().scale, 1.5);
    }

    #[test]
    fn pinch_abandons_a_drag_in_flight() {
        let mut engine = GestureEngine::new();
        engine.pointer_down(10.0, 10.0);
        engine.pointer_move(40.0, 10.0);
        engine.pinch_begin(100.0);
        engine.pinch_move(300.0);
        assert_eq!(engine.transform().scale, 3.0);
        assert_eq!(engine.pointer_up(), None);
    }

    #[test]
    fn zooming_back_out_recenters_the_image() {
        let mut engine = GestureEngine::new();
        engine.pinch_begin(100.0);
        engine.pinch_move(300.0);
        engine.pinch_end();
        engine.pointer_down(0.0, 0.0);
        engine.pointer_move(80.0, 60.0);
        engine.pointer_up();
        engine.pinch_begin(300.0);
        engine.pinch_move(50.0);
        engine.pinch_end();
        let t = engine.transform();
        assert_eq!(t, Transform { x: 0.0, y: 0.0, scale: 1.0 });
    }

    #[test]
    fn wheel_zoom_honors_the_same_clamp() {
        let mut engine = GestureEngine::new();
        for _ in 0..40 {
            engine.wheel(-10.0);
        }
        assert_eq!(engine.transform().scale, 4.0);
        for _ in 0..40 {
            engine.wheel(10.0);
        }
        assert_eq!(engine.transform().scale, 1.0);
    }

    #[test]
    fn animation_is_suppressed_during_a_gesture() {
        let mut engine = GestureEngine::new();
        assert!(engine.animate());
        engine.pointer_down(0.0, 0.0);
        assert!(!engine.animate());
        engine.pointer_up();
        assert!(engine.animate());
    }

    #[test]
    fn touch_distance_is_euclidean() {
        assert_eq!(touch_distance(0.0, 0.0, 3.0, 4.0), 5.0);
        assert_eq!(touch_distance(1.0, 1.0, 1.0, 1.0), 0.0);
    }
}
