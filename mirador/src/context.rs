//! Per-frame context
//!
//! One immutable value per tick, passed by reference into every
//! input/update/render stage. Delta time is computed once by the driving
//! loop from a monotonic clock, so all motion is frame-rate independent.

/// Immutable facts about the current frame
#[derive(Clone, Copy, Debug)]
pub struct FrameContext {
    /// Seconds since the previous tick
    pub dt: f32,
    pub window_width: u32,
    pub window_height: u32,
}

impl FrameContext {
    pub fn new(dt: f32, window_width: u32, window_height: u32) -> Self {
        Self {
            dt,
            window_width,
            window_height,
        }
    }

    /// Centre of the window in pixels, used by mouse-look
    pub fn window_centre(&self) -> (i32, i32) {
        (
            (self.window_width / 2) as i32,
            (self.window_height / 2) as i32,
        )
    }
}
