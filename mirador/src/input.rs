//! Polled input state
//!
//! Key and mouse state is polled, not event-pushed: the embedding writes
//! into [`InputState`] as OS events arrive, and consumers read it during
//! `handle_input`. Edges are reset explicitly by whoever handles them
//! (`set_key_up`, `set_scroll_up(false)`, ...) - nothing auto-clears.
//!
//! Mouse-look consumes the offset from the window centre and then stores
//! the centre back into the state; while the pointer is captured the
//! embedding is expected to warp the real pointer to that stored position
//! once per frame.

/// Snapshot of keyboard and mouse state
pub struct InputState {
    keys: [bool; 256],
    mouse_x: i32,
    mouse_y: i32,
    mouse_left: bool,
    mouse_right: bool,
    scroll_up: bool,
    scroll_down: bool,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            keys: [false; 256],
            mouse_x: 0,
            mouse_y: 0,
            mouse_left: false,
            mouse_right: false,
            scroll_up: false,
            scroll_down: false,
        }
    }
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_key_down(&mut self, key: u8) {
        self.keys[key as usize] = true;
    }

    pub fn set_key_up(&mut self, key: u8) {
        self.keys[key as usize] = false;
    }

    pub fn is_key_down(&self, key: u8) -> bool {
        self.keys[key as usize]
    }

    pub fn set_mouse_position(&mut self, x: i32, y: i32) {
        self.mouse_x = x;
        self.mouse_y = y;
    }

    pub fn mouse_position(&self) -> (i32, i32) {
        (self.mouse_x, self.mouse_y)
    }

    pub fn set_mouse_left(&mut self, down: bool) {
        self.mouse_left = down;
    }

    pub fn mouse_left(&self) -> bool {
        self.mouse_left
    }

    pub fn set_mouse_right(&mut self, down: bool) {
        self.mouse_right = down;
    }

    pub fn mouse_right(&self) -> bool {
        self.mouse_right
    }

    pub fn set_scroll_up(&mut self, active: bool) {
        self.scroll_up = active;
    }

    pub fn scroll_up(&self) -> bool {
        self.scroll_up
    }

    pub fn set_scroll_down(&mut self, active: bool) {
        self.scroll_down = active;
    }

    pub fn scroll_down(&self) -> bool {
        self.scroll_down
    }
}
