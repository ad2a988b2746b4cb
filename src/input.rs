//! Pointer input accumulation
//!
//! Browser events arrive between frames, possibly several per frame. They are
//! folded into an [`InputState`] and handed to the simulation once per tick
//! as a [`TickInput`].

use glam::Vec2;

use crate::sim::TickInput;

/// Pointer state between ticks
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pointer: Vec2,
    is_down: bool,
    pressed_at: Option<Vec2>,
    released: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mouse button down or touch start
    pub fn pointer_down(&mut self, pos: Vec2) {
        self.pointer = pos;
        self.is_down = true;
        // Keep the first press of the frame
        if self.pressed_at.is_none() {
            self.pressed_at = Some(pos);
        }
    }

    pub fn pointer_move(&mut self, pos: Vec2) {
        self.pointer = pos;
    }

    /// Mouse button up or touch end. Touch end carries no position, so the
    /// last known pointer is used.
    pub fn pointer_up(&mut self, pos: Option<Vec2>) {
        if let Some(pos) = pos {
            self.pointer = pos;
        }
        self.is_down = false;
        self.released = true;
    }

    /// Snapshot for the next tick, clearing one-shot press/release flags
    pub fn take_tick_input(&mut self) -> TickInput {
        TickInput {
            pointer: self.pointer,
            is_down: self.is_down,
            pressed_at: self.pressed_at.take(),
            released: std::mem::take(&mut self.released),
        }
    }
}

/// Map a client-space point into canvas coordinates, accounting for CSS
/// scaling of the canvas element
pub fn client_to_canvas(client: Vec2, rect_origin: Vec2, rect_size: Vec2, canvas_size: Vec2) -> Vec2 {
    let local = client - rect_origin;
    if rect_size.x <= 0.0 || rect_size.y <= 0.0 {
        return local;
    }
    local * canvas_size / rect_size
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_shots_clear_after_take() {
        let mut input = InputState::new();
        input.pointer_down(Vec2::new(10.0, 20.0));
        let first = input.take_tick_input();
        assert_eq!(first.pressed_at, Some(Vec2::new(10.0, 20.0)));
        assert!(first.is_down);
        assert!(!first.released);

        input.pointer_move(Vec2::new(30.0, 40.0));
        let second = input.take_tick_input();
        assert_eq!(second.pressed_at, None);
        assert_eq!(second.pointer, Vec2::new(30.0, 40.0));
        assert!(second.is_down);

        input.pointer_up(None);
        let third = input.take_tick_input();
        assert!(third.released);
        assert!(!third.is_down);
        assert_eq!(third.pointer, Vec2::new(30.0, 40.0));

        assert!(!input.take_tick_input().released);
    }

    #[test]
    fn test_click_within_one_frame() {
        let mut input = InputState::new();
        input.pointer_down(Vec2::new(1.0, 1.0));
        input.pointer_down(Vec2::new(5.0, 5.0));
        input.pointer_up(Some(Vec2::new(6.0, 6.0)));
        let tick = input.take_tick_input();
        assert_eq!(tick.pressed_at, Some(Vec2::new(1.0, 1.0)));
        assert!(tick.released);
        assert_eq!(tick.pointer, Vec2::new(6.0, 6.0));
    }

    #[test]
    fn test_client_to_canvas_scales() {
        let p = client_to_canvas(
            Vec2::new(210.0, 160.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(400.0, 300.0),
            Vec2::new(800.0, 600.0),
        );
        assert_eq!(p, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_client_to_canvas_degenerate_rect() {
        let p = client_to_canvas(Vec2::new(5.0, 5.0), Vec2::ZERO, Vec2::ZERO, Vec2::new(800.0, 600.0));
        assert_eq!(p, Vec2::new(5.0, 5.0));
    }
}
