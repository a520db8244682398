/// Input button identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    KeyR,
    Digit1,
    Digit2,
    Digit3,
    Escape,
    MouseLeft,
    MouseRight,
}

/// Per-frame input state read by the visualizations
pub trait Controller {
    /// Check if button is currently down
    fn is_down(&self, button: Button) -> bool;

    /// Get all currently pressed buttons
    fn get_down_keys(&self) -> &[Button];

    /// Pressed since the last `reset_deltas`
    fn was_pressed(&self, button: Button) -> bool;

    /// Cursor position in physical pixels, relative to the window
    fn mouse_position(&self) -> Option<(f32, f32)>;

    /// Cursor movement since the last `reset_deltas`
    fn mouse_delta(&self) -> (f32, f32);

    /// Wheel movement in lines since the last `reset_deltas`; positive is away
    /// from the user
    fn scroll_delta(&self) -> f32;
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;

    /// Scriptable controller for scene tests
    #[derive(Debug, Default)]
    pub struct MockController {
        pub down: Vec<Button>,
        pub pressed: Vec<Button>,
        pub position: Option<(f32, f32)>,
        pub delta: (f32, f32),
        pub scroll: f32,
    }

    impl Controller for MockController {
        fn is_down(&self, button: Button) -> bool {
            self.down.contains(&button)
        }

        fn get_down_keys(&self) -> &[Button] {
            &self.down
        }

        fn was_pressed(&self, button: Button) -> bool {
            self.pressed.contains(&button)
        }

        fn mouse_position(&self) -> Option<(f32, f32)> {
            self.position
        }

        fn mouse_delta(&self) -> (f32, f32) {
            self.delta
        }

        fn scroll_delta(&self) -> f32 {
            self.scroll
        }
    }
}
