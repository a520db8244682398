use std::collections::HashSet;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use super::controller::{Button, Controller};

/// Cursor travel (pixels) beyond which a left press is a drag, not a click
const CLICK_SLOP: f32 = 5.0;
/// Pixel-delta scroll events are normalized to lines with this height
const PIXELS_PER_LINE: f32 = 40.0;

/// Adapter that bridges Winit events to the Controller trait
#[derive(Debug, Clone, Default)]
pub struct WinitController {
    /// Currently pressed buttons
    pressed_keys: HashSet<Button>,
    /// All pressed buttons as a vec (for efficient get_down_keys)
    pressed_vec: Vec<Button>,
    /// Buttons that went down since the last reset
    just_pressed: Vec<Button>,
    mouse_position: Option<(f32, f32)>,
    mouse_delta: (f32, f32),
    scroll: f32,
    /// Where the current left press started, and how far it has travelled
    left_press: Option<((f32, f32), f32)>,
    click: Option<(f32, f32)>,
}

impl WinitController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a Winit WindowEvent and update internal state
    pub fn process_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(keycode) = event.physical_key {
                    if let Some(button) = Self::keycode_to_button(keycode) {
                        match event.state {
                            ElementState::Pressed if !event.repeat => self.press(button),
                            ElementState::Pressed => {}
                            ElementState::Released => self.release(button),
                        }
                    }
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(btn) = Self::mouse_button_to_button(*button) {
                    match state {
                        ElementState::Pressed => self.press(btn),
                        ElementState::Released => self.release(btn),
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.move_cursor(position.x as f32, position.y as f32);
            }
            WindowEvent::CursorLeft { .. } => {
                self.mouse_position = None;
                self.left_press = None;
            }
            WindowEvent::MouseWheel { delta, .. } => self.wheel(*delta),
            _ => {}
        }
    }

    pub fn press(&mut self, button: Button) {
        if self.pressed_keys.insert(button) {
            self.pressed_vec.push(button);
            self.just_pressed.push(button);
        }
        if button == Button::MouseLeft {
            self.left_press = self.mouse_position.map(|p| (p, 0.0));
        }
    }

    pub fn release(&mut self, button: Button) {
        if self.pressed_keys.remove(&button) {
            self.pressed_vec.retain(|&b| b != button);
        }
        if button == Button::MouseLeft {
            if let Some((start, travelled)) = self.left_press.take() {
                if travelled <= CLICK_SLOP {
                    self.click = Some(self.mouse_position.unwrap_or(start));
                }
            }
        }
    }

    /// Accumulate wheel motion in lines; trackpad pixel deltas are converted
    pub fn wheel(&mut self, delta: MouseScrollDelta) {
        self.scroll += match delta {
            MouseScrollDelta::LineDelta(_, y) => y,
            MouseScrollDelta::PixelDelta(p) => p.y as f32 / PIXELS_PER_LINE,
        };
    }

    pub fn move_cursor(&mut self, x: f32, y: f32) {
        if let Some((old_x, old_y)) = self.mouse_position {
            let (dx, dy) = (x - old_x, y - old_y);
            self.mouse_delta.0 += dx;
            self.mouse_delta.1 += dy;
            if let Some((_, travelled)) = &mut self.left_press {
                *travelled += (dx * dx + dy * dy).sqrt();
            }
        }
        self.mouse_position = Some((x, y));
    }

    /// Position of a completed left click, consumed on read
    pub fn take_click(&mut self) -> Option<(f32, f32)> {
        self.click.take()
    }

    /// Drop a pending click, e.g. when the UI consumed the release
    pub fn cancel_click(&mut self) {
        self.left_press = None;
        self.click = None;
    }

    /// Reset per-frame state. Call at the end of each frame.
    pub fn reset_deltas(&mut self) {
        self.mouse_delta = (0.0, 0.0);
        self.scroll = 0.0;
        self.just_pressed.clear();
    }

    fn keycode_to_button(keycode: KeyCode) -> Option<Button> {
        match keycode {
            KeyCode::KeyR => Some(Button::KeyR),
            KeyCode::Digit1 | KeyCode::Numpad1 => Some(Button::Digit1),
            KeyCode::Digit2 | KeyCode::Numpad2 => Some(Button::Digit2),
            KeyCode::Digit3 | KeyCode::Numpad3 => Some(Button::Digit3),
            KeyCode::Escape => Some(Button::Escape),
            _ => None,
        }
    }

    fn mouse_button_to_button(button: MouseButton) -> Option<Button> {
        match button {
            MouseButton::Left => Some(Button::MouseLeft),
            MouseButton::Right => Some(Button::MouseRight),
            _ => None,
        }
    }
}

impl Controller for WinitController {
    fn is_down(&self, button: Button) -> bool {
        self.pressed_keys.contains(&button)
    }

    fn get_down_keys(&self) -> &[Button] {
        &self.pressed_vec
    }

    fn was_pressed(&self, button: Button) -> bool {
        self.just_pressed.contains(&button)
    }

    fn mouse_position(&self) -> Option<(f32, f32)> {
        self.mouse_position
    }

    fn mouse_delta(&self) -> (f32, f32) {
        self.mouse_delta
    }

    fn scroll_delta(&self) -> f32 {
        self.scroll
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Winit events can't be built outside winit, so these drive the
    // press/release/move entry points directly.

    #[test]
    fn test_new_controller_empty() {
        let controller = WinitController::new();
        assert!(!controller.is_down(Button::MouseLeft));
        assert_eq!(controller.get_down_keys().len(), 0);
        assert_eq!(controller.mouse_position(), None);
        assert_eq!(controller.mouse_delta(), (0.0, 0.0));
    }

    #[test]
    fn still_press_is_a_click() {
        let mut controller = WinitController::new();
        controller.move_cursor(100.0, 100.0);
        controller.press(Button::MouseLeft);
        controller.move_cursor(102.0, 101.0);
        controller.release(Button::MouseLeft);

        assert_eq!(controller.take_click(), Some((102.0, 101.0)));
        assert_eq!(controller.take_click(), None);
    }

    #[test]
    fn drag_is_not_a_click() {
        let mut controller = WinitController::new();
        controller.move_cursor(100.0, 100.0);
        controller.press(Button::MouseLeft);
        controller.move_cursor(140.0, 100.0);
        controller.release(Button::MouseLeft);

        assert_eq!(controller.take_click(), None);
        assert_eq!(controller.mouse_delta(), (40.0, 0.0));
    }

    #[test]
    fn cancelled_click_is_dropped() {
        let mut controller = WinitController::new();
        controller.move_cursor(10.0, 10.0);
        controller.press(Button::MouseLeft);
        controller.cancel_click();
        controller.release(Button::MouseLeft);
        assert_eq!(controller.take_click(), None);
    }

    #[test]
    fn test_delta_reset() {
        let mut controller = WinitController::new();
        controller.move_cursor(100.0, 200.0);
        controller.move_cursor(110.0, 205.0);
        controller.press(Button::KeyR);

        assert!(controller.was_pressed(Button::KeyR));
        controller.reset_deltas();
        assert_eq!(controller.mouse_delta(), (0.0, 0.0));
        assert!(!controller.was_pressed(Button::KeyR));
        // held keys and position survive the reset
        assert!(controller.is_down(Button::KeyR));
        assert_eq!(controller.mouse_position(), Some((110.0, 205.0)));
    }

    #[test]
    fn pixel_wheel_deltas_become_lines() {
        let mut controller = WinitController::new();
        controller.wheel(MouseScrollDelta::PixelDelta(winit::dpi::PhysicalPosition::new(0.0, 80.0)));
        assert_eq!(controller.scroll_delta(), 2.0);

        controller.wheel(MouseScrollDelta::LineDelta(0.0, -0.5));
        assert_eq!(controller.scroll_delta(), 1.5);

        controller.reset_deltas();
        assert_eq!(controller.scroll_delta(), 0.0);
    }
}
