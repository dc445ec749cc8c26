//! Per-frame input snapshot.
//!
//! The host fills an [`InputState`] each frame (directly or through an
//! [`InputSource`]); the [`Tui`](crate::Tui) turns it into typed events.

use tracing::trace;

/// Mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button.
    Left,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button.
    Right,
}

impl MouseButton {
    /// Buttons in the order their events are synthesized.
    pub const ALL: [Self; 3] = [Self::Left, Self::Middle, Self::Right];

    const fn mask(self) -> u8 {
        match self {
            Self::Left => 1,
            Self::Middle => 2,
            Self::Right => 4,
        }
    }
}

/// Keyboard key. The discriminant is the raw key code.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Key {
    Escape,
    Enter,
    Tab,
    Backspace,
    Delete,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Space,
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,
    Num0, Num1, Num2, Num3, Num4, Num5, Num6, Num7, Num8, Num9,
    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,
}

impl Key {
    /// Every key, indexed by its code.
    pub const ALL: [Self; 62] = [
        Self::Escape,
        Self::Enter,
        Self::Tab,
        Self::Backspace,
        Self::Delete,
        Self::Up,
        Self::Down,
        Self::Left,
        Self::Right,
        Self::Home,
        Self::End,
        Self::PageUp,
        Self::PageDown,
        Self::Space,
        Self::A, Self::B, Self::C, Self::D, Self::E, Self::F, Self::G,
        Self::H, Self::I, Self::J, Self::K, Self::L, Self::M,
        Self::N, Self::O, Self::P, Self::Q, Self::R, Self::S, Self::T,
        Self::U, Self::V, Self::W, Self::X, Self::Y, Self::Z,
        Self::Num0, Self::Num1, Self::Num2, Self::Num3, Self::Num4,
        Self::Num5, Self::Num6, Self::Num7, Self::Num8, Self::Num9,
        Self::F1, Self::F2, Self::F3, Self::F4, Self::F5, Self::F6,
        Self::F7, Self::F8, Self::F9, Self::F10, Self::F11, Self::F12,
    ];

    /// Looks up a raw key code.
    #[must_use]
    pub fn from_code(code: u16) -> Option<Self> {
        Self::ALL.get(usize::from(code)).copied()
    }

    /// The raw key code.
    #[must_use]
    pub const fn code(self) -> u16 {
        self as u16
    }
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Control key is held.
    pub ctrl: bool,
    /// Alt key is held.
    pub alt: bool,
    /// Super/Command key is held.
    pub super_key: bool,
}

/// Input state for the current frame.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Current mouse X position in window pixels.
    pub mouse_x: f32,
    /// Current mouse Y position in window pixels.
    pub mouse_y: f32,
    /// Mouse X position last frame.
    pub prev_mouse_x: f32,
    /// Mouse Y position last frame.
    pub prev_mouse_y: f32,
    /// Mouse buttons pressed this frame.
    buttons_pressed: u8,
    /// Mouse buttons released this frame.
    buttons_released: u8,
    /// Mouse buttons currently held.
    buttons_down: u8,
    /// Mouse scroll delta (x, y).
    pub scroll_delta: (f32, f32),
    /// Modifier keys state.
    pub modifiers: Modifiers,
    /// Keys pressed this frame.
    keys_pressed: Vec<Key>,
    /// Keys released this frame.
    keys_released: Vec<Key>,
    /// Keys currently held.
    keys_down: Vec<Key>,
    /// Text input this frame.
    pub text_input: String,
}

/// A host-side input provider polled once per frame.
pub trait InputSource {
    /// Records this frame's input into `input`.
    fn poll(&mut self, input: &mut InputState);
}

impl InputState {
    /// Creates a new empty input state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Begins a new frame, clearing per-frame state.
    pub fn begin_frame(&mut self) {
        self.prev_mouse_x = self.mouse_x;
        self.prev_mouse_y = self.mouse_y;
        self.buttons_pressed = 0;
        self.buttons_released = 0;
        self.scroll_delta = (0.0, 0.0);
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.text_input.clear();
    }

    /// Begins a new frame and lets `source` fill it.
    pub fn poll_from(&mut self, source: &mut dyn InputSource) {
        self.begin_frame();
        source.poll(self);
    }

    /// Updates mouse position.
    pub fn set_mouse_pos(&mut self, x: f32, y: f32) {
        self.mouse_x = x;
        self.mouse_y = y;
    }

    /// Records a mouse button press.
    pub fn mouse_button_down(&mut self, button: MouseButton) {
        let mask = button.mask();
        self.buttons_pressed |= mask;
        self.buttons_down |= mask;
    }

    /// Records a mouse button release.
    pub fn mouse_button_up(&mut self, button: MouseButton) {
        let mask = button.mask();
        self.buttons_released |= mask;
        self.buttons_down &= !mask;
    }

    /// Records scroll input.
    pub fn scroll(&mut self, dx: f32, dy: f32) {
        self.scroll_delta.0 += dx;
        self.scroll_delta.1 += dy;
    }

    /// Records a key press.
    pub fn key_down(&mut self, key: Key) {
        if !self.keys_down.contains(&key) {
            self.keys_pressed.push(key);
            self.keys_down.push(key);
        }
    }

    /// Records a key release.
    pub fn key_up(&mut self, key: Key) {
        self.keys_released.push(key);
        self.keys_down.retain(|&k| k != key);
    }

    /// Records a key press by raw code. Unknown codes are ignored.
    pub fn key_down_code(&mut self, code: u16) {
        match Key::from_code(code) {
            Some(key) => self.key_down(key),
            None => trace!("Ignoring unknown key code {}", code),
        }
    }

    /// Records a key release by raw code. Unknown codes are ignored.
    pub fn key_up_code(&mut self, code: u16) {
        match Key::from_code(code) {
            Some(key) => self.key_up(key),
            None => trace!("Ignoring unknown key code {}", code),
        }
    }

    /// Records text input.
    pub fn text(&mut self, text: &str) {
        self.text_input.push_str(text);
    }

    /// Returns true if the mouse button was clicked this frame.
    #[must_use]
    pub fn mouse_clicked(&self, button: MouseButton) -> bool {
        (self.buttons_pressed & button.mask()) != 0
    }

    /// Returns true if the mouse button was released this frame.
    #[must_use]
    pub fn mouse_released(&self, button: MouseButton) -> bool {
        (self.buttons_released & button.mask()) != 0
    }

    /// Returns true if the mouse button is currently held.
    #[must_use]
    pub fn mouse_down(&self, button: MouseButton) -> bool {
        (self.buttons_down & button.mask()) != 0
    }

    /// Returns true if the key was pressed this frame.
    #[must_use]
    pub fn key_pressed(&self, key: Key) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Returns true if the key is currently held.
    #[must_use]
    pub fn key_held(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    /// Keys pressed this frame, in order.
    #[must_use]
    pub fn keys_pressed(&self) -> &[Key] {
        &self.keys_pressed
    }

    /// Keys released this frame, in order.
    #[must_use]
    pub fn keys_released(&self) -> &[Key] {
        &self.keys_released
    }

    /// Returns the mouse movement delta.
    #[must_use]
    pub fn mouse_delta(&self) -> (f32, f32) {
        (self.mouse_x - self.prev_mouse_x, self.mouse_y - self.prev_mouse_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mouse_click() {
        let mut input = InputState::new();

        input.mouse_button_down(MouseButton::Left);
        assert!(input.mouse_clicked(MouseButton::Left));
        assert!(input.mouse_down(MouseButton::Left));

        input.begin_frame();
        assert!(!input.mouse_clicked(MouseButton::Left));
        assert!(input.mouse_down(MouseButton::Left));

        input.mouse_button_up(MouseButton::Left);
        assert!(input.mouse_released(MouseButton::Left));
        assert!(!input.mouse_down(MouseButton::Left));
    }

    #[test]
    fn test_key_codes_match_table() {
        for (i, key) in Key::ALL.iter().enumerate() {
            assert_eq!(usize::from(key.code()), i);
        }
        assert_eq!(Key::from_code(Key::Home.code()), Some(Key::Home));
        assert_eq!(Key::from_code(999), None);
    }

    #[test]
    fn test_unknown_codes_are_dropped() {
        let mut input = InputState::new();
        input.key_down_code(999);
        input.key_down_code(Key::Delete.code());
        assert_eq!(input.keys_pressed(), &[Key::Delete]);

        input.key_up_code(999);
        input.key_up_code(Key::Delete.code());
        assert_eq!(input.keys_released(), &[Key::Delete]);
        assert!(!input.key_held(Key::Delete));
    }

    #[test]
    fn test_held_key_is_pressed_once() {
        let mut input = InputState::new();
        input.key_down(Key::A);
        input.key_down(Key::A);
        assert_eq!(input.keys_pressed(), &[Key::A]);
        input.begin_frame();
        input.key_down(Key::A);
        assert!(input.keys_pressed().is_empty());
        assert!(!input.key_pressed(Key::A));
    }

    #[test]
    fn test_poll_from_source() {
        struct Script;
        impl InputSource for Script {
            fn poll(&mut self, input: &mut InputState) {
                input.set_mouse_pos(10.0, 4.0);
                input.text("x");
            }
        }

        let mut input = InputState::new();
        input.text("stale");
        input.poll_from(&mut Script);
        assert_eq!(input.text_input, "x");
        assert_eq!(input.mouse_delta(), (10.0, 4.0));
    }
}
