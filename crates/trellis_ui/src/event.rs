//! Typed UI events and the publish/subscribe dispatcher.
//!
//! Subscribers are offered an event in bind order until one of them reports
//! [`EventStatus::Consumed`]. Disabled subscribers are skipped.

use std::collections::HashMap;

use crate::input::{Key, Modifiers, MouseButton};

/// Event type discriminator.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventType {
    /// Mouse button pressed or released.
    MouseButton = 0,
    /// Pointer moved.
    MouseMotion = 1,
    /// Key pressed or released.
    Key = 2,
    /// Focus gained or lost.
    Focus = 3,
    /// Wheel scrolled.
    Scroll = 4,
    /// Character typed.
    Text = 5,
}

impl EventType {
    /// Every event type, in discriminant order.
    pub const ALL: [Self; 6] = [
        Self::MouseButton,
        Self::MouseMotion,
        Self::Key,
        Self::Focus,
        Self::Scroll,
        Self::Text,
    ];
}

/// Mouse button payload. Coordinates are output pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MouseButtonEvent {
    /// Button that changed.
    pub button: MouseButton,
    /// True on press, false on release.
    pub pressed: bool,
    /// Pointer X.
    pub x: f32,
    /// Pointer Y.
    pub y: f32,
    /// Modifier keys held at the time.
    pub modifiers: Modifiers,
}

/// Pointer motion payload. Coordinates are output pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MouseMotionEvent {
    /// Pointer X.
    pub x: f32,
    /// Pointer Y.
    pub y: f32,
    /// X change since the previous frame.
    pub dx: f32,
    /// Y change since the previous frame.
    pub dy: f32,
}

/// Key payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    /// Key that changed.
    pub key: Key,
    /// Modifier keys held at the time.
    pub modifiers: Modifiers,
    /// True on press, false on release.
    pub pressed: bool,
}

/// Events delivered to widgets.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
    /// Mouse button pressed or released.
    MouseButton(MouseButtonEvent),
    /// Pointer moved.
    MouseMotion(MouseMotionEvent),
    /// Key pressed or released.
    Key(KeyEvent),
    /// Focus gained (`true`) or lost (`false`).
    Focus {
        /// New focus state.
        focused: bool,
    },
    /// Wheel scrolled by whole notches; positive is up.
    Scroll {
        /// Notches scrolled.
        delta: f32,
    },
    /// A character was typed.
    Text {
        /// The character.
        character: char,
    },
}

impl Event {
    /// Returns the event type.
    #[must_use]
    pub const fn event_type(&self) -> EventType {
        match self {
            Self::MouseButton(_) => EventType::MouseButton,
            Self::MouseMotion(_) => EventType::MouseMotion,
            Self::Key(_) => EventType::Key,
            Self::Focus { .. } => EventType::Focus,
            Self::Scroll { .. } => EventType::Scroll,
            Self::Text { .. } => EventType::Text,
        }
    }

    /// Pointer position carried by mouse events.
    #[must_use]
    pub const fn position(&self) -> Option<(f32, f32)> {
        match self {
            Self::MouseButton(e) => Some((e.x, e.y)),
            Self::MouseMotion(e) => Some((e.x, e.y)),
            _ => None,
        }
    }
}

/// Outcome of offering an event to a subscriber.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventStatus {
    /// Not used; keep offering.
    Available,
    /// Used; stop propagation.
    Consumed,
}

impl EventStatus {
    /// True for [`EventStatus::Consumed`].
    #[must_use]
    pub const fn is_consumed(self) -> bool {
        matches!(self, Self::Consumed)
    }
}

/// Receives events on behalf of subscriber keys.
///
/// The dispatcher stores only keys; whoever owns the subscribers resolves
/// them here.
pub trait EventSubscriber<K> {
    /// Whether `key` may receive events at all.
    fn is_enabled(&self, key: K) -> bool;

    /// Offers `event` to `key`.
    fn handle_event(&mut self, key: K, event: &Event) -> EventStatus;
}

/// Maps event types to ordered subscriber lists.
#[derive(Debug, Clone)]
pub struct EventHandler<K> {
    subscribers: HashMap<EventType, Vec<K>>,
}

impl<K> Default for EventHandler<K> {
    fn default() -> Self {
        Self {
            subscribers: HashMap::new(),
        }
    }
}

impl<K: Copy + Eq> EventHandler<K> {
    /// Creates a dispatcher with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes `key` to `event_type`.
    ///
    /// Returns `false` if it was already subscribed; nothing changes then.
    pub fn bind(&mut self, key: K, event_type: EventType) -> bool {
        let list = self.subscribers.entry(event_type).or_default();
        if list.contains(&key) {
            return false;
        }
        list.push(key);
        true
    }

    /// Subscribes `key` to every event type.
    pub fn bind_all(&mut self, key: K) {
        for event_type in EventType::ALL {
            self.bind(key, event_type);
        }
    }

    /// Removes `key` from every list.
    pub fn unbind(&mut self, key: K) {
        for list in self.subscribers.values_mut() {
            list.retain(|k| *k != key);
        }
    }

    /// Subscribers of `event_type` in dispatch order.
    #[must_use]
    pub fn subscribers(&self, event_type: EventType) -> &[K] {
        self.subscribers
            .get(&event_type)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Offers `event` to its subscribers in bind order.
    ///
    /// Returns [`EventStatus::Consumed`] as soon as one consumes it.
    pub fn send<S: EventSubscriber<K>>(&self, event: &Event, target: &mut S) -> EventStatus {
        let Some(list) = self.subscribers.get(&event.event_type()) else {
            return EventStatus::Available;
        };
        for &key in list {
            if !target.is_enabled(key) {
                continue;
            }
            if target.handle_event(key, event).is_consumed() {
                return EventStatus::Consumed;
            }
        }
        EventStatus::Available
    }
}
