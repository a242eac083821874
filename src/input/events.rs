use crate::core::geo::Point;
use serde::{Deserialize, Serialize};

/// Raw input primitives delivered by the host. Positions are container
/// pixels, already translated from client coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Primary button pressed
    PointerDown { position: Point },
    /// Pointer moved (pressed or not)
    PointerMove { position: Point },
    /// Primary button released
    PointerUp { position: Point },
    /// Scroll wheel; positive `delta` zooms in
    Wheel { delta: f64, position: Point },
    /// Fingers touching down
    TouchStart { touches: Vec<TouchPoint> },
    /// Fingers moving
    TouchMove { touches: Vec<TouchPoint> },
    /// Fingers lifted (or the touch was cancelled)
    TouchEnd { touches: Vec<TouchPoint> },
    /// Keyboard input
    KeyDown {
        key: KeyCode,
        modifiers: KeyModifiers,
    },
    /// Native double click, for hosts that detect it themselves
    DoubleClick { position: Point },
}

/// Individual touch point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    pub id: u64,
    pub position: Point,
}

impl TouchPoint {
    pub fn new(id: u64, position: Point) -> Self {
        Self { id, position }
    }
}

/// Keyboard key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Plus,
    Minus,
    Other(u32),
}

/// Keyboard modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct KeyModifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// Whether an event was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventHandled {
    Handled,
    NotHandled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_from_host_json() {
        let json = r#"{"Wheel": {"delta": -60.0, "position": {"x": 10.0, "y": 20.0}}}"#;
        let event: InputEvent = serde_json::from_str(json).unwrap();
        assert_eq!(
            event,
            InputEvent::Wheel {
                delta: -60.0,
                position: Point::new(10.0, 20.0)
            }
        );
    }
}
