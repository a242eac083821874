pub mod events;
pub mod handler;
pub mod inertia;

// Re-export the essential types
pub use events::{EventHandled, InputEvent, KeyCode, KeyModifiers, TouchPoint};
pub use handler::{GestureState, InputEngine};
pub use inertia::{DragSamples, Inertia, InertiaConfig};
