pub mod clock;
pub mod easing;
pub mod handle;

// Re-export commonly used types for convenience
pub use clock::{FrameClock, FrameRequest, FrameToken, ManualFrameClock, SystemFrameClock};
pub use easing::EasingType;
pub use handle::{AnimationHandle, AnimationOutcome};
