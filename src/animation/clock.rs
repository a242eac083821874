//! Host clock abstraction.
//!
//! The engine never owns a render loop. It asks the host for "one more frame"
//! through [`FrameClock::request_frame`] and keeps the returned
//! [`FrameRequest`] in its single animation slot; dropping or cancelling the
//! request tells the host the frame is no longer wanted.

use crate::prelude::{Duration, Instant};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// Monotonic time source plus frame scheduling, provided by the host
pub trait FrameClock: Send {
    /// Current monotonic time
    fn now(&self) -> Instant;

    /// Asks the host to call back (via `Viewport::tick`) on the next frame
    fn request_frame(&self) -> FrameRequest;
}

/// Engine-side ownership of one scheduled frame. Cancelled on drop.
#[derive(Debug)]
pub struct FrameRequest {
    token: FrameToken,
}

impl FrameRequest {
    pub fn new(id: u64) -> Self {
        Self {
            token: FrameToken {
                id,
                cancelled: Arc::new(AtomicBool::new(false)),
            },
        }
    }

    pub fn id(&self) -> u64 {
        self.token.id
    }

    /// Host-side observer for this request
    pub fn token(&self) -> FrameToken {
        self.token.clone()
    }

    pub fn cancel(&self) {
        self.token.cancelled.store(true, Ordering::SeqCst);
    }
}

impl Drop for FrameRequest {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Host-side view of a [`FrameRequest`]
#[derive(Debug, Clone)]
pub struct FrameToken {
    id: u64,
    cancelled: Arc<AtomicBool>,
}

impl FrameToken {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Wall clock; frame requests are not observed, the host polls
/// `Viewport::is_animating` from its own loop instead
#[derive(Debug, Default)]
pub struct SystemFrameClock {
    next_id: AtomicU64,
}

impl SystemFrameClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FrameClock for SystemFrameClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn request_frame(&self) -> FrameRequest {
        FrameRequest::new(self.next_id.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug)]
struct ManualState {
    now: Instant,
    next_id: u64,
    requested: Vec<FrameToken>,
}

/// Manually advanced clock for tests and deterministic hosts.
///
/// Clones share the same time and request list.
#[derive(Debug, Clone)]
pub struct ManualFrameClock {
    state: Arc<Mutex<ManualState>>,
}

impl ManualFrameClock {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(ManualState {
                now: Instant::now(),
                next_id: 0,
                requested: Vec::new(),
            })),
        }
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut ManualState) -> R) -> R {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut state)
    }

    pub fn advance(&self, by: Duration) {
        self.with_state(|state| state.now += by);
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }

    /// Requests that are still wanted, oldest first
    pub fn pending_frames(&self) -> Vec<FrameToken> {
        self.with_state(|state| {
            state.requested.retain(|token| !token.is_cancelled());
            state.requested.clone()
        })
    }

    /// Drains every request made so far, the way a host consumes them
    /// when a frame fires
    pub fn take_frames(&self) -> Vec<FrameToken> {
        self.with_state(|state| {
            std::mem::take(&mut state.requested)
                .into_iter()
                .filter(|token| !token.is_cancelled())
                .collect()
        })
    }
}

impl Default for ManualFrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock for ManualFrameClock {
    fn now(&self) -> Instant {
        self.with_state(|state| state.now)
    }

    fn request_frame(&self) -> FrameRequest {
        self.with_state(|state| {
            let request = FrameRequest::new(state.next_id);
            state.next_id += 1;
            state.requested.push(request.token());
            request
        })
    }
}
