use crate::core::bounds::GeoBounds;
use crate::core::geo::GeoPoint;
use crossbeam_channel::{Receiver, Sender, TrySendError};

/// Notifications emitted by the viewport, synchronously, from inside the
/// call that changed the view
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    /// Center changed (also emitted on every animation frame)
    Move { center: GeoPoint, bounds: GeoBounds },
    /// Zoom changed
    Zoom {
        zoom: f64,
        center: GeoPoint,
        bounds: GeoBounds,
    },
    /// Viewport size changed
    Resize { width: f64, height: f64 },
    /// An animated transition began
    AnimationStart,
    /// An animated transition finished or was superseded / stopped
    AnimationEnd { cancelled: bool },
}

impl ViewEvent {
    /// Event name in `view:<kind>` form
    pub fn name(&self) -> &'static str {
        match self {
            ViewEvent::Move { .. } => "view:move",
            ViewEvent::Zoom { .. } => "view:zoom",
            ViewEvent::Resize { .. } => "view:resize",
            ViewEvent::AnimationStart => "view:animation_start",
            ViewEvent::AnimationEnd { .. } => "view:animation_end",
        }
    }
}

/// Identifier returned by [`EventManager::on`], used to unregister
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Event listener callback type
pub type EventCallback = Box<dyn FnMut(&ViewEvent) + Send>;

/// Delivers [`ViewEvent`]s to registered callbacks and channel subscribers
#[derive(Default)]
pub struct EventManager {
    listeners: Vec<(ListenerId, EventCallback)>,
    subscribers: Vec<Sender<ViewEvent>>,
    next_id: u64,
}

impl EventManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an event listener
    pub fn on<F>(&mut self, callback: F) -> ListenerId
    where
        F: FnMut(&ViewEvent) + Send + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(callback)));
        id
    }

    /// Remove a listener; returns whether it was registered
    pub fn off(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener, _)| *listener != id);
        self.listeners.len() != before
    }

    /// New unbounded channel receiving every subsequent event
    pub fn subscribe(&mut self) -> Receiver<ViewEvent> {
        let (tx, rx) = crossbeam_channel::unbounded();
        self.subscribers.push(tx);
        rx
    }

    /// Deliver an event to everyone, in registration order
    pub fn emit(&mut self, event: ViewEvent) {
        for (_, callback) in &mut self.listeners {
            callback(&event);
        }
        // Receivers that were dropped are pruned
        self.subscribers
            .retain(|tx| !matches!(tx.try_send(event.clone()), Err(TrySendError::Disconnected(_))));
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len() + self.subscribers.len()
    }
}

impl std::fmt::Debug for EventManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventManager")
            .field("listeners", &self.listeners.len())
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
