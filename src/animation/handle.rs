use crate::{MapError, Result};
use futures::channel::oneshot;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// How an animated transition ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationOutcome {
    Completed,
    Cancelled,
}

impl AnimationOutcome {
    pub fn into_result(self) -> Result<()> {
        match self {
            AnimationOutcome::Completed => Ok(()),
            AnimationOutcome::Cancelled => Err(MapError::AnimationCancelled),
        }
    }
}

/// Sending half, owned by the viewport's animation slot
#[derive(Debug)]
pub(crate) struct CompletionSender {
    tx: Option<oneshot::Sender<AnimationOutcome>>,
}

impl CompletionSender {
    pub(crate) fn resolve(&mut self, outcome: AnimationOutcome) {
        if let Some(tx) = self.tx.take() {
            // The caller may have dropped its handle
            let _ = tx.send(outcome);
        }
    }
}

impl Drop for CompletionSender {
    fn drop(&mut self) {
        self.resolve(AnimationOutcome::Cancelled);
    }
}

#[derive(Debug)]
enum HandleState {
    Pending(oneshot::Receiver<AnimationOutcome>),
    Done(AnimationOutcome),
}

/// Completion handle of a view change.
///
/// Resolves to `Ok(())` when the transition reaches its target and to
/// `Err(MapError::AnimationCancelled)` when it is superseded or stopped.
/// Can be awaited, or polled synchronously with [`AnimationHandle::outcome`].
#[derive(Debug)]
pub struct AnimationHandle {
    state: HandleState,
}

impl AnimationHandle {
    pub(crate) fn channel() -> (CompletionSender, AnimationHandle) {
        let (tx, rx) = oneshot::channel();
        (
            CompletionSender { tx: Some(tx) },
            AnimationHandle {
                state: HandleState::Pending(rx),
            },
        )
    }

    /// Handle of a change that was applied synchronously
    pub fn completed() -> Self {
        Self {
            state: HandleState::Done(AnimationOutcome::Completed),
        }
    }

    /// Outcome if already known, without blocking
    pub fn outcome(&mut self) -> Option<AnimationOutcome> {
        let outcome = match &mut self.state {
            HandleState::Done(outcome) => return Some(*outcome),
            HandleState::Pending(rx) => match rx.try_recv() {
                Ok(Some(outcome)) => outcome,
                Ok(None) => return None,
                Err(oneshot::Canceled) => AnimationOutcome::Cancelled,
            },
        };
        self.state = HandleState::Done(outcome);
        Some(outcome)
    }

    pub fn is_pending(&mut self) -> bool {
        self.outcome().is_none()
    }

    pub fn is_cancelled(&mut self) -> bool {
        self.outcome() == Some(AnimationOutcome::Cancelled)
    }
}

impl Future for AnimationHandle {
    type Output = Result<()>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        let outcome = match &mut this.state {
            HandleState::Done(outcome) => *outcome,
            HandleState::Pending(rx) => match Pin::new(rx).poll(cx) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(Ok(outcome)) => outcome,
                Poll::Ready(Err(oneshot::Canceled)) => AnimationOutcome::Cancelled,
            },
        };
        this.state = HandleState::Done(outcome);
        Poll::Ready(outcome.into_result())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn test_completed_handle() {
        let mut handle = AnimationHandle::completed();
        assert_eq!(handle.outcome(), Some(AnimationOutcome::Completed));
        assert!(block_on(handle).is_ok());
    }

    #[test]
    fn test_resolve_completed() {
        let (mut tx, mut handle) = AnimationHandle::channel();
        assert!(handle.is_pending());
        tx.resolve(AnimationOutcome::Completed);
        assert_eq!(handle.outcome(), Some(AnimationOutcome::Completed));
        // Resolving twice keeps the first outcome
        tx.resolve(AnimationOutcome::Cancelled);
        assert_eq!(handle.outcome(), Some(AnimationOutcome::Completed));
    }

    #[test]
    fn test_dropped_sender_cancels() {
        let (tx, handle) = AnimationHandle::channel();
        drop(tx);
        assert!(matches!(block_on(handle), Err(MapError::AnimationCancelled)));
    }
}
