//! In-process fan-out of change events to WebSocket clients.

use tokio::sync::broadcast;
use tracing::trace;

use crate::domain::ChangeEvent;
use crate::port::ChangePublisher;

/// Default number of events buffered per subscriber before it lags.
pub const DEFAULT_CAPACITY: usize = 256;

/// Broadcast hub for [`ChangeEvent`]s.
///
/// Each WebSocket connection holds its own receiver. A slow receiver that
/// falls more than `capacity` events behind skips ahead and keeps going.
#[derive(Debug, Clone)]
pub struct ChangeHub {
    sender: broadcast::Sender<ChangeEvent>,
}

impl ChangeHub {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.sender.subscribe()
    }

    /// Number of live subscribers.
    #[must_use]
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for ChangeHub {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl ChangePublisher for ChangeHub {
    fn publish(&self, event: ChangeEvent) {
        let kind = event.kind();
        // Err only means nobody is listening.
        let delivered = self.sender.send(event).unwrap_or(0);
        trace!(kind, delivered, "Published change event");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChangeAction, TeamId};

    fn team_event() -> ChangeEvent {
        ChangeEvent::Team {
            action: ChangeAction::Created,
            id: TeamId::from("t1"),
        }
    }

    #[test]
    fn publish_without_subscribers_is_fine() {
        let hub = ChangeHub::default();
        hub.publish(team_event());
        assert_eq!(hub.receiver_count(), 0);
    }

    #[tokio::test]
    async fn every_subscriber_receives_each_event() {
        let hub = ChangeHub::new(8);
        let mut first = hub.subscribe();
        let mut second = hub.subscribe();

        hub.publish(team_event());

        assert_eq!(first.recv().await.unwrap(), team_event());
        assert_eq!(second.recv().await.unwrap(), team_event());
    }
}
