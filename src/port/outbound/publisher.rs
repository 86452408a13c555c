//! Change publishing port.

use crate::domain::ChangeEvent;

/// Fans entity-change events out to live clients.
///
/// Publishing is fire-and-forget; having no subscribers is not an error.
pub trait ChangePublisher: Send + Sync {
    fn publish(&self, event: ChangeEvent);
}

/// A publisher that drops every event.
pub struct NullPublisher;

impl ChangePublisher for NullPublisher {
    fn publish(&self, _event: ChangeEvent) {}
}
