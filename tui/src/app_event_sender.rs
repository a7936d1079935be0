use slide_core::session::SessionEvent;
use tokio::sync::mpsc::UnboundedSender;

/// Channel background tasks use to report back to the UI loop.
#[derive(Clone, Default)]
pub struct AppEventSender(Option<UnboundedSender<SessionEvent>>);

impl AppEventSender {
    pub fn new(tx: UnboundedSender<SessionEvent>) -> Self {
        Self(Some(tx))
    }

    /// Deliver `event`; dropped silently once the UI has exited.
    pub fn send(&self, event: SessionEvent) {
        if let Some(tx) = &self.0 {
            let _ = tx.send(event);
        }
    }
}
