use serde::Serialize;
use tokio::sync::broadcast;
use tracing::error;

const CHANNEL_CAPACITY: usize = 256;

/// Event published on the in-app channel. Consumed by the realtime layer
/// that feeds the console's banner notifications.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BroadcastMessage {
    pub event: String,
    pub payload: serde_json::Value,
}

/// Fire-and-forget fanout channel. Publishing never fails, messages are
/// dropped when nobody is subscribed.
#[derive(Debug, Clone)]
pub struct Broadcaster {
    sender: broadcast::Sender<BroadcastMessage>,
}

impl Broadcaster {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    pub fn publish(&self, event: &str, payload: &impl Serialize) {
        let payload = match serde_json::to_value(payload) {
            Ok(payload) => payload,
            Err(e) => {
                error!("Unable to serialize broadcast payload: {:?}", e);
                return;
            }
        };
        let _ = self.sender.send(BroadcastMessage {
            event: event.into(),
            payload,
        });
    }

    pub fn subscribe(&self) -> broadcast::Receiver<BroadcastMessage> {
        self.sender.subscribe()
    }
}

impl Default for Broadcaster {
    fn default() -> Self {
        Self::new()
    }
}
