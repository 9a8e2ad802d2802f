mod broadcast;
mod fcm;
mod push;

pub use broadcast::{BroadcastMessage, Broadcaster};
pub use fcm::FcmPushService;
pub use push::{DiscardPushService, IPushService, PushError, PushPayload};
