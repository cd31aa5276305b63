//! Recording message sender.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::id::ChatId;
use crate::error::{Error, Result};
use crate::port::outbound::notifier::{MessageSender, OutboundMessage};

#[derive(Default)]
struct Inner {
    attempts: Vec<ChatId>,
    delivered: Vec<OutboundMessage>,
    failing: HashSet<ChatId>,
}

/// Records every delivery attempt. Chats registered with
/// [`fail_for`](Self::fail_for) get an error instead of a delivery.
#[derive(Clone, Default)]
pub struct RecordingSender {
    inner: Arc<Mutex<Inner>>,
}

impl RecordingSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every send to `chat` fail.
    pub fn fail_for(self, chat: ChatId) -> Self {
        self.inner.lock().failing.insert(chat);
        self
    }

    /// Chats a send was attempted for, in order.
    pub fn attempts(&self) -> Vec<ChatId> {
        self.inner.lock().attempts.clone()
    }

    /// Successfully delivered messages, in order.
    pub fn delivered(&self) -> Vec<OutboundMessage> {
        self.inner.lock().delivered.clone()
    }

    pub fn delivered_to(&self) -> Vec<ChatId> {
        self.inner.lock().delivered.iter().map(|m| m.chat_id).collect()
    }
}

#[async_trait]
impl MessageSender for RecordingSender {
    async fn send(&self, message: &OutboundMessage) -> Result<()> {
        let mut inner = self.inner.lock();
        inner.attempts.push(message.chat_id);
        if inner.failing.contains(&message.chat_id) {
            return Err(Error::Delivery(format!("chat {} unreachable", message.chat_id)));
        }
        inner.delivered.push(message.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}
