//! Registry of connected UI clients.
//!
//! Each WebSocket connection registers a subscriber and receives every message
//! broadcast while it is connected. Nothing is queued for clients that connect
//! later.

use std::collections::HashMap;
use tokio::sync::{mpsc, RwLock};
use tracing::debug;
use uuid::Uuid;

use super::websocket::ClientMessage;

pub struct Subscription {
    pub id: Uuid,
    pub receiver: mpsc::UnboundedReceiver<ClientMessage>,
}

#[derive(Debug, Default)]
pub struct ClientHub {
    subscribers: RwLock<HashMap<Uuid, mpsc::UnboundedSender<ClientMessage>>>,
}

impl ClientHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn subscribe(&self) -> Subscription {
        let (tx, receiver) = mpsc::unbounded_channel();
        let id = Uuid::new_v4();
        self.subscribers.write().await.insert(id, tx);
        debug!("Client {} subscribed", id);
        Subscription { id, receiver }
    }

    pub async fn unsubscribe(&self, id: Uuid) -> bool {
        let removed = self.subscribers.write().await.remove(&id).is_some();
        if removed {
            debug!("Client {} unsubscribed", id);
        }
        removed
    }

    pub async fn client_count(&self) -> usize {
        self.subscribers.read().await.len()
    }

    /// Sends `message` to every connected client and returns how many accepted it.
    /// Subscribers whose connection has gone away are dropped.
    pub async fn broadcast(&self, message: ClientMessage) -> usize {
        let mut closed = Vec::new();
        let mut delivered = 0;

        {
            let subscribers = self.subscribers.read().await;
            for (id, tx) in subscribers.iter() {
                if tx.send(message.clone()).is_ok() {
                    delivered += 1;
                } else {
                    closed.push(*id);
                }
            }
        }

        if !closed.is_empty() {
            let mut subscribers = self.subscribers.write().await;
            for id in closed {
                subscribers.remove(&id);
            }
        }

        delivered
    }
}
