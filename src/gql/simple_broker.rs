use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use futures::lock::Mutex;
use slab::Slab;
use std::sync::Arc;

/// Fan-out of events to subscription streams.
///
/// Owned by the schema data rather than a global, so separate schemas do not
/// see each other's events.
pub struct SimpleBroker<T> {
    senders: Arc<Mutex<Slab<UnboundedSender<T>>>>,
}

impl<T> Clone for SimpleBroker<T> {
    fn clone(&self) -> Self {
        Self {
            senders: Arc::clone(&self.senders),
        }
    }
}

impl<T> Default for SimpleBroker<T> {
    fn default() -> Self {
        Self {
            senders: Arc::new(Mutex::new(Slab::new())),
        }
    }
}

impl<T: Clone + Send + 'static> SimpleBroker<T> {
    /// Send `msg` to every live subscriber, forgetting the ones that hung up.
    pub async fn publish(&self, msg: T) {
        let mut senders = self.senders.lock().await;
        let closed: Vec<usize> = senders
            .iter()
            .filter(|(_, tx)| tx.unbounded_send(msg.clone()).is_err())
            .map(|(key, _)| key)
            .collect();
        for key in closed {
            senders.remove(key);
        }
    }

    pub async fn subscribe(&self) -> UnboundedReceiver<T> {
        let (tx, rx) = mpsc::unbounded();
        self.senders.lock().await.insert(tx);
        rx
    }

    #[cfg(test)]
    async fn subscriber_count(&self) -> usize {
        self.senders.lock().await.len()
    }
}
