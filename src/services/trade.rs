//! In-process trade hub for the resale handshake.
//!
//! Each trade gets its own watch channel, keyed by the trade id minted at
//! link creation. This replaces a single shared notification channel:
//! concurrent trades cannot cross-talk, and the terminal event is latched
//! in the channel so a party that subscribes after it was published still
//! observes it on the next poll.
//!
//! Channels are dropped when the handshake reaches its end (`close`), and
//! trades that never complete are purged after [`consts::TRADE_TTL`].

use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{RwLock, watch};
use uuid::Uuid;

use crate::consts;

#[derive(Debug, Clone, PartialEq)]
pub enum TradeEvent {
    /// The counterparty confirmed; the waiting buyer should proceed to pay
    GoToPayment { valor: Decimal },
    /// The counterparty declined; the waiting party can stop waiting
    Rejected,
}

struct TradeChannel {
    sender: watch::Sender<Option<TradeEvent>>,
    opened_at: Instant,
}

#[derive(Clone, Default)]
pub struct TradeHub {
    channels: Arc<RwLock<HashMap<Uuid, TradeChannel>>>,
}

impl TradeHub {
    /// Opens a channel for a new trade. Registering twice is a no-op.
    /// Expired trades are purged here, on the already-held write lock.
    pub async fn register(&self, trade_id: Uuid) {
        let mut channels = self.channels.write().await;
        channels.retain(|_, channel| channel.opened_at.elapsed() < consts::TRADE_TTL);
        channels.entry(trade_id).or_insert_with(|| TradeChannel {
            sender: watch::channel(None).0,
            opened_at: Instant::now(),
        });
    }

    /// Subscribes to a trade's events; `None` for unknown or closed trades.
    /// The receiver immediately holds the latched event when one was
    /// published before the subscription.
    pub async fn subscribe(&self, trade_id: Uuid) -> Option<watch::Receiver<Option<TradeEvent>>> {
        let channels = self.channels.read().await;
        channels
            .get(&trade_id)
            .map(|channel| channel.sender.subscribe())
    }

    /// Latches the trade's terminal event and wakes any waiters. Returns
    /// whether the trade is known to the hub.
    pub async fn publish(&self, trade_id: Uuid, event: TradeEvent) -> bool {
        let channels = self.channels.read().await;
        match channels.get(&trade_id) {
            Some(channel) => {
                channel.sender.send_replace(Some(event));
                true
            }
            None => false,
        }
    }

    /// Drops the trade's channel; pending receivers see the stream close
    pub async fn close(&self, trade_id: Uuid) {
        let mut channels = self.channels.write().await;
        channels.remove(&trade_id);
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.channels.read().await.len()
    }
}
