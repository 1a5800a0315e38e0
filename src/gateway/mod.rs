//! Chat-gateway boundary types.
//!
//! The engine neither knows nor cares which chat network delivers commands.
//! Inbound messages arrive on a channel in sequence order; outbound
//! notifications leave on another channel for the transport to deliver
//! best-effort. Bots (negative ids) are filtered before anything is sent.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// One inbound command record from the chat gateway. `seq` is monotonically
/// increasing; the server persists it as a watermark after processing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundMessage {
    pub seq: u64,
    pub sender_id: i64,
    pub sender_name: String,
    pub text: String,
    /// Unix seconds at the gateway.
    pub timestamp: i64,
}

/// One outbound notification. `actions` are optional button labels the
/// transport may render; transports without buttons can append them as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub target: i64,
    pub text: String,
    pub actions: Vec<String>,
}

impl OutgoingMessage {
    pub fn new(target: i64, text: impl Into<String>) -> Self {
        Self {
            target,
            text: text.into(),
            actions: Vec::new(),
        }
    }

    pub fn with_actions(target: i64, text: impl Into<String>, actions: &[&str]) -> Self {
        Self {
            target,
            text: text.into(),
            actions: actions.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Channel pair binding a transport to the engine loop.
pub struct GatewayChannels {
    pub inbound_tx: mpsc::UnboundedSender<InboundMessage>,
    pub inbound_rx: mpsc::UnboundedReceiver<InboundMessage>,
    pub outbound_tx: mpsc::UnboundedSender<OutgoingMessage>,
    pub outbound_rx: mpsc::UnboundedReceiver<OutgoingMessage>,
}

pub fn channels() -> GatewayChannels {
    let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();
    let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
    GatewayChannels {
        inbound_tx,
        inbound_rx,
        outbound_tx,
        outbound_rx,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outgoing_message_builders() {
        let plain = OutgoingMessage::new(5, "hello");
        assert!(plain.actions.is_empty());
        let with = OutgoingMessage::with_actions(5, "pick", &["/hit", "/miss"]);
        assert_eq!(with.actions, vec!["/hit".to_string(), "/miss".to_string()]);
    }
}
