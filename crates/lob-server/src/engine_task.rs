//! Central engine loop.
//!
//! This task owns the `MatchingEngine` instance and processes all
//! `EngineRequest`s coming from clients, one at a time. That is the
//! only serialisation the engine needs: it is never shared.
//!
//! Routing policy:
//! - `Added`, `Filled`, `BestQuote`, `Rejected`: sent **only** to the
//!   originating client.
//! - `Trade`, `TopOfBook`: broadcast to **all** connected clients.

use std::collections::HashMap;

use lob_core::{MatchingEngine, OutputMessage};
use tracing::{debug, info, warn};

use crate::types::{ClientId, ClientRegistry, EngineRequest, EngineRx, OutboundTx};

/// Run the central engine processing loop.
///
/// - `engine_rx`: receives requests from all client tasks.
/// - `clients`: registry of connected clients and their outbound channels.
pub async fn run_engine_loop(mut engine_rx: EngineRx, clients: ClientRegistry) {
    let mut engine = MatchingEngine::new();

    while let Some(req) = engine_rx.recv().await {
        let EngineRequest { client_id, msg } = req;
        debug!(client = client_id.0, ?msg, "engine request");

        let outputs = engine.process_message(msg);

        if outputs.is_empty() {
            continue;
        }

        // Snapshot of current clients to minimize lock hold time.
        let current_clients = {
            let guard = clients.read().await;
            guard.clone()
        };

        for out in outputs {
            route_output(client_id, &out, &current_clients);
        }
    }

    info!("engine loop shutting down (engine_rx closed)");
}

/// Route a single `OutputMessage` to the appropriate client(s).
pub(crate) fn route_output(
    origin_client: ClientId,
    msg: &OutputMessage,
    clients: &HashMap<ClientId, OutboundTx>,
) {
    match msg {
        OutputMessage::Added(_)
        | OutputMessage::Filled(_)
        | OutputMessage::BestQuote(_)
        | OutputMessage::Rejected(_) => {
            if let Some(tx) = clients.get(&origin_client) {
                if tx.send(msg.clone()).is_err() {
                    warn!(client = origin_client.0, "client channel closed");
                }
            }
        }
        OutputMessage::Trade(_) | OutputMessage::TopOfBook(_) => {
            for (cid, tx) in clients.iter() {
                if tx.send(msg.clone()).is_err() {
                    warn!(client = cid.0, "client channel closed");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use lob_core::{AddOrder, BookSide, ExecuteOrder, InputMessage, OrderType, Side};
    use rust_decimal::Decimal;
    use tokio::sync::{mpsc, RwLock};

    fn price(units: i64) -> Decimal {
        Decimal::new(units, 0)
    }

    #[tokio::test]
    async fn fills_go_to_origin_and_trades_are_broadcast() {
        let (maker_tx, mut maker_rx) = mpsc::unbounded_channel();
        let (taker_tx, mut taker_rx) = mpsc::unbounded_channel();

        let mut registry = HashMap::new();
        registry.insert(ClientId(1), maker_tx);
        registry.insert(ClientId(2), taker_tx);
        let clients: ClientRegistry = Arc::new(RwLock::new(registry));

        let (engine_tx, engine_rx) = mpsc::unbounded_channel();
        let engine = tokio::spawn(run_engine_loop(engine_rx, clients));

        engine_tx
            .send(EngineRequest {
                client_id: ClientId(1),
                msg: InputMessage::AddOrder(AddOrder {
                    quantity: 5,
                    price: price(100),
                    side: BookSide::Ask,
                }),
            })
            .unwrap();
        engine_tx
            .send(EngineRequest {
                client_id: ClientId(2),
                msg: InputMessage::ExecuteOrder(ExecuteOrder {
                    order_type: OrderType::Market,
                    quantity: 3,
                    side: Side::Buy,
                    price: None,
                }),
            })
            .unwrap();
        drop(engine_tx);
        engine.await.unwrap();

        let mut maker = Vec::new();
        while let Ok(msg) = maker_rx.try_recv() {
            maker.push(msg);
        }
        let mut taker = Vec::new();
        while let Ok(msg) = taker_rx.try_recv() {
            taker.push(msg);
        }

        // Maker: its own ack, the TOB after resting, the trade, the TOB after the trade.
        assert!(matches!(maker[0], OutputMessage::Added(_)));
        assert_eq!(maker.iter().filter(|m| matches!(m, OutputMessage::Trade(_))).count(), 1);
        assert!(!maker.iter().any(|m| matches!(m, OutputMessage::Filled(_))));

        // Taker: broadcasts plus its own fill, never the maker's ack.
        assert!(!taker.iter().any(|m| matches!(m, OutputMessage::Added(_))));
        let filled: Vec<_> = taker
            .iter()
            .filter_map(|m| match m {
                OutputMessage::Filled(f) => Some(*f),
                _ => None,
            })
            .collect();
        assert_eq!(filled.len(), 1);
        assert_eq!(filled[0].units_transacted, 3);
        assert_eq!(filled[0].total_value, price(300));
    }

    #[test]
    fn rejects_only_reach_the_sender() {
        let (a_tx, mut a_rx) = mpsc::unbounded_channel();
        let (b_tx, mut b_rx) = mpsc::unbounded_channel();
        let mut clients = HashMap::new();
        clients.insert(ClientId(1), a_tx);
        clients.insert(ClientId(2), b_tx);

        route_output(ClientId(2), &OutputMessage::rejected("bad"), &clients);

        assert!(a_rx.try_recv().is_err());
        assert_eq!(b_rx.try_recv().unwrap(), OutputMessage::rejected("bad"));
    }
}
