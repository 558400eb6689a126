//! # Relay Flow Tests
//!
//! Chain A sends through its router; the message is delivered to the relay
//! on chain B by chain B's router.
//!
//! ## Flows Tested:
//!
//! 1. **Send → deliver**: fee paid on A, state recorded on B
//! 2. **Rejections**: unlisted destination, short balance, forged router
//! 3. **Serialized access**: relay shared between tasks behind a mutex

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use primitive_types::U256;
    use qc_15_message_relay::{
        encode_text, Address, ChainSelector, InMemoryEventLog, InMemoryNativeVault,
        InMemoryRouter, InMemoryTokenLedger, MessageRelayApi, MessageRelayService, RelayConfig,
        RelayError, RelayEvent,
    };
    use tokio::sync::Mutex;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const CHAIN_A: ChainSelector = ChainSelector(3478487238524512106);
    const CHAIN_B: ChainSelector = ChainSelector(16015286601757825753);

    const OWNER: Address = [0x01u8; 20];
    const FEE_TOKEN: Address = [0x11u8; 20];

    const RELAY_A: Address = [0xA1u8; 20];
    const ROUTER_A: Address = [0xA7u8; 20];
    const RELAY_B: Address = [0xB1u8; 20];
    const ROUTER_B: Address = [0xB7u8; 20];

    type Relay =
        MessageRelayService<InMemoryRouter, InMemoryTokenLedger, InMemoryNativeVault, InMemoryEventLog>;

    struct Chain {
        relay: Relay,
        router: Arc<InMemoryRouter>,
        ledger: Arc<InMemoryTokenLedger>,
        events: Arc<InMemoryEventLog>,
    }

    fn init_tracing() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    }

    fn chain(relay: Address, router: Address, balance: u64, fee: u64) -> Chain {
        let ledger = Arc::new(InMemoryTokenLedger::new());
        ledger.mint(FEE_TOKEN, relay, U256::from(balance));
        let router_adapter = Arc::new(InMemoryRouter::new(router, ledger.clone(), U256::from(fee)));
        let events = Arc::new(InMemoryEventLog::new());

        let config = RelayConfig {
            relay,
            owner: OWNER,
            router,
            fee_token: FEE_TOKEN,
        };
        let relay = MessageRelayService::new(
            config,
            router_adapter.clone(),
            ledger.clone(),
            Arc::new(InMemoryNativeVault::new()),
            events.clone(),
        )
        .expect("valid config");

        Chain {
            relay,
            router: router_adapter,
            ledger,
            events,
        }
    }

    /// Deliver everything chain A's router accepted to chain B.
    fn deliver_all(source: &Chain, destination: &mut Chain) -> Vec<Result<(), RelayError>> {
        source
            .router
            .sent()
            .iter()
            .map(|sent| {
                let envelope = InMemoryRouter::inbound_for(sent, CHAIN_A);
                destination.relay.accept_message(ROUTER_B, envelope)
            })
            .collect()
    }

    // =============================================================================
    // SEND → DELIVER
    // =============================================================================

    #[tokio::test]
    async fn test_hello_round_trip() {
        init_tracing();
        let mut a = chain(RELAY_A, ROUTER_A, 10, 3);
        let mut b = chain(RELAY_B, ROUTER_B, 0, 0);

        a.relay.set_whitelisted(OWNER, CHAIN_B, true).unwrap();
        let message_id = a
            .relay
            .send_message(OWNER, CHAIN_B, RELAY_B, "hello")
            .await
            .unwrap();

        assert_eq!(a.ledger.balance(FEE_TOKEN, RELAY_A), U256::from(7));
        assert_eq!(a.ledger.balance(FEE_TOKEN, ROUTER_A), U256::from(3));
        assert_eq!(a.events.sent_count(), 1);
        assert!(a.events.events().contains(&RelayEvent::MessageSent {
            message_id,
            destination_chain: CHAIN_B,
            receiver: RELAY_B,
            text: "hello".to_string(),
            fee_token: FEE_TOKEN,
            fee: U256::from(3),
        }));

        let results = deliver_all(&a, &mut b);
        assert!(results.iter().all(|r| r.is_ok()));

        let state = b.relay.last_received();
        assert_eq!(state.last_message_id, message_id);
        assert_eq!(state.last_text, "hello");
        assert_eq!(
            b.events.events(),
            vec![RelayEvent::MessageReceived {
                message_id,
                source_chain: CHAIN_A,
                sender: RELAY_A,
                text: "hello".to_string(),
                token: None,
                amount: None,
            }]
        );
    }

    #[tokio::test]
    async fn test_latest_message_overwrites_previous() {
        let mut a = chain(RELAY_A, ROUTER_A, 10, 1);
        let mut b = chain(RELAY_B, ROUTER_B, 0, 0);
        a.relay.set_whitelisted(OWNER, CHAIN_B, true).unwrap();

        a.relay.send_message(OWNER, CHAIN_B, RELAY_B, "one").await.unwrap();
        let second = a
            .relay
            .send_message(OWNER, CHAIN_B, RELAY_B, "two")
            .await
            .unwrap();
        deliver_all(&a, &mut b);

        assert_eq!(b.relay.last_received().last_message_id, second);
        assert_eq!(b.relay.last_received().last_text, "two");
        assert_eq!(b.relay.stats().messages_received, 2);
    }

    // =============================================================================
    // REJECTIONS
    // =============================================================================

    #[tokio::test]
    async fn test_unlisted_destination_keeps_balance() {
        let mut a = chain(RELAY_A, ROUTER_A, 10, 3);

        let result = a.relay.send_message(OWNER, CHAIN_B, RELAY_B, "hello").await;

        assert_eq!(result, Err(RelayError::DestinationNotWhitelisted(CHAIN_B)));
        assert_eq!(a.ledger.balance(FEE_TOKEN, RELAY_A), U256::from(10));
        assert!(a.ledger.approvals().is_empty());
        assert_eq!(a.router.send_count(), 0);
    }

    #[tokio::test]
    async fn test_delisted_destination_blocks_later_sends() {
        let mut a = chain(RELAY_A, ROUTER_A, 10, 3);
        a.relay.set_whitelisted(OWNER, CHAIN_B, true).unwrap();
        a.relay.send_message(OWNER, CHAIN_B, RELAY_B, "ok").await.unwrap();

        a.relay.set_whitelisted(OWNER, CHAIN_B, false).unwrap();
        let result = a.relay.send_message(OWNER, CHAIN_B, RELAY_B, "blocked").await;

        assert!(matches!(result, Err(RelayError::DestinationNotWhitelisted(_))));
        assert_eq!(a.router.send_count(), 1);
        assert_eq!(a.ledger.balance(FEE_TOKEN, RELAY_A), U256::from(7));
    }

    #[tokio::test]
    async fn test_short_balance_blocks_send() {
        let mut a = chain(RELAY_A, ROUTER_A, 4, 3);
        a.relay.set_whitelisted(OWNER, CHAIN_B, true).unwrap();

        a.relay.send_message(OWNER, CHAIN_B, RELAY_B, "first").await.unwrap();
        let result = a.relay.send_message(OWNER, CHAIN_B, RELAY_B, "second").await;

        assert_eq!(
            result,
            Err(RelayError::InsufficientBalance {
                balance: U256::from(1),
                required: U256::from(3),
            })
        );
        assert_eq!(a.ledger.approvals().len(), 1);
        assert_eq!(a.router.send_count(), 1);
        assert_eq!(a.events.sent_count(), 1);
    }

    #[tokio::test]
    async fn test_forged_router_rejected() {
        let mut b = chain(RELAY_B, ROUTER_B, 0, 0);
        let forged = qc_15_message_relay::InboundEnvelope {
            message_id: [0xEEu8; 32],
            source_chain: CHAIN_A,
            sender: RELAY_A,
            data: encode_text("spoofed"),
            token_amounts: vec![],
        };

        let result = b.relay.accept_message(ROUTER_A, forged);

        assert_eq!(result, Err(RelayError::InvalidRouter { caller: ROUTER_A }));
        assert!(b.relay.last_received().is_empty());
        assert!(b.events.events().is_empty());
    }

    // =============================================================================
    // SERIALIZED ACCESS
    // =============================================================================

    #[tokio::test]
    async fn test_shared_relay_serializes_sends() {
        let a = chain(RELAY_A, ROUTER_A, 100, 2);
        let router = a.router.clone();
        let ledger = a.ledger.clone();
        let relay = Arc::new(Mutex::new(a.relay));
        relay
            .lock()
            .await
            .set_whitelisted(OWNER, CHAIN_B, true)
            .unwrap();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let relay = relay.clone();
                tokio::spawn(async move {
                    let text = format!("message {i}");
                    relay
                        .lock()
                        .await
                        .send_message(OWNER, CHAIN_B, RELAY_B, &text)
                        .await
                })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap().unwrap());
        }
        ids.sort();
        ids.dedup();

        assert_eq!(ids.len(), 8);
        assert_eq!(router.send_count(), 8);
        assert_eq!(ledger.balance(FEE_TOKEN, RELAY_A), U256::from(84));
        assert_eq!(relay.lock().await.stats().fees_paid, U256::from(16));
    }
}
