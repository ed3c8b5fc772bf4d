//! End-to-end scenarios for the lottery entrance.
//!
//! Each test drives a `LotteryEntrance` the way a page would: start it on
//! the wallet's network, render, click "Enter Raffle", and react to
//! `WinnerPicked`, against the in-memory chain from
//! `lottery_entrance::testing`.
//!
//! Run:
//! ```bash
//! cargo test -p lottery-entrance-integration-tests
//! ```

use cosmwasm_std::Uint256;
use lottery_entrance::msg::{NotificationKind, NotificationPosition};
use lottery_entrance::testing::{
    Call, MockChain, RecordingSink, LOCAL_CHAIN_ID, RAFFLE_ADDRESS, WINNER_ADDRESS,
};
use lottery_entrance::{EnterOutcome, EntranceConfig, EntranceError, EntranceView, Phase};
use raffle_entrance_common::{format_ether, parse_chain_id};

// ─── Constants ───

/// 0.01 ETH, the usual local deployment fee
const ENTRANCE_FEE: u128 = 10_000_000_000_000_000;
const PLAYER_TWO_WINNER: &str = "0x70997970c51812dc3a010c7d01b50e0d17dc79c8";

// ─── Helpers ───

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn local_chain() -> MockChain {
    init_logging();
    let chain = MockChain::new();
    chain.set_raffle(Uint256::from(ENTRANCE_FEE), Uint256::zero(), "0");
    chain
}

// ─── Configuration ───

#[test]
fn test_config_from_deployment_json() {
    let json = format!(
        r#"{{
            "addresses": {{
                "31337": ["{RAFFLE_ADDRESS}"],
                "11155111": ["0x1111111111111111111111111111111111111111", "0x2222222222222222222222222222222222222222"]
            }},
            "confirmations": 2,
            "notification": {{
                "kind": "success",
                "title": "Raffle",
                "message": "You're in!",
                "position": "bottom_r"
            }}
        }}"#
    );
    let config = EntranceConfig::from_json_str(&json).unwrap();
    assert_eq!(config.confirmations, 2);
    assert_eq!(
        config.resolve_contract(11155111).unwrap().as_str(),
        "0x1111111111111111111111111111111111111111"
    );
    assert_eq!(config.notification.kind, NotificationKind::Success);
    assert_eq!(config.notification.position, NotificationPosition::BottomR);

    // Wallets report the network as hex.
    let chain_id = parse_chain_id("0x7a69").unwrap();
    assert_eq!(chain_id, LOCAL_CHAIN_ID);
    assert_eq!(config.resolve_contract(chain_id).unwrap().as_str(), RAFFLE_ADDRESS);
}

#[test]
fn test_config_rejects_bad_table() {
    let err = EntranceConfig::from_json_str(r#"{"addresses":{"31337":["raffle"]}}"#).unwrap_err();
    assert!(matches!(err, EntranceError::InvalidAddress { .. }));

    // Keys are decimal; a hex key could never be looked up.
    let err = EntranceConfig::from_json_str(&format!(
        r#"{{"addresses":{{"0x7a69":["{RAFFLE_ADDRESS}"]}}}}"#
    ))
    .unwrap_err();
    assert!(matches!(err, EntranceError::InvalidChainId { .. }));
}

// ─── Full flows ───

#[tokio::test]
async fn test_full_entry_and_draw_cycle() {
    let chain = local_chain();
    let sink = RecordingSink::with_journal(&chain);
    let mut entrance = chain.entrance_with_sink(sink.clone());

    // 1. Before the wallet is connected nothing is resolved.
    assert_eq!(entrance.render(), EntranceView::NoContract);

    // 2. Network enabled: first snapshot.
    entrance.start().await.unwrap();
    let text = entrance.render().to_string();
    assert!(text.contains("[ Enter Raffle ]"));
    assert!(text.contains("Entrance Fee: 0.01 ETH"));
    assert!(text.contains("Number Of Players: 0"));
    assert!(text.contains("Recent Winner: 0"));

    // 3. Two entries.
    for expected_players in 1u32..=2 {
        let outcome = entrance.enter_raffle().await.unwrap();
        assert!(matches!(outcome, EnterOutcome::Confirmed(_)));
        assert_eq!(entrance.snapshot().num_players, Uint256::from(expected_players));
    }
    assert_eq!(sink.notifications().len(), 2);
    assert_eq!(chain.listener_count(), 1);

    // 4. The keeper picks a winner; the entrance follows without a click.
    let refreshes = entrance.refreshes();
    assert_eq!(chain.pick_winner(PLAYER_TWO_WINNER), 1);
    let event = entrance.next_event().await.unwrap();
    entrance.handle_winner_picked(event).await.unwrap();
    assert_eq!(entrance.refreshes(), refreshes + 1);

    let text = entrance.render().to_string();
    assert!(text.contains("Number Of Players: 0"));
    assert!(text.contains(&format!("Recent Winner: {PLAYER_TWO_WINNER}")));

    // 5. Teardown closes the listener.
    entrance.teardown();
    assert_eq!(chain.listener_count(), 0);
}

#[tokio::test]
async fn test_unsupported_network_stays_inert() {
    let chain = local_chain();
    chain.set_chain_id(Some(137));
    let mut entrance = chain.entrance();
    entrance.start().await.unwrap();

    assert_eq!(entrance.phase(), Phase::NoContract);
    assert_eq!(
        entrance.render().to_string(),
        "Hi from lottery entrance!\nNo Raffle Address Detected for current network"
    );
    assert_eq!(entrance.enter_raffle().await.unwrap(), EnterOutcome::Ignored);
    assert_eq!(entrance.drain_events().await, 0);
    assert!(chain.journal().is_empty());
}

#[tokio::test]
async fn test_snapshot_fields_come_from_one_refresh() {
    let chain = local_chain();
    chain.set_raffle(Uint256::from(100u32), Uint256::from(3u32), WINNER_ADDRESS);
    let mut entrance = chain.entrance();
    entrance.start().await.unwrap();

    // A refresh where only the winner read fails must not mix new fee and
    // player count with the old winner.
    chain.set_raffle(Uint256::from(ENTRANCE_FEE), Uint256::from(8u32), PLAYER_TWO_WINNER);
    chain.fail_query("getRecentWinner");
    assert!(entrance.refresh().await.is_err());

    let snapshot = entrance.snapshot();
    assert_eq!(snapshot.entrance_fee, Uint256::from(100u32));
    assert_eq!(snapshot.num_players, Uint256::from(3u32));
    assert_eq!(snapshot.recent_winner, WINNER_ADDRESS);
    assert_eq!(format_ether(snapshot.entrance_fee).unwrap(), "0.0000000000000001");
}

#[tokio::test]
async fn test_repeated_confirmations_refresh_once_each() {
    let chain = local_chain();
    let mut entrance = chain.entrance();
    entrance.start().await.unwrap();
    entrance.enter_raffle().await.unwrap();
    let after_first = entrance.refreshes();

    // A second confirmation refreshes exactly once and keeps the listener.
    entrance.enter_raffle().await.unwrap();
    assert_eq!(entrance.refreshes(), after_first + 1);
    assert_eq!(chain.listener_count(), 1);

    // Each event occurrence refreshes exactly once.
    chain.pick_winner(WINNER_ADDRESS);
    assert_eq!(entrance.drain_events().await, 1);
    assert_eq!(entrance.refreshes(), after_first + 2);
}

#[tokio::test]
async fn test_event_and_confirmation_in_same_tick_refresh_once() {
    let chain = local_chain();
    let mut entrance = chain.entrance();
    entrance.start().await.unwrap();
    entrance.enter_raffle().await.unwrap();
    let before = entrance.refreshes();

    // The draw lands while the next entry is being confirmed; nothing
    // drains the listener in between.
    assert_eq!(chain.pick_winner(PLAYER_TWO_WINNER), 1);
    entrance.enter_raffle().await.unwrap();

    assert_eq!(entrance.refreshes(), before + 1);
    assert_eq!(entrance.drain_events().await, 0);
    assert_eq!(entrance.refreshes(), before + 1);
    assert_eq!(entrance.snapshot().recent_winner, PLAYER_TWO_WINNER);
    assert_eq!(entrance.snapshot().num_players, Uint256::one());
    assert_eq!(chain.listener_count(), 1);
}

#[tokio::test]
async fn test_rejected_entry_then_retry() {
    let chain = local_chain();
    let sink = RecordingSink::new();
    let mut entrance = chain.entrance_with_sink(sink.clone());
    entrance.start().await.unwrap();

    chain.fail_submit(Some("MetaMask Tx Signature: User denied transaction signature."));
    let err = entrance.enter_raffle().await.unwrap_err();
    assert!(err.to_string().contains("User denied"));
    assert!(!entrance.render().to_string().contains("(disabled)"));
    assert!(sink.notifications().is_empty());

    chain.fail_submit(None);
    assert!(matches!(
        entrance.enter_raffle().await.unwrap(),
        EnterOutcome::Confirmed(_)
    ));
    assert_eq!(sink.notifications().len(), 1);
}

#[tokio::test]
async fn test_confirmations_from_config() {
    let chain = local_chain();
    let mut config = chain.config();
    config.confirmations = 3;
    let mut entrance =
        lottery_entrance::LotteryEntrance::new(chain.session(), RecordingSink::new(), config)
            .unwrap();
    entrance.start().await.unwrap();

    let EnterOutcome::Confirmed(receipt) = entrance.enter_raffle().await.unwrap() else {
        panic!("entry should confirm");
    };
    assert_eq!(receipt.confirmations, 3);
    assert!(chain
        .journal()
        .iter()
        .any(|call| *call == Call::Wait(receipt.hash.clone())));
}

#[tokio::test]
async fn test_switching_networks() {
    let chain = local_chain();
    let mut entrance = chain.entrance();
    entrance.start().await.unwrap();
    entrance.enter_raffle().await.unwrap();
    assert!(entrance.is_watching());

    chain.set_chain_id(Some(1));
    entrance.network_changed().await.unwrap();
    assert_eq!(entrance.phase(), Phase::NoContract);
    assert!(!entrance.is_watching());
    assert_eq!(chain.pick_winner(WINNER_ADDRESS), 0);

    chain.set_chain_id(Some(LOCAL_CHAIN_ID));
    entrance.network_changed().await.unwrap();
    assert_eq!(entrance.phase(), Phase::Ready);
    assert_eq!(entrance.snapshot().recent_winner, WINNER_ADDRESS);
}

#[test]
fn test_invalid_confirmations_rejected_at_construction() {
    let chain = local_chain();
    let mut config = chain.config();
    config.confirmations = 0;
    let result = lottery_entrance::LotteryEntrance::new(chain.session(), RecordingSink::new(), config);
    assert!(matches!(result, Err(EntranceError::InvalidConfirmations)));
}
