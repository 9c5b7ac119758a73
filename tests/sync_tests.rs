// Copyright (c) 2025 Saldo Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;
use saldo::models::{BudgetItem, CategoryItem, TransactionEntry};
use saldo::store;
use saldo::sync::{SyncChannel, SyncEvent, SyncMessage, SyncSession, SyncState};

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    saldo::db::init_schema(&conn).unwrap();
    conn
}

fn tx(id: &str, amount: &str) -> TransactionEntry {
    TransactionEntry {
        id: id.to_string(),
        date: NaiveDate::parse_from_str("2024-03-05", "%Y-%m-%d").unwrap(),
        r#type: "Cinema".to_string(),
        category: "Lazer".to_string(),
        amount: amount.parse::<Decimal>().unwrap(),
        payment_method: None,
        is_expense: true,
        is_recurrent: false,
    }
}

/// Records what the session sends; the "network" is the test moving messages
/// from one side's outbox into the other side's handler.
#[derive(Default)]
struct FakeChannel {
    sent: Vec<SyncMessage>,
    closed: bool,
}

impl SyncChannel for FakeChannel {
    fn send(&mut self, msg: &SyncMessage) -> Result<(), saldo::error::LedgerError> {
        self.sent.push(msg.clone());
        Ok(())
    }
    fn close(&mut self) {
        self.closed = true;
    }
}

fn open_both(
    host: &mut SyncSession,
    host_db: &Connection,
    hchan: &mut FakeChannel,
    joiner: &mut SyncSession,
    joiner_db: &Connection,
    jchan: &mut FakeChannel,
) {
    host.handle_event(host_db, hchan, SyncEvent::PeerFound).unwrap();
    host.handle_event(host_db, hchan, SyncEvent::Opened).unwrap();
    joiner.handle_event(joiner_db, jchan, SyncEvent::PeerFound).unwrap();
    joiner.handle_event(joiner_db, jchan, SyncEvent::Opened).unwrap();
}

#[test]
fn both_devices_converge_to_the_union() {
    let host_db = setup();
    let joiner_db = setup();

    // b exists on both sides with conflicting amounts.
    store::put_transaction(&host_db, &tx("a", "10")).unwrap();
    store::put_transaction(&host_db, &tx("b", "20")).unwrap();
    store::put_transaction(&joiner_db, &tx("b", "99")).unwrap();
    store::put_transaction(&joiner_db, &tx("c", "30")).unwrap();

    let mut host = SyncSession::host();
    let mut joiner = SyncSession::join();
    let mut hchan = FakeChannel::default();
    let mut jchan = FakeChannel::default();
    open_both(&mut host, &host_db, &mut hchan, &mut joiner, &joiner_db, &mut jchan);

    // Joiner opened the cycle with its snapshot.
    assert_eq!(jchan.sent.len(), 1);
    let offer = jchan.sent.remove(0);
    host.handle_event(&host_db, &mut hchan, SyncEvent::Message(offer)).unwrap();

    // Host answered with its consolidated post-merge snapshot.
    let fin = hchan.sent.remove(0);
    assert!(matches!(fin, SyncMessage::DataFinal { .. }));
    joiner.handle_event(&joiner_db, &mut jchan, SyncEvent::Message(fin)).unwrap();
    assert_eq!(joiner.state, SyncState::Completed);

    // Joiner confirmed; host completes on receipt.
    let done = jchan.sent.remove(0);
    assert_eq!(done, SyncMessage::Complete);
    host.handle_event(&host_db, &mut hchan, SyncEvent::Message(done)).unwrap();
    assert_eq!(host.state, SyncState::Completed);

    // Union of ids on both sides.
    for db in [&host_db, &joiner_db] {
        let mut ids: Vec<String> = store::all_transactions(db)
            .unwrap()
            .into_iter()
            .map(|t| t.id)
            .collect();
        ids.sort();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    // The joiner's version of b was applied last in the merge chain, so both
    // sides agree on it.
    for db in [&host_db, &joiner_db] {
        let b = store::all_transactions(db)
            .unwrap()
            .into_iter()
            .find(|t| t.id == "b")
            .unwrap();
        assert_eq!(b.amount, Decimal::from(99));
    }

    // Teardown after completion is not an error.
    host.handle_event(&host_db, &mut hchan, SyncEvent::Closed).unwrap();
    assert_eq!(host.state, SyncState::Completed);
}

#[test]
fn budgets_merge_by_id_and_categories_by_triple() {
    let host_db = setup();
    let joiner_db = setup();

    store::put_budget(
        &host_db,
        &BudgetItem {
            id: "bud1".to_string(),
            r#type: "Cinema".to_string(),
            category: "Lazer".to_string(),
            is_expense: true,
            target_amount: Decimal::from(100),
        },
    )
    .unwrap();
    let cat = CategoryItem {
        r#type: "Pet Shop".to_string(),
        category: "Animais".to_string(),
        is_expense: true,
    };
    // Both sides already know the same custom pair.
    store::add_custom_category(&host_db, &cat).unwrap();
    store::add_custom_category(&joiner_db, &cat).unwrap();

    let mut host = SyncSession::host();
    let mut joiner = SyncSession::join();
    let mut hchan = FakeChannel::default();
    let mut jchan = FakeChannel::default();
    open_both(&mut host, &host_db, &mut hchan, &mut joiner, &joiner_db, &mut jchan);

    let offer = jchan.sent.remove(0);
    host.handle_event(&host_db, &mut hchan, SyncEvent::Message(offer)).unwrap();
    let fin = hchan.sent.remove(0);
    joiner.handle_event(&joiner_db, &mut jchan, SyncEvent::Message(fin)).unwrap();

    // No duplicate classification rows on either side.
    assert_eq!(store::all_custom_categories(&host_db).unwrap().len(), 1);
    assert_eq!(store::all_custom_categories(&joiner_db).unwrap().len(), 1);
    // The host's budget reached the joiner unchanged.
    let budgets = store::all_budgets(&joiner_db).unwrap();
    assert_eq!(budgets.len(), 1);
    assert_eq!(budgets[0].id, "bud1");
}

#[test]
fn premature_close_is_an_error_and_merges_are_kept() {
    let host_db = setup();
    let mut host = SyncSession::host();
    let mut chan = FakeChannel::default();
    host.handle_event(&host_db, &mut chan, SyncEvent::PeerFound).unwrap();
    host.handle_event(&host_db, &mut chan, SyncEvent::Opened).unwrap();

    // The joiner's snapshot arrives and is merged...
    let payload = saldo::models::Snapshot {
        transactions: vec![tx("x", "42")],
        budgets: vec![],
        categories: vec![],
    };
    host.handle_event(&host_db, &mut chan, SyncEvent::Message(SyncMessage::Data { payload }))
        .unwrap();

    // ...then the channel dies before SYNC_COMPLETE.
    let err = host.handle_event(&host_db, &mut chan, SyncEvent::Closed);
    assert!(err.is_err());
    assert!(matches!(host.state, SyncState::Error(_)));

    // The partial merge is explicitly not rolled back.
    assert_eq!(store::all_transactions(&host_db).unwrap().len(), 1);
}

#[test]
fn transport_failure_surfaces_its_message() {
    let db = setup();
    let mut joiner = SyncSession::join();
    let mut chan = FakeChannel::default();
    joiner.handle_event(&db, &mut chan, SyncEvent::PeerFound).unwrap();
    let err = joiner.handle_event(&db, &mut chan, SyncEvent::Failed("connection reset".into()));
    assert!(err.is_err());
    assert_eq!(joiner.state, SyncState::Error("sync channel error: connection reset".into()));
}

#[test]
fn reset_tears_down_and_returns_to_idle() {
    let db = setup();
    let mut session = SyncSession::host();
    let mut chan = FakeChannel::default();
    session.handle_event(&db, &mut chan, SyncEvent::PeerFound).unwrap();
    session.reset(&mut chan);
    assert_eq!(session.state, SyncState::Idle);
    assert!(chan.closed);
}

#[test]
fn wire_format_uses_the_three_tagged_kinds() {
    let msg = SyncMessage::Data {
        payload: saldo::models::Snapshot::default(),
    };
    let json = serde_json::to_string(&msg).unwrap();
    assert!(json.contains("\"kind\":\"SYNC_DATA\""));
    assert!(json.contains("\"transactions\""));
    assert!(json.contains("\"budgets\""));
    assert!(json.contains("\"categories\""));

    let complete: SyncMessage = serde_json::from_str("{\"kind\":\"SYNC_COMPLETE\"}").unwrap();
    assert_eq!(complete, SyncMessage::Complete);

    let fin: SyncMessage = serde_json::from_str(
        "{\"kind\":\"SYNC_DATA_FINAL\",\"payload\":{\"transactions\":[],\"budgets\":[],\"categories\":[]}}",
    )
    .unwrap();
    assert!(matches!(fin, SyncMessage::DataFinal { .. }));
}
