//! Persistence round trips against real SQLite databases.

use chrono::NaiveDate;
use hma_core::{
    ApplicationState, Money, NewClient, NewLedgerEntry, NewServiceItem, View, STORAGE_KEY,
};
use hma_db::{Database, DbConfig};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
}

fn busy_state() -> ApplicationState {
    let mut state = ApplicationState::seeded();
    state
        .create_client(
            NewClient {
                name: "ali".into(),
                detail: "Fasakh".into(),
                initial_fee: "2500".into(),
            },
            today(),
        )
        .unwrap();
    let idx = state.clients().len() - 1;
    state.append_ledger_entry(
        idx,
        NewLedgerEntry {
            date: None,
            desc: "bayaran pertama".into(),
            amt: "-1000.50".into(),
        }
        .into_entry(today())
        .unwrap(),
    );
    state
        .add_service(NewServiceItem {
            name: "Affidavit".into(),
            price: "150".into(),
        })
        .unwrap();
    state.select_client(idx).unwrap();
    state.set_view(View::Invoice);
    state.set_logo(Some("data:image/png;base64,AAAA".into()));
    state
}

#[tokio::test]
async fn load_after_save_is_idempotent() {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let store = db.state_store();

    let first = store.load().await;
    store.save(&first).await.unwrap();
    assert_eq!(store.load().await, first);

    let state = busy_state();
    store.save(&state).await.unwrap();
    let loaded = store.load().await;
    assert_eq!(loaded, state);
    assert_eq!(
        loaded.clients().last().unwrap().balance(),
        Money::from_sen(149_950)
    );

    store.save(&loaded).await.unwrap();
    assert_eq!(store.load().await, state);
}

#[tokio::test]
async fn partial_document_is_defaulted_field_by_field() {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    db.kv()
        .put(
            STORAGE_KEY,
            r#"{"clients": [], "invoiceCounter": 7, "activeClientSelection": 999}"#,
        )
        .await
        .unwrap();

    let state = db.state_store().load().await;
    let seeded = ApplicationState::seeded();
    assert_eq!(state.clients(), seeded.clients());
    assert_eq!(state.pjs_records(), seeded.pjs_records());
    assert!(state.inventory().is_empty());
    assert_eq!(state.invoice_counter(), 7);
    assert_eq!(state.firm_logo(), None);
    assert_eq!(state.active_client_selection(), None);
}

#[tokio::test]
async fn state_survives_reopening_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hma.db");
    let state = busy_state();

    {
        let db = Database::new(DbConfig::new(&path)).await.unwrap();
        db.state_store().save(&state).await.unwrap();
        db.close().await;
    }

    let db = Database::new(DbConfig::new(&path)).await.unwrap();
    assert_eq!(db.state_store().load().await, state);

    let raw = db.kv().get(STORAGE_KEY).await.unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["currentView"], "invoice");
    assert_eq!(json["inventory"][0]["price"], 150);
}
