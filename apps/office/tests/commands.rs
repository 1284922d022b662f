//! End-to-end command tests against an in-memory or temporary database.

use chrono::NaiveDate;
use hma_core::{
    BalanceStanding, Money, NewClient, NewLedgerEntry, NewPjsRecord, NewServiceItem, PjsSort,
    PjsSortKey, SortDirection, TransferKind, View,
};
use hma_db::{Database, DbConfig};
use hma_office::commands::invoice::{InvoiceRequest, ManualLine, ServicePick};
use hma_office::commands::{client, invoice, ledger, logo, pjs, service, transfer, view};
use hma_office::{ErrorCode, Office};
use hma_sync::OfficeConfig;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

async fn office() -> Office {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    Office::with_database(OfficeConfig::default(), db)
        .await
        .with_today(today())
}

fn new_client(name: &str, fee: &str) -> NewClient {
    NewClient {
        name: name.to_string(),
        detail: "Fasakh".to_string(),
        initial_fee: fee.to_string(),
    }
}

#[tokio::test]
async fn fresh_office_starts_from_seed() {
    let office = office().await;

    let clients = client::list_clients(&office);
    assert!(!clients.is_empty());
    assert!(clients.iter().all(|c| !c.selected));
    assert_eq!(view::current_view(&office), View::ClientRegistry);

    office.close().await;
}

#[tokio::test]
async fn client_lifecycle_with_ledger() {
    let office = office().await;

    let created = client::add_client(&office, new_client("ali", "2500")).unwrap();
    assert_eq!(created.name, "ALI");

    let index = client::list_clients(&office)
        .iter()
        .position(|c| c.id == created.id)
        .unwrap();
    client::open_client(&office, index).unwrap();

    let view = ledger::add_entry(
        &office,
        None,
        NewLedgerEntry {
            date: None,
            desc: "bayaran pertama".into(),
            amt: "-1000".into(),
        },
    )
    .unwrap();
    assert_eq!(view.rows.len(), 2);
    assert_eq!(view.rows[1].desc, "BAYARAN PERTAMA");
    assert_eq!(view.rows[1].date, today());
    assert_eq!(view.balance, Money::from_ringgit(1500));
    assert_eq!(view.standing, BalanceStanding::Outstanding);

    let view = ledger::add_entry(
        &office,
        None,
        NewLedgerEntry {
            date: None,
            desc: "baki".into(),
            amt: "-1500".into(),
        },
    )
    .unwrap();
    assert_eq!(view.balance, Money::zero());
    assert_eq!(view.standing, BalanceStanding::Settled);

    let statement = ledger::statement(&office, None).unwrap();
    assert!(statement.is_statement());
    assert_eq!(statement.total(), Money::zero());
    assert_eq!(statement.line_items().len(), 3);

    let view = ledger::delete_entry(&office, None, 2).unwrap();
    assert_eq!(view.balance, Money::from_ringgit(1500));

    let deleted = client::delete_client(&office, &created.id).unwrap();
    assert_eq!(deleted.id, created.id);
    assert!(client::list_clients(&office).iter().all(|c| !c.selected));

    office.close().await;
}

#[tokio::test]
async fn rejected_commands_change_nothing() {
    let office = office().await;
    let before = office.state().snapshot();

    let err = client::add_client(&office, new_client("   ", "100")).unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationError);

    let err = client::delete_client(&office, "no-such-id").unwrap_err();
    assert_eq!(err.code, ErrorCode::NotFound);

    let err = ledger::add_entry(
        &office,
        None,
        NewLedgerEntry {
            date: None,
            desc: "yuran".into(),
            amt: "100".into(),
        },
    )
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationError);

    let err = ledger::delete_entry(&office, Some(0), 99).unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationError);

    let err = invoice::issue_invoice(
        &office,
        InvoiceRequest {
            customer: "CASH".into(),
            ..Default::default()
        },
    )
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationError);

    let err = view::set_view(&office, "dashboard").unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationError);

    let after = office.state().snapshot();
    assert_eq!(after.version, before.version);
    assert_eq!(after.state, before.state);

    office.close().await;
}

#[tokio::test]
async fn invoice_uses_price_list_and_advances_counter() {
    let office = office().await;

    let item = service::add_service(
        &office,
        NewServiceItem {
            name: "akuan berkanun".into(),
            price: "150".into(),
        },
    )
    .unwrap();

    let doc = invoice::issue_invoice(
        &office,
        InvoiceRequest {
            customer: "cash".into(),
            services: vec![ServicePick {
                id: item.id.clone(),
                quantity: 2,
            }],
            lines: vec![ManualLine {
                name: "SETEM".into(),
                unit_price: Money::from_ringgit(10),
                quantity: 1,
            }],
            date: None,
        },
    )
    .unwrap();

    assert_eq!(doc.document_number(), "RES-20250001");
    assert_eq!(doc.customer_name(), hma_core::invoice::CASH_CUSTOMER);
    assert_eq!(doc.line_items()[0].name, "AKUAN BERKANUN (x2)");
    assert_eq!(doc.total(), Money::from_ringgit(310));

    let second = invoice::issue_invoice(
        &office,
        InvoiceRequest {
            customer: "ALI".into(),
            lines: vec![ManualLine {
                name: "SALINAN".into(),
                unit_price: Money::from_ringgit(1),
                quantity: 0,
            }],
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(second.document_number(), "RES-20250002");
    assert_eq!(second.total(), Money::zero());

    let err = invoice::issue_invoice(
        &office,
        InvoiceRequest {
            customer: "ALI".into(),
            services: vec![ServicePick {
                id: "missing".into(),
                quantity: 1,
            }],
            ..Default::default()
        },
    )
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::NotFound);
    assert_eq!(office.state().read(|s| s.invoice_counter()), 3);

    let backdated = invoice::issue_invoice(
        &office,
        InvoiceRequest {
            customer: "ALI".into(),
            lines: vec![ManualLine {
                name: "SETEM".into(),
                unit_price: Money::from_ringgit(10),
                quantity: 1,
            }],
            date: Some(NaiveDate::from_ymd_opt(2024, 12, 30).unwrap()),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(backdated.document_number(), "RES-20240003");
    assert_eq!(backdated.date(), NaiveDate::from_ymd_opt(2024, 12, 30).unwrap());

    office.close().await;
}

#[tokio::test]
async fn notarization_log_sorting_and_totals() {
    let office = office().await;

    transfer::apply_import(
        &office,
        hma_core::transfer::prepare(
            TransferKind::Notarization,
            "Date,Name,Detail,Amount\n2025-01-10,A,X,100\n2025-03-05,B,Y,50\n",
            today(),
        )
        .unwrap(),
    )
    .unwrap();

    pjs::add_pjs(
        &office,
        NewPjsRecord {
            date: Some(NaiveDate::from_ymd_opt(2025, 3, 20).unwrap()),
            name: "c".into(),
            detail: "".into(),
            amount: "25".into(),
        },
    )
    .unwrap();

    let newest_first = pjs::list_pjs(&office, PjsSort::default());
    let names: Vec<&str> = newest_first.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["C", "B", "A"]);

    let cheapest = pjs::list_pjs(
        &office,
        PjsSort::new(PjsSortKey::Amount, SortDirection::Ascending),
    );
    assert_eq!(cheapest[0].amount, Money::from_ringgit(25));

    let summary = pjs::monthly_summary(&office, 2025);
    assert_eq!(summary.months[0], Money::from_ringgit(100));
    assert_eq!(summary.months[2], Money::from_ringgit(75));
    assert_eq!(summary.total, Money::from_ringgit(175));

    let err = pjs::delete_pjs(&office, "missing").unwrap_err();
    assert_eq!(err.code, ErrorCode::NotFound);
    let removed = pjs::delete_pjs(&office, &newest_first[0].id).unwrap();
    assert_eq!(removed.name, "C");

    office.close().await;
}

#[tokio::test]
async fn export_then_import_through_files() {
    let dir = tempfile::tempdir().unwrap();
    let office = office().await;

    client::add_client(&office, new_client("zaki", "1200.50")).unwrap();
    let path = transfer::export_to_file(
        &office,
        TransferKind::Clients,
        Some(dir.path().join("clients.csv")),
    )
    .await
    .unwrap();

    let text = tokio::fs::read_to_string(&path).await.unwrap();
    assert!(text.contains("ZAKI"));
    assert!(text.contains("1200.50"));

    client::open_client(&office, 0).unwrap();
    let pending = transfer::read_import(&office, TransferKind::Clients, &path)
        .await
        .unwrap();
    let expected = client::list_clients(&office).len();
    assert_eq!(pending.len(), expected);

    let count = transfer::apply_import(&office, pending).unwrap();
    assert_eq!(count, expected);

    let clients = client::list_clients(&office);
    assert!(clients.iter().all(|c| !c.selected));
    let zaki = clients.iter().find(|c| c.name == "ZAKI").unwrap();
    assert_eq!(zaki.balance, Money::from_sen(120_050));
    assert_eq!(zaki.entries, 1);

    let bad = dir.path().join("bad.csv");
    tokio::fs::write(&bad, "foo,bar\n1,2\n").await.unwrap();
    let err = transfer::read_import(&office, TransferKind::Services, &bad)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ImportError);

    let err = transfer::read_import(&office, TransferKind::Services, &dir.path().join("nope.csv"))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::IoError);

    office.close().await;
}

#[tokio::test]
async fn logo_is_stored_as_data_url() {
    let dir = tempfile::tempdir().unwrap();
    let office = office().await;

    assert_eq!(logo::effective_logo(&office), hma_core::DEFAULT_LOGO);

    let file = dir.path().join("logo.png");
    tokio::fs::write(&file, b"abc").await.unwrap();
    let url = logo::set_logo(&office, &file).await.unwrap();
    assert_eq!(url, "data:image/png;base64,YWJj");
    assert_eq!(logo::effective_logo(&office), url);

    logo::clear_logo(&office).unwrap();
    assert_eq!(logo::effective_logo(&office), hma_core::DEFAULT_LOGO);

    office.close().await;
}

#[tokio::test]
async fn state_persists_across_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = OfficeConfig::default();
    config.storage.database_path = dir.path().join("data").join("hma.db");

    let office = Office::open(config.clone()).await.unwrap().with_today(today());
    client::add_client(&office, new_client("persisted", "10")).unwrap();
    view::set_view(&office, "invoice").unwrap();
    office.close().await;

    let office = Office::open(config).await.unwrap();
    assert!(client::list_clients(&office)
        .iter()
        .any(|c| c.name == "PERSISTED"));
    assert_eq!(view::current_view(&office), View::Invoice);
    office.close().await;
}
