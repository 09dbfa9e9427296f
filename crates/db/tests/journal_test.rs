//! Integration tests for the journal repository.
//!
//! All tests require a running PostgreSQL (`DATABASE_URL`) and are ignored
//! by default: `cargo test -p stockbook-db -- --ignored`.

mod common;

use chrono::Utc;
use rust_decimal_macros::dec;
use stockbook_core::ledger::{
    JournalLineInput, JournalType, LedgerError, PostJournalEntryInput,
};
use stockbook_db::repositories::JournalRepository;
use stockbook_shared::types::{AccountId, UserId};

fn entry(lines: Vec<JournalLineInput>) -> PostJournalEntryInput {
    PostJournalEntryInput {
        date: Utc::now().date_naive(),
        description: "test entry".to_string(),
        entry_type: JournalType::Journal,
        lines,
        reference_id: None,
        created_by: UserId::new(),
    }
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (set DATABASE_URL)"]
async fn test_post_balanced_entry_updates_balances() {
    let db = common::fresh_db().await;
    common::seed_posting_accounts(&db).await;

    let repo = JournalRepository::new(db.clone());
    let accounts = stockbook_db::repositories::AccountRepository::new(db.clone());
    let cash = AccountId::from_uuid(accounts.get_by_code("1100").await.unwrap().id);
    let revenue = AccountId::from_uuid(accounts.get_by_code("4000").await.unwrap().id);

    let posted = repo
        .post_entry(entry(vec![
            JournalLineInput::debit(cash, dec!(100.00), None),
            JournalLineInput::credit(revenue, dec!(100.00), None),
        ]))
        .await
        .unwrap();

    assert_eq!(posted.entry.entry_number, "JE-000001");
    assert_eq!(posted.lines.len(), 2);

    // Asset debited +100, revenue credited +100.
    assert_eq!(common::account_balance(&db, "1100").await, dec!(100.00));
    assert_eq!(common::account_balance(&db, "4000").await, dec!(100.00));

    // The entry reads back with its lines.
    let fetched = repo
        .get_entry(stockbook_shared::types::JournalEntryId::from_uuid(
            posted.entry.id,
        ))
        .await
        .unwrap();
    assert_eq!(fetched.entry.entry_number, "JE-000001");
    assert_eq!(fetched.lines.len(), 2);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (set DATABASE_URL)"]
async fn test_unbalanced_entry_leaves_balances_unchanged() {
    let db = common::fresh_db().await;
    common::seed_posting_accounts(&db).await;

    let repo = JournalRepository::new(db.clone());
    let accounts = stockbook_db::repositories::AccountRepository::new(db.clone());
    let cash = AccountId::from_uuid(accounts.get_by_code("1100").await.unwrap().id);
    let revenue = AccountId::from_uuid(accounts.get_by_code("4000").await.unwrap().id);

    let result = repo
        .post_entry(entry(vec![
            JournalLineInput::debit(cash, dec!(100.00), None),
            JournalLineInput::credit(revenue, dec!(99.00), None),
        ]))
        .await;

    assert!(matches!(result, Err(LedgerError::Unbalanced { .. })));
    assert_eq!(common::account_balance(&db, "1100").await, dec!(0));
    assert_eq!(common::account_balance(&db, "4000").await, dec!(0));
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (set DATABASE_URL)"]
async fn test_entry_numbers_are_monotonic() {
    let db = common::fresh_db().await;
    common::seed_posting_accounts(&db).await;

    let repo = JournalRepository::new(db.clone());
    let accounts = stockbook_db::repositories::AccountRepository::new(db.clone());
    let cash = AccountId::from_uuid(accounts.get_by_code("1100").await.unwrap().id);
    let revenue = AccountId::from_uuid(accounts.get_by_code("4000").await.unwrap().id);

    let mut numbers = Vec::new();
    for _ in 0..3 {
        let posted = repo
            .post_entry(entry(vec![
                JournalLineInput::debit(cash, dec!(10.00), None),
                JournalLineInput::credit(revenue, dec!(10.00), None),
            ]))
            .await
            .unwrap();
        numbers.push(posted.entry.entry_number);
    }

    assert_eq!(numbers, vec!["JE-000001", "JE-000002", "JE-000003"]);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (set DATABASE_URL)"]
async fn test_unknown_account_rejects_whole_entry() {
    let db = common::fresh_db().await;
    common::seed_posting_accounts(&db).await;

    let repo = JournalRepository::new(db.clone());
    let accounts = stockbook_db::repositories::AccountRepository::new(db.clone());
    let cash = AccountId::from_uuid(accounts.get_by_code("1100").await.unwrap().id);

    let result = repo
        .post_entry(entry(vec![
            JournalLineInput::debit(cash, dec!(50.00), None),
            JournalLineInput::credit(AccountId::new(), dec!(50.00), None),
        ]))
        .await;

    assert!(matches!(result, Err(LedgerError::AccountNotFound(_))));
    assert_eq!(common::account_balance(&db, "1100").await, dec!(0));

    // The failed attempt must not leave an entry behind.
    let page = repo
        .list_entries(Default::default(), Default::default())
        .await
        .unwrap();
    assert!(page.data.is_empty());
}
