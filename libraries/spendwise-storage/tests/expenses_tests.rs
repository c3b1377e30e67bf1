//! Integration tests for expenses vertical slice
//!
//! Tests expense operations including:
//! - Insert and fetch round trip through the schema
//! - Owner-scoped listing, newest date first
//! - Owner-filtered update and delete


use spendwise_core::{types::*, ExpenseStore};
use spendwise_storage::expenses;
use test_helpers::*;

#[tokio::test]
async fn test_insert_and_get_expense() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let owner = UserId::generate();

    let expense = test_expense(&owner, "Groceries", 3);
    expenses::insert(pool, &expense)
        .await
        .expect("Failed to insert expense");

    let retrieved = expenses::get_by_id(pool, &expense.id)
        .await
        .unwrap()
        .expect("expense should exist");

    assert_eq!(retrieved.id, expense.id);
    assert_eq!(retrieved.owner, owner);
    assert_eq!(retrieved.title, "Groceries");
    assert_eq!(retrieved.amount, 12.5);
    assert_eq!(retrieved.category, "Food");
    assert_eq!(retrieved.date, expense.date);
    assert_eq!(
        retrieved.created_at.timestamp_millis(),
        expense.created_at.timestamp_millis()
    );
}

#[tokio::test]
async fn test_get_missing_expense() {
    let test_db = TestDb::new().await;

    let missing = expenses::get_by_id(test_db.pool(), &ExpenseId::generate())
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_list_is_owner_scoped_and_newest_first() {
    let test_db = TestDb::new().await;
    let store = &test_db.store;
    let alice = UserId::generate();
    let bob = UserId::generate();

    for (title, day) in [("D1", 1), ("D3", 3), ("D2", 2)] {
        store
            .insert_expense(&test_expense(&alice, title, day))
            .await
            .unwrap();
    }
    store
        .insert_expense(&test_expense(&bob, "Bob's", 9))
        .await
        .unwrap();

    let listed = store.list_expenses(&alice).await.unwrap();
    let titles: Vec<&str> = listed.iter().map(|e| e.title.as_str()).collect();

    assert_eq!(titles, ["D3", "D2", "D1"]);
    assert!(listed.iter().all(|e| e.owner == alice));
}

#[tokio::test]
async fn test_list_empty_for_new_user() {
    let test_db = TestDb::new().await;

    let listed = test_db
        .store
        .list_expenses(&UserId::generate())
        .await
        .unwrap();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn test_update_overwrites_mutable_fields_only() {
    let test_db = TestDb::new().await;
    let store = &test_db.store;
    let owner = UserId::generate();

    let mut expense = test_expense(&owner, "Taxi", 4);
    store.insert_expense(&expense).await.unwrap();

    let patch = ExpensePatch::new(Some("Train"), Some(30.0), None, None).unwrap();
    assert!(expense.apply(patch));
    assert!(store.update_expense(&expense).await.unwrap());

    let stored = store.get_expense(&expense.id).await.unwrap().unwrap();
    assert_eq!(stored.title, "Train");
    assert_eq!(stored.amount, 30.0);
    assert_eq!(stored.category, "Food");
    assert_eq!(stored.owner, owner);
}

#[tokio::test]
async fn test_update_with_foreign_owner_matches_nothing() {
    let test_db = TestDb::new().await;
    let store = &test_db.store;
    let owner = UserId::generate();

    let expense = test_expense(&owner, "Taxi", 4);
    store.insert_expense(&expense).await.unwrap();

    let mut forged = expense.clone();
    forged.owner = UserId::generate();
    forged.title = "Forged".to_string();

    assert!(!store.update_expense(&forged).await.unwrap());

    let stored = store.get_expense(&expense.id).await.unwrap().unwrap();
    assert_eq!(stored.title, "Taxi");
    assert_eq!(stored.owner, owner);
}

#[tokio::test]
async fn test_delete_is_owner_filtered_and_permanent() {
    let test_db = TestDb::new().await;
    let store = &test_db.store;
    let owner = UserId::generate();
    let intruder = UserId::generate();

    let expense = test_expense(&owner, "Cinema", 6);
    store.insert_expense(&expense).await.unwrap();

    assert!(!store.delete_expense(&expense.id, &intruder).await.unwrap());
    assert!(store.get_expense(&expense.id).await.unwrap().is_some());

    assert!(store.delete_expense(&expense.id, &owner).await.unwrap());
    assert!(store.get_expense(&expense.id).await.unwrap().is_none());

    // Second delete finds nothing
    assert!(!store.delete_expense(&expense.id, &owner).await.unwrap());
}

#[tokio::test]
async fn test_schema_rejects_non_positive_amount() {
    let test_db = TestDb::new().await;
    let owner = UserId::generate();

    let mut expense = test_expense(&owner, "Refund", 7);
    expense.amount = -1.0;

    let result = expenses::insert(test_db.pool(), &expense).await;
    assert!(result.is_err(), "CHECK constraint should reject negative amount");
}
