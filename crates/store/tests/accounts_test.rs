//! Integration tests for the chart of accounts service.

mod common;

use common::{context, date, post_entry, seed_account};
use meridian_core::registry::{AccountCategory, AccountType, NormalBalance, RegistryError};
use meridian_store::services::CreateAccountInput;
use rust_decimal_macros::dec;

fn input(code: &str, name: &str) -> CreateAccountInput {
    CreateAccountInput {
        code: code.to_string(),
        name: name.to_string(),
        description: None,
        is_header: false,
        is_system: false,
        parent_id: None,
    }
}

#[tokio::test]
async fn test_create_account_classifies_code() {
    let ctx = context();
    let account = ctx.accounts.create_account(input("1450", "Accumulated depreciation")).await.unwrap();

    assert_eq!(account.account_type, AccountType::Asset);
    assert_eq!(account.category, AccountCategory::FixedAsset);
    assert_eq!(account.normal_balance, NormalBalance::Debit);
}

#[tokio::test]
async fn test_create_account_rejects_malformed_code() {
    let ctx = context();
    assert!(matches!(
        ctx.accounts.create_account(input("10", "Too short")).await,
        Err(RegistryError::InvalidCode(_))
    ));
    assert!(matches!(
        ctx.accounts.create_account(input("12AB", "Not numeric")).await,
        Err(RegistryError::InvalidCode(_))
    ));
}

#[tokio::test]
async fn test_duplicate_code_conflicts() {
    let ctx = context();
    ctx.accounts.create_account(input("1010", "Cash")).await.unwrap();
    assert!(matches!(
        ctx.accounts.create_account(input("1010", "Cash again")).await,
        Err(RegistryError::DuplicateCode(_))
    ));
}

#[tokio::test]
async fn test_parent_must_exist_and_be_header() {
    let ctx = context();
    let detail = ctx.accounts.create_account(input("1010", "Cash")).await.unwrap();

    let mut child = input("1011", "Petty cash");
    child.parent_id = Some(meridian_shared::types::AccountId::new());
    assert!(matches!(
        ctx.accounts.create_account(child).await,
        Err(RegistryError::ParentNotFound(_))
    ));

    let mut child = input("1011", "Petty cash");
    child.parent_id = Some(detail.id);
    assert!(matches!(
        ctx.accounts.create_account(child).await,
        Err(RegistryError::ParentNotHeader(_))
    ));
}

#[tokio::test]
async fn test_change_code_reclassifies_and_guards_system() {
    let ctx = context();
    let account = ctx.accounts.create_account(input("1010", "Misc")).await.unwrap();

    let changed = ctx.accounts.change_code(account.id, "6150").await.unwrap();
    assert_eq!(changed.code, "6150");
    assert_eq!(changed.account_type, AccountType::Expense);
    assert_eq!(changed.normal_balance, NormalBalance::Debit);

    let mut system = input("3000", "Retained earnings");
    system.is_system = true;
    let system = ctx.accounts.create_account(system).await.unwrap();
    assert!(matches!(
        ctx.accounts.change_code(system.id, "3100").await,
        Err(RegistryError::SystemCodeImmutable(_))
    ));
}

#[tokio::test]
async fn test_change_code_rejects_taken_code() {
    let ctx = context();
    ctx.accounts.create_account(input("1010", "Cash")).await.unwrap();
    let other = ctx.accounts.create_account(input("1020", "Savings")).await.unwrap();

    assert!(matches!(
        ctx.accounts.change_code(other.id, "1010").await,
        Err(RegistryError::DuplicateCode(_))
    ));
}

#[tokio::test]
async fn test_delete_blocked_by_postings() {
    let ctx = context();
    let cash = seed_account(&ctx, "1010", "Cash").await;
    let revenue = seed_account(&ctx, "4000", "Sales").await;
    post_entry(&ctx, date(2026, 1, 10), cash.id, revenue.id, dec!(100)).await;

    assert!(matches!(
        ctx.accounts.delete_account(cash.id).await,
        Err(RegistryError::HasPostings(_))
    ));
}

#[tokio::test]
async fn test_delete_blocked_by_children() {
    let ctx = context();
    let mut header = input("1000", "Assets");
    header.is_header = true;
    let header = ctx.accounts.create_account(header).await.unwrap();

    let mut child = input("1010", "Cash");
    child.parent_id = Some(header.id);
    ctx.accounts.create_account(child).await.unwrap();

    assert!(matches!(
        ctx.accounts.delete_account(header.id).await,
        Err(RegistryError::HasChildren(_))
    ));
}

#[tokio::test]
async fn test_delete_unused_account() {
    let ctx = context();
    let account = seed_account(&ctx, "1020", "Savings").await;
    ctx.accounts.delete_account(account.id).await.unwrap();
    assert!(matches!(
        ctx.accounts.get_account(account.id).await,
        Err(RegistryError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_subtree_traversal() {
    let ctx = context();
    let mut assets = input("1000", "Assets");
    assets.is_header = true;
    let assets = ctx.accounts.create_account(assets).await.unwrap();

    let mut current = input("1100", "Current assets");
    current.is_header = true;
    current.parent_id = Some(assets.id);
    let current = ctx.accounts.create_account(current).await.unwrap();

    let mut cash = input("1110", "Cash");
    cash.parent_id = Some(current.id);
    let cash = ctx.accounts.create_account(cash).await.unwrap();

    let mut fixed = input("1400", "Fixed assets");
    fixed.is_header = true;
    fixed.parent_id = Some(assets.id);
    let fixed = ctx.accounts.create_account(fixed).await.unwrap();

    let subtree = ctx.accounts.subtree(assets.id).await.unwrap();
    let ids: Vec<_> = subtree.iter().map(|account| account.id).collect();
    assert_eq!(subtree.len(), 4);
    assert_eq!(ids[0], assets.id);
    assert!(ids.contains(&current.id));
    assert!(ids.contains(&cash.id));
    assert!(ids.contains(&fixed.id));

    // Children of one node only.
    let children = ctx.accounts.children(assets.id).await.unwrap();
    assert_eq!(children.len(), 2);
}

#[tokio::test]
async fn test_get_by_code() {
    let ctx = context();
    let account = seed_account(&ctx, "2100", "Accounts payable").await;

    let found = ctx.accounts.get_by_code("2100").await.unwrap();
    assert_eq!(found.id, account.id);
    assert_eq!(found.account_type, AccountType::Liability);
    assert_eq!(found.normal_balance, NormalBalance::Credit);

    assert!(matches!(
        ctx.accounts.get_by_code("9998").await,
        Err(RegistryError::CodeNotFound(_))
    ));
}
