use chrono::NaiveDate;
use lifedesk_core::db::open_db_in_memory;
use lifedesk_core::model::finance::{Account, AccountKind, Transaction, TransactionKind};
use lifedesk_core::service::finance_service::{FinanceService, FALLBACK_CATEGORY};

const NOW_MS: i64 = 1_700_000_000_000;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn expense(
    account: &Account,
    amount_cents: i64,
    category: Option<&str>,
    posted_on: NaiveDate,
) -> Transaction {
    let mut transaction = Transaction::new(
        account.uuid,
        TransactionKind::Expense,
        amount_cents,
        posted_on,
        NOW_MS,
    );
    transaction.category = category.map(str::to_string);
    transaction
}

#[test]
fn month_summary_uses_calendar_components_not_a_rolling_window() {
    let conn = open_db_in_memory().unwrap();
    let service = FinanceService::new(&conn);

    let account = Account::new("Checking", AccountKind::Checking, 100_000, NOW_MS);
    service.add_account(&account).unwrap();

    let today = date(2025, 3, 31);
    // In-month postings, including the 1st.
    service
        .record_transaction(&expense(&account, 5_000, Some("Groceries"), date(2025, 3, 1)))
        .unwrap();
    service
        .record_transaction(&Transaction::new(
            account.uuid,
            TransactionKind::Income,
            250_000,
            date(2025, 3, 25),
            NOW_MS,
        ))
        .unwrap();
    // One day later but a different calendar month.
    service
        .record_transaction(&expense(&account, 9_999, Some("Travel"), date(2025, 4, 1)))
        .unwrap();
    // Same month, previous year.
    service
        .record_transaction(&expense(&account, 7_777, Some("Groceries"), date(2024, 3, 15)))
        .unwrap();

    let summary = service.month_summary(today).unwrap();
    assert_eq!(summary.income_cents, 250_000);
    assert_eq!(summary.expense_cents, 5_000);
    assert_eq!(summary.net_cents, 245_000);
}

#[test]
fn category_rollup_uses_fallback_bucket_in_first_seen_order() {
    let conn = open_db_in_memory().unwrap();
    let service = FinanceService::new(&conn);

    let account = Account::new("Checking", AccountKind::Checking, 0, NOW_MS);
    service.add_account(&account).unwrap();

    let today = date(2025, 3, 15);
    service
        .record_transaction(&expense(&account, 2_000, Some("Groceries"), date(2025, 3, 2)))
        .unwrap();
    service
        .record_transaction(&expense(&account, 1_500, None, date(2025, 3, 3)))
        .unwrap();
    service
        .record_transaction(&expense(&account, 3_000, Some("Groceries"), date(2025, 3, 9)))
        .unwrap();

    let summary = service.month_summary(today).unwrap();
    assert_eq!(summary.by_category.len(), 2);
    assert_eq!(summary.by_category[0].category, "Groceries");
    assert_eq!(summary.by_category[0].total_cents, 5_000);
    assert_eq!(summary.by_category[1].category, FALLBACK_CATEGORY);
    assert_eq!(summary.by_category[1].total_cents, 1_500);
}

#[test]
fn balance_is_opening_plus_income_minus_expenses() {
    let conn = open_db_in_memory().unwrap();
    let service = FinanceService::new(&conn);

    let account = Account::new("Savings", AccountKind::Savings, 50_000, NOW_MS);
    service.add_account(&account).unwrap();

    service
        .record_transaction(&Transaction::new(
            account.uuid,
            TransactionKind::Income,
            20_000,
            date(2025, 1, 5),
            NOW_MS,
        ))
        .unwrap();
    service
        .record_transaction(&expense(&account, 12_500, Some("Rent"), date(2025, 1, 6)))
        .unwrap();

    let balance = service.account_balance(account.uuid).unwrap().unwrap();
    assert_eq!(balance.balance_cents, 57_500);
}

#[test]
fn deleting_an_account_cascades_to_transactions() {
    let conn = open_db_in_memory().unwrap();
    let service = FinanceService::new(&conn);

    let account = Account::new("Cash", AccountKind::Cash, 0, NOW_MS);
    service.add_account(&account).unwrap();
    service
        .record_transaction(&expense(&account, 500, None, date(2025, 1, 2)))
        .unwrap();

    service.delete_account(account.uuid).unwrap();

    assert!(service.list_accounts().unwrap().is_empty());
    assert!(service.list_transactions(account.uuid).unwrap().is_empty());
}
