//! Personal finance use-case service.
//!
//! # Responsibility
//! - Account and transaction CRUD with cascade on account delete.
//! - Calendar-month summaries and running balances.
//!
//! # Invariants
//! - "This month" compares calendar month/year components, not a
//!   rolling 30-day window.
//! - Category grouping uses the "Uncategorized" fallback bucket.

use crate::derive::{group_by, in_same_month, sum_amounts};
use crate::model::finance::{Account, Transaction, TransactionKind};
use crate::store::{Collection, RecordId, SqliteCollection, StoreResult};
use chrono::NaiveDate;
use rusqlite::Connection;

pub const FALLBACK_CATEGORY: &str = "Uncategorized";

/// Spend total for one expense category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotal {
    pub category: String,
    pub total_cents: i64,
}

/// Income/expense rollup for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthSummary {
    pub income_cents: i64,
    pub expense_cents: i64,
    pub net_cents: i64,
    /// Expense totals per category, first-seen order, fallback bucket
    /// for uncategorized spend.
    pub by_category: Vec<CategoryTotal>,
}

/// Current balance derived from the opening balance and all postings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountBalance {
    pub account: Account,
    pub balance_cents: i64,
}

pub struct FinanceService<'conn> {
    conn: &'conn Connection,
}

impl<'conn> FinanceService<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn accounts(&self) -> StoreResult<SqliteCollection<'_, Account>> {
        SqliteCollection::try_new(self.conn)
    }

    fn transactions(&self) -> StoreResult<SqliteCollection<'_, Transaction>> {
        SqliteCollection::try_new(self.conn)
    }

    pub fn add_account(&self, account: &Account) -> StoreResult<RecordId> {
        self.accounts()?.insert(account)
    }

    pub fn list_accounts(&self) -> StoreResult<Vec<Account>> {
        self.accounts()?.list()
    }

    pub fn record_transaction(&self, transaction: &Transaction) -> StoreResult<RecordId> {
        self.transactions()?.insert(transaction)
    }

    pub fn list_transactions(&self, account_uuid: RecordId) -> StoreResult<Vec<Transaction>> {
        self.transactions()?.list_children(account_uuid)
    }

    pub fn delete_transaction(&self, id: RecordId) -> StoreResult<()> {
        self.transactions()?.delete(id)
    }

    /// Deletes an account and all of its transactions.
    pub fn delete_account(&self, id: RecordId) -> StoreResult<()> {
        self.accounts()?.delete(id)?;
        self.transactions()?.delete_children(id)?;
        Ok(())
    }

    /// Rollup over all transactions posted in `today`'s calendar month.
    pub fn month_summary(&self, today: NaiveDate) -> StoreResult<MonthSummary> {
        let transactions = self.transactions()?.list()?;
        let this_month: Vec<&Transaction> = transactions
            .iter()
            .filter(|transaction| in_same_month(transaction.posted_on, today))
            .collect();

        let income_cents = sum_amounts(
            this_month
                .iter()
                .filter(|transaction| transaction.kind == TransactionKind::Income)
                .map(|transaction| Some(transaction.amount_cents)),
        );

        let expenses: Vec<Transaction> = this_month
            .iter()
            .filter(|transaction| transaction.kind == TransactionKind::Expense)
            .map(|&transaction| transaction.clone())
            .collect();
        let expense_cents = sum_amounts(
            expenses
                .iter()
                .map(|transaction| Some(transaction.amount_cents)),
        );

        let by_category = group_by(&expenses, FALLBACK_CATEGORY, |transaction| {
            transaction.category.clone()
        })
        .into_iter()
        .map(|group| CategoryTotal {
            total_cents: sum_amounts(
                group
                    .members
                    .iter()
                    .map(|transaction| Some(transaction.amount_cents)),
            ),
            category: group.key,
        })
        .collect();

        Ok(MonthSummary {
            income_cents,
            expense_cents,
            net_cents: income_cents - expense_cents,
            by_category,
        })
    }

    /// Opening balance plus income minus expenses. `None` for an
    /// unknown account.
    pub fn account_balance(&self, account_uuid: RecordId) -> StoreResult<Option<AccountBalance>> {
        let Some(account) = self.accounts()?.get(account_uuid)? else {
            return Ok(None);
        };

        let transactions = self.transactions()?.list_children(account_uuid)?;
        let balance_cents = transactions
            .iter()
            .fold(account.opening_balance_cents, |balance, transaction| {
                match transaction.kind {
                    TransactionKind::Income => balance + transaction.amount_cents,
                    TransactionKind::Expense => balance - transaction.amount_cents,
                }
            });

        Ok(Some(AccountBalance {
            account,
            balance_cents,
        }))
    }
}
