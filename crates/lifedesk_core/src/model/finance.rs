//! Personal finance domain model.
//!
//! # Invariants
//! - All money is integer cents; transaction amounts are strictly
//!   positive with direction carried by `kind`.

use crate::model::{require_non_negative, require_text, ValidationError};
use crate::store::codec;
use crate::store::{Record, RecordId, StoreError, StoreResult};
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::Row;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountKind {
    Checking,
    Savings,
    Credit,
    Cash,
}

fn account_kind_to_db(kind: AccountKind) -> &'static str {
    match kind {
        AccountKind::Checking => "checking",
        AccountKind::Savings => "savings",
        AccountKind::Credit => "credit",
        AccountKind::Cash => "cash",
    }
}

fn parse_account_kind(value: &str) -> Option<AccountKind> {
    match value {
        "checking" => Some(AccountKind::Checking),
        "savings" => Some(AccountKind::Savings),
        "credit" => Some(AccountKind::Credit),
        "cash" => Some(AccountKind::Cash),
        _ => None,
    }
}

/// Direction of a transaction relative to the account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    Expense,
}

fn transaction_kind_to_db(kind: TransactionKind) -> &'static str {
    match kind {
        TransactionKind::Income => "income",
        TransactionKind::Expense => "expense",
    }
}

fn parse_transaction_kind(value: &str) -> Option<TransactionKind> {
    match value {
        "income" => Some(TransactionKind::Income),
        "expense" => Some(TransactionKind::Expense),
        _ => None,
    }
}

/// A money account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub uuid: RecordId,
    pub name: String,
    pub kind: AccountKind,
    /// Balance at tracking start, integer cents.
    pub opening_balance_cents: i64,
    pub created_at: i64,
}

impl Account {
    pub fn new(
        name: impl Into<String>,
        kind: AccountKind,
        opening_balance_cents: i64,
        now_ms: i64,
    ) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.into(),
            kind,
            opening_balance_cents,
            created_at: now_ms,
        }
    }
}

impl Record for Account {
    const TABLE: &'static str = "accounts";
    const COLUMNS: &'static [&'static str] =
        &["uuid", "name", "kind", "opening_balance_cents", "created_at"];

    fn id(&self) -> RecordId {
        self.uuid
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text(&self.name, "account", "name")
    }

    fn bind_values(&self) -> Vec<Value> {
        vec![
            codec::id_value(self.uuid),
            codec::text(&self.name),
            codec::text(account_kind_to_db(self.kind)),
            codec::int(self.opening_balance_cents),
            codec::int(self.created_at),
        ]
    }

    fn from_row(row: &Row<'_>) -> StoreResult<Self> {
        let kind_text: String = row.get("kind")?;
        let kind = parse_account_kind(&kind_text).ok_or_else(|| {
            StoreError::InvalidData(format!("invalid account kind `{kind_text}` in accounts.kind"))
        })?;

        Ok(Self {
            uuid: codec::parse_id(row, "uuid")?,
            name: row.get("name")?,
            kind,
            opening_balance_cents: row.get("opening_balance_cents")?,
            created_at: row.get("created_at")?,
        })
    }
}

/// One income or expense posting against an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub uuid: RecordId,
    pub account_uuid: RecordId,
    pub kind: TransactionKind,
    /// Magnitude in integer cents; direction lives in `kind`.
    pub amount_cents: i64,
    pub category: Option<String>,
    pub memo: Option<String>,
    pub posted_on: NaiveDate,
    pub created_at: i64,
}

impl Transaction {
    pub fn new(
        account_uuid: RecordId,
        kind: TransactionKind,
        amount_cents: i64,
        posted_on: NaiveDate,
        now_ms: i64,
    ) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            account_uuid,
            kind,
            amount_cents,
            category: None,
            memo: None,
            posted_on,
            created_at: now_ms,
        }
    }
}

impl Record for Transaction {
    const TABLE: &'static str = "transactions";
    const COLUMNS: &'static [&'static str] = &[
        "uuid",
        "account_uuid",
        "kind",
        "amount_cents",
        "category",
        "memo",
        "posted_on",
        "created_at",
    ];
    const PARENT_COLUMN: Option<&'static str> = Some("account_uuid");

    fn id(&self) -> RecordId {
        self.uuid
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_non_negative(self.amount_cents, "transaction", "amount_cents")
    }

    fn bind_values(&self) -> Vec<Value> {
        vec![
            codec::id_value(self.uuid),
            codec::id_value(self.account_uuid),
            codec::text(transaction_kind_to_db(self.kind)),
            codec::int(self.amount_cents),
            codec::opt_text(self.category.as_deref()),
            codec::opt_text(self.memo.as_deref()),
            codec::date(self.posted_on),
            codec::int(self.created_at),
        ]
    }

    fn from_row(row: &Row<'_>) -> StoreResult<Self> {
        let kind_text: String = row.get("kind")?;
        let kind = parse_transaction_kind(&kind_text).ok_or_else(|| {
            StoreError::InvalidData(format!(
                "invalid transaction kind `{kind_text}` in transactions.kind"
            ))
        })?;

        Ok(Self {
            uuid: codec::parse_id(row, "uuid")?,
            account_uuid: codec::parse_id(row, "account_uuid")?,
            kind,
            amount_cents: row.get("amount_cents")?,
            category: row.get("category")?,
            memo: row.get("memo")?,
            posted_on: codec::parse_date(row, "posted_on")?,
            created_at: row.get("created_at")?,
        })
    }
}
