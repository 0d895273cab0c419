use crate::model::{Amount, MonthKey};
use crate::Result;
use anyhow::{bail, Context};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::ops::Deref;
use tracing::warn;

/// The largest amount a single transaction may carry. Sums of any realistic number of amounts
/// below this stay far inside `Decimal`'s range.
const MAX_AMOUNT: i64 = 1_000_000_000_000_000;

/// Whether money came in or went out. Amounts are always stored unsigned; the sign is derived
/// from this.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Income,
    #[default]
    Expense,
}

serde_plain::derive_display_from_serialize!(TransactionType);
serde_plain::derive_fromstr_from_deserialize!(TransactionType);

/// A single dated, categorized transaction.
///
/// Deserializing goes through the same validation as [`Transaction::new`].
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TransactionRecord")]
pub struct Transaction {
    id: String,
    name: String,
    category: String,
    tags: Vec<String>,
    amount: Amount,
    #[serde(rename = "type")]
    kind: TransactionType,
    date: NaiveDate,
    /// Links a transaction generated from a recurring definition back to it.
    #[serde(rename = "recurringID", skip_serializing_if = "Option::is_none")]
    recurring_id: Option<String>,
}

/// The JSON shape of a transaction before it is validated.
#[derive(Deserialize)]
struct TransactionRecord {
    id: String,
    name: String,
    category: String,
    #[serde(default)]
    tags: Vec<String>,
    amount: Amount,
    #[serde(rename = "type")]
    kind: TransactionType,
    date: NaiveDate,
    #[serde(default, rename = "recurringID")]
    recurring_id: Option<String>,
}

impl TryFrom<TransactionRecord> for Transaction {
    type Error = anyhow::Error;

    fn try_from(record: TransactionRecord) -> Result<Self> {
        let transaction = Self {
            id: record.id,
            name: record.name,
            category: record.category,
            tags: record.tags,
            amount: record.amount,
            kind: record.kind,
            date: record.date,
            recurring_id: record.recurring_id,
        };
        transaction.validate()?;
        Ok(transaction)
    }
}

impl Transaction {
    /// Creates a transaction, failing if `amount` is negative.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        tags: Vec<String>,
        amount: Amount,
        kind: TransactionType,
        date: NaiveDate,
    ) -> Result<Self> {
        let transaction = Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            tags,
            amount,
            kind,
            date,
            recurring_id: None,
        };
        transaction.validate()?;
        Ok(transaction)
    }

    pub(crate) fn with_recurring_id(mut self, recurring_id: impl Into<String>) -> Self {
        self.recurring_id = Some(recurring_id.into());
        self
    }

    fn validate(&self) -> Result<()> {
        if self.amount.is_negative() {
            bail!(
                "Transaction '{}' has a negative amount {}; the sign must come from its type",
                self.id,
                self.amount
            )
        }
        if self.amount > Amount::from(MAX_AMOUNT) {
            bail!(
                "Transaction '{}' has an amount {} above the maximum of {MAX_AMOUNT}",
                self.id,
                self.amount
            )
        }
        if self.amount.is_zero() {
            warn!("Transaction '{}' has a zero amount", self.id);
        }
        Ok(())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn kind(&self) -> TransactionType {
        self.kind
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn month(&self) -> MonthKey {
        MonthKey::of(self.date)
    }

    pub fn recurring_id(&self) -> Option<&str> {
        self.recurring_id.as_deref()
    }
}

/// A validated list of transactions, as supplied by the backend.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Transactions(Vec<Transaction>);

impl Transactions {
    /// Wraps `data`, failing on the first transaction that violates the non-negative amount rule.
    pub fn new(data: Vec<Transaction>) -> Result<Self> {
        for transaction in &data {
            transaction.validate()?;
        }
        Ok(Self(data))
    }

    /// Parses a JSON array of transaction records.
    pub fn from_json(json: &str) -> Result<Self> {
        let data: Vec<Transaction> =
            serde_json::from_str(json).context("Unable to parse transactions JSON")?;
        Self::new(data)
    }

    pub fn data(&self) -> &[Transaction] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<Transaction> {
        self.0
    }
}

impl Deref for Transactions {
    type Target = [Transaction];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a> IntoIterator for &'a Transactions {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
