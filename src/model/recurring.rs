//! Recurring transaction definitions and their expansion into dated transactions.

use crate::model::{Amount, Transaction, TransactionType};
use crate::Result;
use anyhow::{bail, Context};
use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

const MAX_SPAN_YEARS: u32 = 100;

/// How often a recurring transaction repeats.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    #[default]
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

serde_plain::derive_display_from_serialize!(Frequency);
serde_plain::derive_fromstr_from_deserialize!(Frequency);

impl Frequency {
    /// The date one period after `date`. Month-based steps clamp to the end of a shorter month.
    fn step(&self, date: NaiveDate) -> Option<NaiveDate> {
        match self {
            Frequency::Daily => date.checked_add_days(Days::new(1)),
            Frequency::Weekly => date.checked_add_days(Days::new(7)),
            Frequency::Monthly => date.checked_add_months(Months::new(1)),
            Frequency::Yearly => date.checked_add_months(Months::new(12)),
        }
    }
}

/// A transaction that repeats between two dates.
///
/// Example:
/// ```json
/// {
///   "name": "Rent",
///   "category": "Housing",
///   "tags": [],
///   "amount": "850.00",
///   "type": "expense",
///   "startDate": "2024-01-01",
///   "endDate": "2024-12-31",
///   "frequency": "monthly"
/// }
/// ```
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringTransaction {
    name: String,
    category: String,
    #[serde(default)]
    tags: Vec<String>,
    amount: Amount,
    #[serde(rename = "type")]
    kind: TransactionType,
    start_date: NaiveDate,
    end_date: NaiveDate,
    frequency: Frequency,
}

impl RecurringTransaction {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        tags: Vec<String>,
        amount: Amount,
        kind: TransactionType,
        start_date: NaiveDate,
        end_date: NaiveDate,
        frequency: Frequency,
    ) -> Result<Self> {
        let recurring = Self {
            name: name.into(),
            category: category.into(),
            tags,
            amount,
            kind,
            start_date,
            end_date,
            frequency,
        };
        recurring.validate()?;
        Ok(recurring)
    }

    /// Checks the amount is positive and the date span is forward and at most 100 years long.
    pub fn validate(&self) -> Result<()> {
        if !self.amount.is_positive() {
            bail!("Recurring transaction '{}': amount must be positive", self.name)
        }
        if self.end_date <= self.start_date {
            bail!(
                "Recurring transaction '{}': end date {} must be after start date {}",
                self.name,
                self.end_date,
                self.start_date
            )
        }
        let limit = self
            .start_date
            .checked_add_months(Months::new(MAX_SPAN_YEARS * 12))
            .with_context(|| format!("Start date {} is out of range", self.start_date))?;
        if self.end_date > limit {
            bail!(
                "Recurring transaction '{}': end date cannot be more than {MAX_SPAN_YEARS} years \
                after start date",
                self.name
            )
        }
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Every scheduled date from the start date through the end date, inclusive.
    ///
    /// Each step is taken from the previous occurrence, so a monthly schedule starting on the 31st
    /// settles on the shortest day it has been clamped to.
    pub fn occurrences(&self) -> Vec<NaiveDate> {
        let mut dates = Vec::new();
        let mut current = Some(self.start_date);
        while let Some(date) = current.filter(|d| *d <= self.end_date) {
            dates.push(date);
            current = self.frequency.step(date);
        }
        dates
    }

    /// Expands the schedule into concrete transactions, each with a fresh id and linked back to
    /// `recurring_id`.
    pub fn expand(&self, recurring_id: &str) -> Result<Vec<Transaction>> {
        self.validate()?;
        let transactions = self
            .occurrences()
            .into_iter()
            .map(|date| {
                Transaction::new(
                    Uuid::new_v4().to_string(),
                    self.name.clone(),
                    self.category.clone(),
                    self.tags.clone(),
                    self.amount,
                    self.kind,
                    date,
                )
                .map(|t| t.with_recurring_id(recurring_id))
            })
            .collect::<Result<Vec<_>>>()?;
        debug!(
            "Expanded recurring transaction '{}' into {} occurrences",
            self.name,
            transactions.len()
        );
        Ok(transactions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn recurring(start: &str, end: &str, frequency: Frequency) -> Result<RecurringTransaction> {
        RecurringTransaction::new(
            "Rent",
            "Housing",
            vec!["home".to_string()],
            Amount::from(850),
            TransactionType::Expense,
            date(start),
            date(end),
            frequency,
        )
    }

    #[test]
    fn test_weekly_occurrences() {
        let r = recurring("2024-01-01", "2024-01-29", Frequency::Weekly).unwrap();
        let dates = r.occurrences();
        assert_eq!(
            dates,
            vec![
                date("2024-01-01"),
                date("2024-01-08"),
                date("2024-01-15"),
                date("2024-01-22"),
                date("2024-01-29"),
            ]
        );
    }

    #[test]
    fn test_daily_occurrences_include_end() {
        let r = recurring("2024-02-27", "2024-03-01", Frequency::Daily).unwrap();
        assert_eq!(r.occurrences().len(), 4);
    }

    #[test]
    fn test_monthly_clamps_from_previous_occurrence() {
        let r = recurring("2024-01-31", "2024-04-30", Frequency::Monthly).unwrap();
        assert_eq!(
            r.occurrences(),
            vec![
                date("2024-01-31"),
                date("2024-02-29"),
                date("2024-03-29"),
                date("2024-04-29"),
            ]
        );
    }

    #[test]
    fn test_yearly_leap_day() {
        let r = recurring("2024-02-29", "2026-03-01", Frequency::Yearly).unwrap();
        assert_eq!(
            r.occurrences(),
            vec![date("2024-02-29"), date("2025-02-28"), date("2026-02-28")]
        );
    }

    #[test]
    fn test_validation() {
        assert!(recurring("2024-01-01", "2024-01-01", Frequency::Daily).is_err());
        assert!(recurring("2024-02-01", "2024-01-01", Frequency::Daily).is_err());
        assert!(recurring("2000-01-01", "2100-01-02", Frequency::Yearly).is_err());
        assert!(recurring("2000-01-01", "2100-01-01", Frequency::Yearly).is_ok());

        let zero = RecurringTransaction::new(
            "Nothing",
            "None",
            vec![],
            Amount::ZERO,
            TransactionType::Expense,
            date("2024-01-01"),
            date("2024-02-01"),
            Frequency::Monthly,
        );
        assert!(zero.unwrap_err().to_string().contains("must be positive"));
    }

    #[test]
    fn test_expand() {
        let r = recurring("2024-01-15", "2024-03-15", Frequency::Monthly).unwrap();
        let transactions = r.expand("r-42").unwrap();
        assert_eq!(transactions.len(), 3);
        for t in &transactions {
            assert_eq!(t.recurring_id(), Some("r-42"));
            assert_eq!(t.category(), "Housing");
            assert_eq!(t.amount(), Amount::from(850));
            assert!(t.is_expense());
        }
        assert_ne!(transactions[0].id(), transactions[1].id());
        assert_eq!(transactions[2].date(), date("2024-03-15"));
    }

    #[test]
    fn test_deserialize() {
        let json = r#"{
            "name": "Salary",
            "category": "Work",
            "amount": 2500,
            "type": "income",
            "startDate": "2024-01-31",
            "endDate": "2024-06-30",
            "frequency": "monthly"
        }"#;
        let r: RecurringTransaction = serde_json::from_str(json).unwrap();
        assert!(r.validate().is_ok());
        assert_eq!(r.frequency(), Frequency::from_str("monthly").unwrap());
        assert_eq!(r.occurrences().len(), 6);
    }
}
