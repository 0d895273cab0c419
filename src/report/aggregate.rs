//! Groups expense transactions by category and month.

use crate::model::{Amount, MonthKey, Transaction};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Categories the user has toggled off. Filtering happens before aggregation, so toggling never
/// patches an existing result; the caller re-runs [`aggregate`].
#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExclusionSet(BTreeSet<String>);

impl ExclusionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips `category` in or out of the set. Returns `true` when it is now excluded.
    pub fn toggle(&mut self, category: impl Into<String>) -> bool {
        let category = category.into();
        if self.0.remove(&category) {
            false
        } else {
            self.0.insert(category);
            true
        }
    }

    pub fn contains(&self, category: &str) -> bool {
        self.0.contains(category)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for ExclusionSet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// The spending of one category.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    name: String,
    total: Amount,
    /// Only months with activity are present.
    monthly_amounts: BTreeMap<MonthKey, Amount>,
    /// Share of the grand total in percent; zero when the grand total is zero.
    percentage: Decimal,
}

impl CategoryBreakdown {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn total(&self) -> Amount {
        self.total
    }

    pub fn monthly_amounts(&self) -> &BTreeMap<MonthKey, Amount> {
        &self.monthly_amounts
    }

    /// The amount spent in `month`, zero if there was none.
    pub fn amount_in(&self, month: &MonthKey) -> Amount {
        self.monthly_amounts
            .get(month)
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    pub fn percentage(&self) -> Decimal {
        self.percentage
    }
}

#[derive(Default)]
struct Accumulator {
    total: Amount,
    months: BTreeMap<MonthKey, Amount>,
}

/// Builds the per-category breakdown of the expense transactions whose category is not excluded.
///
/// The result is sorted by total, largest first, with ties ordered by category name so that
/// colors and legend positions derived from the order are stable.
pub fn aggregate<'a>(
    transactions: impl IntoIterator<Item = &'a Transaction>,
    exclusions: &ExclusionSet,
) -> Vec<CategoryBreakdown> {
    let mut by_category: BTreeMap<&str, Accumulator> = BTreeMap::new();
    for t in transactions {
        if !t.is_expense() || exclusions.contains(t.category()) {
            continue;
        }
        let acc = by_category.entry(t.category()).or_default();
        acc.total += t.amount();
        *acc.months.entry(t.month()).or_default() += t.amount();
    }

    let grand_total: Amount = by_category.values().map(|acc| acc.total).sum();

    let mut breakdowns: Vec<CategoryBreakdown> = by_category
        .into_iter()
        .map(|(name, acc)| CategoryBreakdown {
            name: name.to_string(),
            total: acc.total,
            monthly_amounts: acc.months,
            percentage: acc.total.percent_of(grand_total),
        })
        .collect();
    breakdowns.sort_by(|a, b| {
        b.total
            .compare(&a.total)
            .then_with(|| a.name.cmp(&b.name))
    });

    debug!(
        "Aggregated {} categories, grand total {grand_total}, {} excluded",
        breakdowns.len(),
        exclusions.iter().count()
    );
    breakdowns
}

/// The sum of all breakdown totals.
pub fn grand_total(breakdowns: &[CategoryBreakdown]) -> Amount {
    breakdowns.iter().map(CategoryBreakdown::total).sum()
}
