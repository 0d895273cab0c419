//! The legend shown next to a chart: every expense category in the window, including the ones
//! toggled off, plus the total of what is still included.

use crate::model::{Amount, Transaction};
use crate::report::aggregate::{grand_total, CategoryBreakdown, ExclusionSet};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

const DISPLAY_PERCENT_DP: u32 = 1;

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    name: String,
    excluded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    total: Option<Amount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    percentage: Option<Decimal>,
}

impl LegendEntry {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn excluded(&self) -> bool {
        self.excluded
    }

    pub fn total(&self) -> Option<Amount> {
        self.total
    }

    pub fn percentage(&self) -> Option<Decimal> {
        self.percentage
    }

    /// The percentage rounded to one decimal place, e.g. `33.3`.
    pub fn display_percentage(&self) -> Option<Decimal> {
        self.percentage.map(|p| p.round_dp(DISPLAY_PERCENT_DP))
    }
}

#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Legend {
    entries: Vec<LegendEntry>,
    active_total: Amount,
}

impl Legend {
    /// Builds the legend for `transactions`, which must be the same set `breakdowns` was
    /// aggregated from.
    ///
    /// Included categories keep the breakdown order; excluded categories follow by name.
    pub fn build<'a>(
        transactions: impl IntoIterator<Item = &'a Transaction>,
        breakdowns: &[CategoryBreakdown],
        exclusions: &ExclusionSet,
    ) -> Self {
        let included: BTreeSet<&str> = breakdowns.iter().map(|b| b.name()).collect();
        let others: BTreeSet<&str> = transactions
            .into_iter()
            .filter(|t| t.is_expense())
            .map(Transaction::category)
            .filter(|c| !included.contains(c))
            .collect();

        let mut entries: Vec<LegendEntry> = breakdowns
            .iter()
            .map(|b| LegendEntry {
                name: b.name().to_string(),
                excluded: false,
                total: Some(b.total()),
                percentage: Some(b.percentage()),
            })
            .collect();
        entries.extend(others.into_iter().map(|name| LegendEntry {
            name: name.to_string(),
            excluded: exclusions.contains(name),
            total: None,
            percentage: None,
        }));

        Self {
            entries,
            active_total: grand_total(breakdowns),
        }
    }

    pub fn entries(&self) -> &[LegendEntry] {
        &self.entries
    }

    /// The total of all included expense categories.
    pub fn active_total(&self) -> Amount {
        self.active_total
    }
}
