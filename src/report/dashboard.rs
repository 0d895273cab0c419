//! Runs the whole pipeline for one view of the data.

use crate::model::{Amount, MonthKey, Transaction};
use crate::report::aggregate::{aggregate, CategoryBreakdown, ExclusionSet};
use crate::report::align::{align, column_totals, data_axis, AlignedSeries};
use crate::report::cashflow::{summarize, Cashflow};
use crate::report::legend::Legend;
use crate::report::range::{resolve, InvalidRange, RangeSelection, Window};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The view state the caller owns between calls: the selected range and the categories toggled
/// off.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct DashboardState {
    selection: RangeSelection,
    #[serde(default)]
    exclusions: ExclusionSet,
}

impl DashboardState {
    pub fn new(selection: RangeSelection) -> Self {
        Self {
            selection,
            exclusions: ExclusionSet::new(),
        }
    }

    pub fn selection(&self) -> &RangeSelection {
        &self.selection
    }

    pub fn exclusions(&self) -> &ExclusionSet {
        &self.exclusions
    }

    /// Switches to another range. Exclusions are cleared because the new window may hold a
    /// different set of categories.
    pub fn select_range(&mut self, selection: RangeSelection) {
        self.selection = selection;
        self.exclusions.clear();
    }

    /// Toggles a category off or back on. Returns `true` when it is now excluded.
    pub fn toggle_category(&mut self, category: impl Into<String>) -> bool {
        self.exclusions.toggle(category)
    }
}

/// Everything a dashboard needs to draw, computed from scratch.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    window: Window,
    axis: Vec<MonthKey>,
    breakdowns: Vec<CategoryBreakdown>,
    series: Vec<AlignedSeries>,
    column_totals: Vec<Amount>,
    legend: Legend,
    cashflow: Cashflow,
    has_expenses: bool,
}

impl Dashboard {
    /// Builds the dashboard for the transactions that fall in the selected window around
    /// `reference`.
    ///
    /// # Errors
    /// Only an invalid range fails. Empty data yields empty breakdowns, axis and series.
    pub fn build(
        transactions: &[Transaction],
        state: &DashboardState,
        reference: NaiveDate,
    ) -> Result<Self, InvalidRange> {
        let window = resolve(&state.selection, reference)?;
        let in_window = window.filter(transactions);
        debug!(
            "{} of {} transactions fall in {}",
            in_window.len(),
            transactions.len(),
            state.selection
        );

        let breakdowns = aggregate(in_window.iter().copied(), &state.exclusions);
        let axis = match window.months() {
            Some(months) => months.to_vec(),
            None => data_axis(&breakdowns),
        };
        let series = align(&breakdowns, &axis);
        let column_totals = column_totals(&series, &axis);
        let legend = Legend::build(in_window.iter().copied(), &breakdowns, &state.exclusions);
        let cashflow = summarize(in_window.iter().copied());
        let has_expenses = in_window.iter().any(|t| t.is_expense());

        Ok(Self {
            window,
            axis,
            breakdowns,
            series,
            column_totals,
            legend,
            cashflow,
            has_expenses,
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn axis(&self) -> &[MonthKey] {
        &self.axis
    }

    pub fn breakdowns(&self) -> &[CategoryBreakdown] {
        &self.breakdowns
    }

    pub fn series(&self) -> &[AlignedSeries] {
        &self.series
    }

    pub fn column_totals(&self) -> &[Amount] {
        &self.column_totals
    }

    pub fn legend(&self) -> &Legend {
        &self.legend
    }

    pub fn cashflow(&self) -> &Cashflow {
        &self.cashflow
    }

    /// False when the window holds no expenses at all, which the caller shows as "no data".
    pub fn has_expenses(&self) -> bool {
        self.has_expenses
    }
}
