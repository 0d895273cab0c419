use crate::args::ViewArgs;
use crate::commands::{describe_axis, load_dashboard, Out};
use crate::model::CurrencySettings;
use crate::report::{Cashflow, CategoryBreakdown, Dashboard, Legend, RangeSelection};
use crate::{Config, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// The structured output of `cashlens report`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    range: RangeSelection,
    breakdowns: Vec<CategoryBreakdown>,
    legend: Legend,
    cashflow: Cashflow,
}

impl Report {
    pub fn range(&self) -> &RangeSelection {
        &self.range
    }

    pub fn breakdowns(&self) -> &[CategoryBreakdown] {
        &self.breakdowns
    }

    pub fn legend(&self) -> &Legend {
        &self.legend
    }

    pub fn cashflow(&self) -> &Cashflow {
        &self.cashflow
    }
}

/// Breaks down spending by category for the selected range and renders the legend and cashflow
/// using the configured currency.
pub async fn report(config: Config, args: ViewArgs) -> Result<Out<Report>> {
    let (range, dashboard) = load_dashboard(
        &config,
        args.transactions(),
        args.range(),
        args.excludes(),
        args.reference(),
    )
    .await?;

    let message = render(&range, &dashboard, config.currency());
    let report = Report {
        range,
        breakdowns: dashboard.breakdowns().to_vec(),
        legend: dashboard.legend().clone(),
        cashflow: *dashboard.cashflow(),
    };
    Ok(Out::new(message, report))
}

fn render(range: &RangeSelection, dashboard: &Dashboard, currency: &CurrencySettings) -> String {
    let mut s = format!("Spending for {range} ({})\n", describe_axis(dashboard));
    if !dashboard.has_expenses() {
        s.push_str("  No expenses in this range\n");
    }

    let width = dashboard
        .legend()
        .entries()
        .iter()
        .map(|e| e.name().chars().count())
        .max()
        .unwrap_or_default();
    for entry in dashboard.legend().entries() {
        match (entry.total(), entry.display_percentage()) {
            (Some(total), Some(percentage)) => {
                let _ = writeln!(
                    s,
                    "  {:<width$}  {:>12}  {:>5}%",
                    entry.name(),
                    currency.format(total),
                    percentage
                );
            }
            _ => {
                let marker = if entry.excluded() { "excluded" } else { "" };
                let _ = writeln!(s, "  {:<width$}  {marker}", entry.name());
            }
        }
    }
    if dashboard.has_expenses() {
        let _ = writeln!(
            s,
            "  Total: {}",
            currency.format(dashboard.legend().active_total())
        );
    }

    let cashflow = dashboard.cashflow();
    let _ = write!(
        s,
        "Income: {}  Expense: {}  Balance: {}",
        currency.format(cashflow.income()),
        currency.format(cashflow.expense()),
        currency.format(cashflow.balance())
    );
    s
}
