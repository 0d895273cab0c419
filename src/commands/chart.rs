use crate::args::ViewArgs;
use crate::commands::{describe_axis, load_dashboard, Out};
use crate::model::{Amount, CurrencySettings, MonthKey};
use crate::report::{AlignedSeries, Dashboard, RangeSelection};
use crate::{Config, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// The structured output of `cashlens chart`: one value per axis month for every category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chart {
    range: RangeSelection,
    months: Vec<MonthKey>,
    labels: Vec<String>,
    series: Vec<AlignedSeries>,
    column_totals: Vec<Amount>,
}

impl Chart {
    pub fn months(&self) -> &[MonthKey] {
        &self.months
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn series(&self) -> &[AlignedSeries] {
        &self.series
    }

    pub fn column_totals(&self) -> &[Amount] {
        &self.column_totals
    }
}

/// Lines every included category up on the month axis of the selected range.
pub async fn chart(config: Config, args: ViewArgs) -> Result<Out<Chart>> {
    let (range, dashboard) = load_dashboard(
        &config,
        args.transactions(),
        args.range(),
        args.excludes(),
        args.reference(),
    )
    .await?;

    let message = render(&range, &dashboard, config.currency());
    let chart = Chart {
        range,
        months: dashboard.axis().to_vec(),
        labels: dashboard.axis().iter().map(MonthKey::label).collect(),
        series: dashboard.series().to_vec(),
        column_totals: dashboard.column_totals().to_vec(),
    };
    Ok(Out::new(message, chart))
}

fn render(range: &RangeSelection, dashboard: &Dashboard, currency: &CurrencySettings) -> String {
    let mut s = format!("Monthly spending for {range} ({})", describe_axis(dashboard));
    if dashboard.series().is_empty() {
        s.push_str("\n  No expenses in this range");
        return s;
    }

    const TOTAL: &str = "Total";
    let name_width = dashboard
        .series()
        .iter()
        .map(|series| series.category_name().chars().count())
        .chain(std::iter::once(TOTAL.len()))
        .max()
        .unwrap_or_default();

    let _ = write!(s, "\n  {:<name_width$}", "");
    for month in dashboard.axis() {
        let _ = write!(s, "  {:>12}", month.label());
    }
    for series in dashboard.series() {
        let _ = write!(s, "\n  {:<name_width$}", series.category_name());
        for value in series.values() {
            let _ = write!(s, "  {:>12}", currency.format(*value));
        }
    }
    let _ = write!(s, "\n  {TOTAL:<name_width$}");
    for total in dashboard.column_totals() {
        let _ = write!(s, "  {:>12}", currency.format(*total));
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::{date, expense, TestEnv};
    use std::str::FromStr;

    fn amt(s: &str) -> Amount {
        Amount::from_str(s).unwrap()
    }

    #[tokio::test]
    async fn test_chart_gap_fills() {
        let env = TestEnv::new().await;
        let path = env
            .write_transactions(&[
                expense("Rent", "900", "2024-01-01"),
                expense("Rent", "900", "2024-03-01"),
                expense("Food", "40", "2024-02-11"),
            ])
            .await;
        let args = ViewArgs::new(
            path,
            Some(RangeSelection::last_three_months()),
            Vec::new(),
            Some(date("2024-03-31")),
        );

        let out = chart(env.config(), args).await.unwrap();
        let chart = out.structure().unwrap();
        assert_eq!(chart.labels(), &["Jan 2024", "Feb 2024", "Mar 2024"]);
        assert_eq!(chart.series()[0].category_name(), "Rent");
        assert_eq!(
            chart.series()[0].values(),
            &[amt("900"), Amount::ZERO, amt("900")]
        );
        assert_eq!(
            chart.series()[1].values(),
            &[Amount::ZERO, amt("40"), Amount::ZERO]
        );
        assert_eq!(
            chart.column_totals(),
            &[amt("900"), amt("40"), amt("900")]
        );
        assert!(out.message().contains("Total"));
    }

    #[tokio::test]
    async fn test_chart_all_data_axis() {
        let env = TestEnv::new().await;
        let path = env
            .write_transactions(&[
                expense("Rent", "900", "2023-11-01"),
                expense("Food", "40", "2024-02-11"),
            ])
            .await;
        let args = ViewArgs::new(
            path,
            Some(RangeSelection::AllData),
            Vec::new(),
            Some(date("2024-03-31")),
        );

        let out = chart(env.config(), args).await.unwrap();
        let chart = out.structure().unwrap();
        assert_eq!(chart.months().len(), 4);
        assert_eq!(chart.months()[0].to_string(), "2023-11");
        for series in chart.series() {
            assert_eq!(series.values().len(), 4);
        }
    }

    #[tokio::test]
    async fn test_chart_empty() {
        let env = TestEnv::new().await;
        let path = env.write_transactions(&[]).await;
        let args = ViewArgs::new(
            path,
            Some(RangeSelection::AllData),
            Vec::new(),
            Some(date("2024-03-31")),
        );

        let out = chart(env.config(), args).await.unwrap();
        assert!(out.structure().unwrap().months().is_empty());
        assert!(out.message().contains("No expenses"));
    }
}
