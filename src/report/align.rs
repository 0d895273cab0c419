//! Projects sparse per-month category series onto a shared month axis.

use crate::model::{Amount, MonthKey};
use crate::report::aggregate::CategoryBreakdown;
use crate::report::range;
use serde::{Deserialize, Serialize};

/// One category's values, one per axis month.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct AlignedSeries {
    category_name: String,
    values: Vec<Amount>,
}

impl AlignedSeries {
    pub fn category_name(&self) -> &str {
        &self.category_name
    }

    pub fn values(&self) -> &[Amount] {
        &self.values
    }

    /// The series' own total over the axis.
    pub fn total(&self) -> Amount {
        self.values.iter().sum()
    }
}

/// Aligns every breakdown to `axis`, in the order of `breakdowns`. Months without activity get an
/// exact zero.
pub fn align(breakdowns: &[CategoryBreakdown], axis: &[MonthKey]) -> Vec<AlignedSeries> {
    breakdowns
        .iter()
        .map(|b| AlignedSeries {
            category_name: b.name().to_string(),
            values: axis.iter().map(|month| b.amount_in(month)).collect(),
        })
        .collect()
}

/// The axis for data-derived ranges: every month from the earliest to the latest month that has
/// activity in any breakdown. No breakdowns means an empty axis.
pub fn data_axis(breakdowns: &[CategoryBreakdown]) -> Vec<MonthKey> {
    range::span(
        breakdowns
            .iter()
            .flat_map(|b| b.monthly_amounts().keys().copied()),
    )
}

/// The sum across all series at each axis position.
pub fn column_totals(series: &[AlignedSeries], axis: &[MonthKey]) -> Vec<Amount> {
    (0..axis.len())
        .map(|ix| {
            series
                .iter()
                .filter_map(|s| s.values.get(ix))
                .sum()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::aggregate::{aggregate, ExclusionSet};
    use crate::test::expense;
    use std::str::FromStr;

    fn amt(s: &str) -> Amount {
        Amount::from_str(s).unwrap()
    }

    fn keys(v: &[&str]) -> Vec<MonthKey> {
        v.iter().map(|s| s.parse().unwrap()).collect()
    }

    fn breakdowns() -> Vec<CategoryBreakdown> {
        let transactions = vec![
            expense("Food", "12.30", "2024-01-05"),
            expense("Food", "7.70", "2024-03-09"),
            expense("Rent", "850", "2024-02-01"),
            expense("Fun", "4", "2023-11-30"),
        ];
        aggregate(&transactions, &ExclusionSet::new())
    }

    #[test]
    fn test_align_fills_missing_months_with_zero() {
        let axis = keys(&["2024-01", "2024-02", "2024-03"]);
        let series = align(&breakdowns(), &axis);
        assert_eq!(series.len(), 3);

        assert_eq!(series[0].category_name(), "Rent");
        assert_eq!(series[0].values(), &[Amount::ZERO, amt("850"), Amount::ZERO]);

        assert_eq!(series[1].category_name(), "Food");
        assert_eq!(series[1].values(), &[amt("12.3"), Amount::ZERO, amt("7.7")]);
        assert_eq!(series[1].total(), amt("20"));

        // Fun has activity only outside the axis
        assert_eq!(series[2].category_name(), "Fun");
        assert!(series[2].values().iter().all(Amount::is_zero));
    }

    #[test]
    fn test_every_series_matches_axis_length() {
        let b = breakdowns();
        for axis in [keys(&["2024-02"]), data_axis(&b), Vec::new()] {
            for s in align(&b, &axis) {
                assert_eq!(s.values().len(), axis.len());
            }
        }
    }

    #[test]
    fn test_data_axis_spans_min_to_max() {
        assert_eq!(
            data_axis(&breakdowns()),
            keys(&["2023-11", "2023-12", "2024-01", "2024-02", "2024-03"])
        );
    }

    #[test]
    fn test_empty_breakdowns_give_empty_axis_and_series() {
        let axis = data_axis(&[]);
        assert!(axis.is_empty());
        assert!(align(&[], &axis).is_empty());
        assert!(column_totals(&[], &axis).is_empty());
    }

    #[test]
    fn test_column_totals() {
        let axis = keys(&["2024-01", "2024-02", "2024-03", "2024-04"]);
        let series = align(&breakdowns(), &axis);
        assert_eq!(
            column_totals(&series, &axis),
            vec![amt("12.3"), amt("850"), amt("7.7"), Amount::ZERO]
        );
    }
}
