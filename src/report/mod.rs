//! The aggregation and presentation engine: turns a list of transactions into month axes,
//! category breakdowns, chart series, legends and cashflow figures.
//!
//! Every function here is a pure computation over the values passed in.

mod aggregate;
mod align;
mod cashflow;
mod dashboard;
mod legend;
mod range;

pub use aggregate::{aggregate, grand_total, CategoryBreakdown, ExclusionSet};
pub use align::{align, column_totals, data_axis, AlignedSeries};
pub use cashflow::{summarize, BalanceSign, Cashflow};
pub use dashboard::{Dashboard, DashboardState};
pub use legend::{Legend, LegendEntry};
pub use range::{resolve, span, InvalidRange, RangeSelection, Window};
