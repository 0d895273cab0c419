//! Resolves a range selection into the month axis a chart is plotted against.

use crate::model::{MonthKey, Transaction};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use tracing::trace;

/// Which calendar window the caller wants to look at.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash)]
pub enum RangeSelection {
    #[default]
    CurrentMonth,
    LastNMonths(u32),
    YearToDate,
    CustomRange {
        from: MonthKey,
        to: MonthKey,
    },
    AllData,
}

impl RangeSelection {
    pub fn last_three_months() -> Self {
        RangeSelection::LastNMonths(3)
    }

    pub fn last_six_months() -> Self {
        RangeSelection::LastNMonths(6)
    }

    pub fn last_year() -> Self {
        RangeSelection::LastNMonths(12)
    }

    /// Builds a custom range, failing when `from` is after `to`.
    pub fn custom(from: MonthKey, to: MonthKey) -> Result<Self, InvalidRange> {
        if from > to {
            return Err(InvalidRange::Reversed { from, to });
        }
        Ok(RangeSelection::CustomRange { from, to })
    }
}

const CURRENT_MONTH: &str = "current-month";
const YEAR_TO_DATE: &str = "ytd";
const ALL_DATA: &str = "all";

impl Display for RangeSelection {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            RangeSelection::CurrentMonth => f.write_str(CURRENT_MONTH),
            RangeSelection::LastNMonths(n) => write!(f, "last-{n}-months"),
            RangeSelection::YearToDate => f.write_str(YEAR_TO_DATE),
            RangeSelection::CustomRange { from, to } => write!(f, "{from}..{to}"),
            RangeSelection::AllData => f.write_str(ALL_DATA),
        }
    }
}

impl FromStr for RangeSelection {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s {
            CURRENT_MONTH => return Ok(RangeSelection::CurrentMonth),
            YEAR_TO_DATE => return Ok(RangeSelection::YearToDate),
            ALL_DATA => return Ok(RangeSelection::AllData),
            _ => {}
        }
        if let Some(n) = s
            .strip_prefix("last-")
            .and_then(|rest| rest.strip_suffix("-months"))
        {
            let n = n
                .parse::<u32>()
                .map_err(|e| anyhow::anyhow!("Invalid month count in '{s}': {e}"))?;
            if n == 0 {
                return Err(InvalidRange::NoMonths.into());
            }
            return Ok(RangeSelection::LastNMonths(n));
        }
        if let Some((from, to)) = s.split_once("..") {
            let from: MonthKey = from.parse()?;
            let to: MonthKey = to.parse()?;
            return Ok(RangeSelection::custom(from, to)?);
        }
        anyhow::bail!(
            "Unknown range '{s}', expected one of: {CURRENT_MONTH}, last-N-months, \
            {YEAR_TO_DATE}, YYYY-MM..YYYY-MM, {ALL_DATA}"
        )
    }
}

impl Serialize for RangeSelection {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for RangeSelection {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        RangeSelection::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// A range the caller asked for that cannot produce an axis.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum InvalidRange {
    /// A custom range whose start month comes after its end month.
    Reversed { from: MonthKey, to: MonthKey },
    /// A trailing window of zero months.
    NoMonths,
    /// A trailing window that would start before `0001-01`.
    TooFarBack { months: u32 },
}

impl Display for InvalidRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            InvalidRange::Reversed { from, to } => {
                write!(f, "Invalid range: start month {from} is after end month {to}")
            }
            InvalidRange::NoMonths => f.write_str("Invalid range: at least one month is required"),
            InvalidRange::TooFarBack { months } => {
                write!(f, "Invalid range: {months} months reaches back before 0001-01")
            }
        }
    }
}

impl std::error::Error for InvalidRange {}

/// The resolved window for a selection.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Window {
    /// A calendar-derived axis: never empty, strictly increasing.
    Months(Vec<MonthKey>),
    /// Everything up to and including `through`. The axis comes from the data, see [`span`].
    ToDate { through: MonthKey },
}

impl Window {
    /// The calendar axis, or `None` when the axis has to be derived from the data.
    pub fn months(&self) -> Option<&[MonthKey]> {
        match self {
            Window::Months(months) => Some(months),
            Window::ToDate { .. } => None,
        }
    }

    /// Whether a transaction dated `date` falls inside the window.
    pub fn contains(&self, date: NaiveDate) -> bool {
        let month = MonthKey::of(date);
        match self {
            Window::Months(months) => match (months.first(), months.last()) {
                (Some(first), Some(last)) => *first <= month && month <= *last,
                _ => false,
            },
            Window::ToDate { through } => month <= *through,
        }
    }

    /// The transactions dated inside the window, in their original order.
    pub fn filter<'a>(
        &self,
        transactions: impl IntoIterator<Item = &'a Transaction>,
    ) -> Vec<&'a Transaction> {
        transactions
            .into_iter()
            .filter(|t| self.contains(t.date()))
            .collect()
    }
}

/// Resolves `selection` relative to `reference`, the date the caller considers "today" (or the
/// month being browsed).
pub fn resolve(selection: &RangeSelection, reference: NaiveDate) -> Result<Window, InvalidRange> {
    let current = MonthKey::of(reference);
    let window = match *selection {
        RangeSelection::CurrentMonth => Window::Months(vec![current]),
        RangeSelection::LastNMonths(0) => return Err(InvalidRange::NoMonths),
        RangeSelection::LastNMonths(n) => {
            let first = current
                .minus_months(n - 1)
                .ok_or(InvalidRange::TooFarBack { months: n })?;
            Window::Months(months_between(first, current))
        }
        RangeSelection::YearToDate => {
            let january = current
                .minus_months(reference.month0())
                .ok_or(InvalidRange::TooFarBack {
                    months: reference.month(),
                })?;
            Window::Months(months_between(january, current))
        }
        RangeSelection::CustomRange { from, to } => {
            if from > to {
                return Err(InvalidRange::Reversed { from, to });
            }
            Window::Months(months_between(from, to))
        }
        RangeSelection::AllData => Window::ToDate { through: current },
    };
    trace!("Resolved {selection} at {reference} to {window:?}");
    Ok(window)
}

/// The contiguous axis from the earliest to the latest of `months`. Empty input gives an empty
/// axis, which means there is nothing to draw.
pub fn span(months: impl IntoIterator<Item = MonthKey>) -> Vec<MonthKey> {
    let mut bounds: Option<(MonthKey, MonthKey)> = None;
    for month in months {
        bounds = Some(match bounds {
            None => (month, month),
            Some((min, max)) => (min.min(month), max.max(month)),
        });
    }
    match bounds {
        Some((min, max)) => months_between(min, max),
        None => Vec::new(),
    }
}

/// Every month from `from` to `to` inclusive. Callers guarantee `from <= to`.
fn months_between(from: MonthKey, to: MonthKey) -> Vec<MonthKey> {
    let mut months = Vec::new();
    let mut current = from;
    while current <= to {
        months.push(current);
        if current == to {
            break;
        }
        current = current.succ();
    }
    months
}
