use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

const MIN_YEAR: i32 = 1;
const MAX_YEAR: i32 = 9999;

/// One calendar month, rendered as `YYYY-MM`.
///
/// The derived ordering compares year then month, which is the same as comparing the rendered
/// keys as strings.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Creates a `MonthKey`, rejecting months outside `1..=12` and years outside `1..=9999`.
    pub fn new(year: i32, month: u32) -> Result<Self, MonthKeyError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(MonthKeyError(format!("year {year} is out of range")));
        }
        if !(1..=12).contains(&month) {
            return Err(MonthKeyError(format!("month {month} is out of range")));
        }
        Ok(Self { year, month })
    }

    /// The month that contains `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// The following month, wrapping December into January of the next year.
    pub fn succ(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// The preceding month, wrapping January into December of the previous year.
    pub fn pred(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Steps back `n` months. Returns `None` when that lands before `0001-01`.
    pub fn minus_months(&self, n: u32) -> Option<Self> {
        let index = self.index() - i64::from(n);
        if index < i64::from(MIN_YEAR) * 12 {
            return None;
        }
        Some(Self::from_index(index))
    }

    pub fn first_day(&self) -> NaiveDate {
        // Constructed keys always hold a valid year and month
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn last_day(&self) -> NaiveDate {
        self.first_day()
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        Self::of(date) == *self
    }

    /// A short English label such as `Jan 2024`.
    pub fn label(&self) -> String {
        self.first_day().format("%b %Y").to_string()
    }

    fn index(&self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month) - 1
    }

    fn from_index(index: i64) -> Self {
        Self {
            year: index.div_euclid(12) as i32,
            month: index.rem_euclid(12) as u32 + 1,
        }
    }
}

/// An error produced when a string is not a valid `YYYY-MM` month key.
#[derive(Clone, PartialEq, Eq)]
pub struct MonthKeyError(String);

impl Debug for MonthKeyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

impl Display for MonthKeyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid month key: {}", self.0)
    }
}

impl std::error::Error for MonthKeyError {}

impl Display for MonthKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = MonthKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Expected format: "2024-01"
        let s = s.trim();
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| MonthKeyError(format!("expected YYYY-MM, got '{s}'")))?;
        let all_digits = |p: &str| p.bytes().all(|b| b.is_ascii_digit());
        if year.len() != 4 || month.len() != 2 || !all_digits(year) || !all_digits(month) {
            return Err(MonthKeyError(format!("expected YYYY-MM, got '{s}'")));
        }
        let year = year
            .parse::<i32>()
            .map_err(|e| MonthKeyError(format!("bad year in '{s}': {e}")))?;
        let month = month
            .parse::<u32>()
            .map_err(|e| MonthKeyError(format!("bad month in '{s}': {e}")))?;
        MonthKey::new(year, month)
    }
}

impl Serialize for MonthKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        MonthKey::from_str(&s).map_err(serde::de::Error::custom)
    }
}
