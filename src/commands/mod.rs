//! Command handlers for the cashlens CLI.
//!
//! This module contains implementations for all CLI subcommands.

mod cashflow;
mod chart;
mod init;
mod report;
mod schedule;

use crate::model::Transactions;
use crate::report::{Dashboard, DashboardState, ExclusionSet, RangeSelection};
use crate::{utils, Config, Result};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt::Debug;
use std::path::Path;
use tracing::{debug, info};

pub use cashflow::{cashflow, CashflowReport};
pub use chart::{chart, Chart};
pub use init::init;
pub use report::{report, Report};
pub use schedule::{schedule, Schedule};

/// The output type for a command. This allows the command to return a consistent message and,
/// optionally, structured data.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// A message that can be printed to the user regarding the outcome of the command execution.
    message: String,

    /// Any structured data that needs to be output from the call.
    structure: Option<T>,
}

impl<T, S> From<S> for Out<T>
where
    T: Debug + Clone + Serialize,
    S: Into<String>,
{
    fn from(value: S) -> Self {
        Out::new_message(value)
    }
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// Create a new `Out` object that has `Some(structure)`.
    pub fn new<S>(message: S, structure: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: Some(structure),
        }
    }

    /// Create a new `Out` object that has `None` for `structure`.
    pub fn new_message<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: None,
        }
    }

    /// Get the `message`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the structured data stored in `structure`.
    pub fn structure(&self) -> Option<&T> {
        self.structure.as_ref()
    }

    /// Print the message to `info!` and the structured data (if it exists) as JSON to `debug!`.
    pub fn print(&self) {
        info!("{}", self.message);
        if let Some(structure) = self.structure() {
            if let Ok(json) = serde_json::to_string_pretty(structure) {
                debug!("Command output:\n\n{json}\n\n");
            }
        }
    }
}

/// Loads the transactions file and builds the dashboard for one view of it. The range falls back
/// to the configured default and the reference date to today.
async fn load_dashboard(
    config: &Config,
    transactions: &Path,
    range: Option<RangeSelection>,
    excludes: &[String],
    reference: Option<NaiveDate>,
) -> Result<(RangeSelection, Dashboard)> {
    let transactions: Transactions = utils::load_transactions(transactions).await?;
    let selection = range.unwrap_or(*config.default_range());
    let reference = reference.unwrap_or_else(|| chrono::Local::now().date_naive());

    let mut state = DashboardState::new(selection);
    let exclusions: ExclusionSet = excludes.iter().cloned().collect();
    for category in exclusions.iter() {
        state.toggle_category(category);
    }

    let dashboard = Dashboard::build(&transactions, &state, reference)?;
    Ok((selection, dashboard))
}

/// Describes the axis of a dashboard for a headline, e.g. `Jan 2024 - Mar 2024`.
fn describe_axis(dashboard: &Dashboard) -> String {
    match (dashboard.axis().first(), dashboard.axis().last()) {
        (Some(first), Some(last)) if first == last => first.label(),
        (Some(first), Some(last)) => format!("{} - {}", first.label(), last.label()),
        _ => "no months".to_string(),
    }
}
