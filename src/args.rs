//! These structs provide the CLI interface for the cashlens CLI.

use crate::report::RangeSelection;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// cashlens: A command-line tool for summarizing your spending.
///
/// Point it at a JSON file of transactions and it will break your expenses down by category and
/// month, line the categories up for charting, and tell you whether you spent more than you made.
/// Amounts are shown in the currency configured in $CASHLENS_HOME/config.json.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the data directory and initialize the configuration file.
    ///
    /// By default the directory is $HOME/cashlens. Pass --cashlens-home or set CASHLENS_HOME if
    /// you want it somewhere else. Edit config.json afterward to pick your currency.
    Init,
    /// Show spending by category, the legend, and income versus expense for a range.
    Report(ViewArgs),
    /// Show each category's spending per month, lined up on a common month axis.
    Chart(ViewArgs),
    /// Show total income, total expense and the balance for a range.
    Cashflow(CashflowArgs),
    /// Expand recurring transaction definitions into individual transactions.
    Schedule(ScheduleArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where cashlens configuration is held. Defaults to ~/cashlens
    #[arg(long, env = "CASHLENS_HOME", default_value_t = default_cashlens_home())]
    cashlens_home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, cashlens_home: PathBuf) -> Self {
        Self {
            log_level,
            cashlens_home: cashlens_home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn cashlens_home(&self) -> &DisplayPath {
        &self.cashlens_home
    }
}

/// Args for the `cashlens report` and `cashlens chart` commands.
#[derive(Debug, Parser, Clone)]
pub struct ViewArgs {
    /// A JSON file holding an array of transactions.
    #[arg(long)]
    transactions: PathBuf,

    /// The window to look at: current-month, last-N-months, ytd, YYYY-MM..YYYY-MM or all.
    /// Defaults to the `default_range` in config.json.
    #[arg(long)]
    range: Option<RangeSelection>,

    /// Leave a category out of the breakdown. May be given more than once.
    #[arg(long = "exclude")]
    excludes: Vec<String>,

    /// The date treated as today, as YYYY-MM-DD. Defaults to the local date.
    #[arg(long)]
    reference: Option<NaiveDate>,
}

impl ViewArgs {
    pub fn new(
        transactions: impl Into<PathBuf>,
        range: Option<RangeSelection>,
        excludes: Vec<String>,
        reference: Option<NaiveDate>,
    ) -> Self {
        Self {
            transactions: transactions.into(),
            range,
            excludes,
            reference,
        }
    }

    pub fn transactions(&self) -> &Path {
        &self.transactions
    }

    pub fn range(&self) -> Option<RangeSelection> {
        self.range
    }

    pub fn excludes(&self) -> &[String] {
        &self.excludes
    }

    pub fn reference(&self) -> Option<NaiveDate> {
        self.reference
    }
}

/// Args for the `cashlens cashflow` command.
#[derive(Debug, Parser, Clone)]
pub struct CashflowArgs {
    /// A JSON file holding an array of transactions.
    #[arg(long)]
    transactions: PathBuf,

    /// The window to look at: current-month, last-N-months, ytd, YYYY-MM..YYYY-MM or all.
    /// Defaults to the `default_range` in config.json.
    #[arg(long)]
    range: Option<RangeSelection>,

    /// The date treated as today, as YYYY-MM-DD. Defaults to the local date.
    #[arg(long)]
    reference: Option<NaiveDate>,
}

impl CashflowArgs {
    pub fn new(
        transactions: impl Into<PathBuf>,
        range: Option<RangeSelection>,
        reference: Option<NaiveDate>,
    ) -> Self {
        Self {
            transactions: transactions.into(),
            range,
            reference,
        }
    }

    pub fn transactions(&self) -> &Path {
        &self.transactions
    }

    pub fn range(&self) -> Option<RangeSelection> {
        self.range
    }

    pub fn reference(&self) -> Option<NaiveDate> {
        self.reference
    }
}

/// Args for the `cashlens schedule` command.
#[derive(Debug, Parser, Clone)]
pub struct ScheduleArgs {
    /// A JSON file holding an array of recurring transaction definitions.
    #[arg(long)]
    recurring: PathBuf,

    /// Where to write the expanded transactions. When omitted they are printed.
    #[arg(long)]
    output: Option<PathBuf>,
}

impl ScheduleArgs {
    pub fn new(recurring: impl Into<PathBuf>, output: Option<PathBuf>) -> Self {
        Self {
            recurring: recurring.into(),
            output,
        }
    }

    pub fn recurring(&self) -> &Path {
        &self.recurring
    }

    pub fn output(&self) -> Option<&Path> {
        self.output.as_deref()
    }
}

fn default_cashlens_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("cashlens"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --cashlens-home or CASHLENS_HOME instead of relying on the \
                default cashlens home directory.",
            );
            PathBuf::from("cashlens")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_report() {
        let args = Args::try_parse_from([
            "cashlens",
            "--cashlens-home",
            "/tmp/cl",
            "report",
            "--transactions",
            "t.json",
            "--range",
            "last-3-months",
            "--exclude",
            "Rent",
            "--exclude",
            "Food",
            "--reference",
            "2024-03-15",
        ])
        .unwrap();

        assert_eq!(args.common().cashlens_home().path(), Path::new("/tmp/cl"));
        assert_eq!(args.common().log_level(), LevelFilter::INFO);
        let Command::Report(view) = args.command() else {
            panic!("expected report, got {:?}", args.command());
        };
        assert_eq!(view.transactions(), Path::new("t.json"));
        assert_eq!(view.range(), Some(RangeSelection::LastNMonths(3)));
        assert_eq!(view.excludes(), &["Rent".to_string(), "Food".to_string()]);
        assert_eq!(
            view.reference(),
            NaiveDate::from_ymd_opt(2024, 3, 15)
        );
    }

    #[test]
    fn test_parse_custom_range() {
        let args = Args::try_parse_from([
            "cashlens",
            "cashflow",
            "--transactions",
            "t.json",
            "--range",
            "2024-01..2024-06",
        ])
        .unwrap();
        let Command::Cashflow(cashflow) = args.command() else {
            panic!("expected cashflow, got {:?}", args.command());
        };
        assert_eq!(
            cashflow.range(),
            Some(RangeSelection::CustomRange {
                from: "2024-01".parse().unwrap(),
                to: "2024-06".parse().unwrap(),
            })
        );
        assert!(cashflow.reference().is_none());
    }

    #[test]
    fn test_reversed_range_is_rejected() {
        let result = Args::try_parse_from([
            "cashlens",
            "chart",
            "--transactions",
            "t.json",
            "--range",
            "2024-06..2024-01",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_schedule() {
        let args =
            Args::try_parse_from(["cashlens", "schedule", "--recurring", "r.json"]).unwrap();
        let Command::Schedule(schedule) = args.command() else {
            panic!("expected schedule, got {:?}", args.command());
        };
        assert_eq!(schedule.recurring(), Path::new("r.json"));
        assert!(schedule.output().is_none());
    }
}
