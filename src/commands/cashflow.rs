use crate::args::CashflowArgs;
use crate::commands::{describe_axis, load_dashboard, Out};
use crate::report::{BalanceSign, Cashflow, RangeSelection};
use crate::{Config, Result};
use serde::{Deserialize, Serialize};

/// The structured output of `cashlens cashflow`, with each figure also rendered in the configured
/// currency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashflowReport {
    range: RangeSelection,
    cashflow: Cashflow,
    sign: BalanceSign,
    income: String,
    expense: String,
    balance: String,
}

impl CashflowReport {
    pub fn cashflow(&self) -> &Cashflow {
        &self.cashflow
    }

    pub fn sign(&self) -> BalanceSign {
        self.sign
    }

    pub fn income(&self) -> &str {
        &self.income
    }

    pub fn expense(&self) -> &str {
        &self.expense
    }

    pub fn balance(&self) -> &str {
        &self.balance
    }
}

/// Totals income and expense over the selected range.
pub async fn cashflow(config: Config, args: CashflowArgs) -> Result<Out<CashflowReport>> {
    let (range, dashboard) = load_dashboard(
        &config,
        args.transactions(),
        args.range(),
        &[],
        args.reference(),
    )
    .await?;

    let currency = config.currency();
    let cashflow = *dashboard.cashflow();
    let report = CashflowReport {
        range,
        cashflow,
        sign: cashflow.balance_sign(),
        income: currency.format(cashflow.income()),
        expense: currency.format(cashflow.expense()),
        balance: currency.format(cashflow.balance()),
    };
    let message = format!(
        "Cashflow for {range} ({})\n  Income:  {}\n  Expense: {}\n  Balance: {}",
        describe_axis(&dashboard),
        report.income,
        report.expense,
        report.balance
    );
    Ok(Out::new(message, report))
}
