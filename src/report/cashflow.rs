use crate::model::{Amount, Transaction};
use serde::{Deserialize, Serialize};

/// Money in, money out, and what is left.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct Cashflow {
    income: Amount,
    expense: Amount,
    balance: Amount,
}

/// Whether the balance is at or above zero.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BalanceSign {
    Positive,
    Negative,
}

impl Cashflow {
    pub fn income(&self) -> Amount {
        self.income
    }

    pub fn expense(&self) -> Amount {
        self.expense
    }

    pub fn balance(&self) -> Amount {
        self.balance
    }

    pub fn balance_sign(&self) -> BalanceSign {
        if self.balance.is_negative() {
            BalanceSign::Negative
        } else {
            BalanceSign::Positive
        }
    }
}

/// Totals income and expense over every transaction given. Category exclusions do not apply here.
pub fn summarize<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Cashflow {
    let (income, expense) = transactions.into_iter().fold(
        (Amount::ZERO, Amount::ZERO),
        |(income, expense), t| {
            if t.is_income() {
                (income + t.amount(), expense)
            } else {
                (income, expense + t.amount())
            }
        },
    );
    Cashflow {
        income,
        expense,
        balance: income - expense,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::{expense, income};
    use std::str::FromStr;

    fn amt(s: &str) -> Amount {
        Amount::from_str(s).unwrap()
    }

    #[test]
    fn test_summarize() {
        let transactions = vec![
            income("Salary", "100", "2024-01-01"),
            income("Gift", "50", "2024-01-02"),
            expense("Food", "30", "2024-01-03"),
        ];
        let cashflow = summarize(&transactions);
        assert_eq!(cashflow.income(), amt("150"));
        assert_eq!(cashflow.expense(), amt("30"));
        assert_eq!(cashflow.balance(), amt("120"));
        assert_eq!(cashflow.balance_sign(), BalanceSign::Positive);
    }

    #[test]
    fn test_negative_balance() {
        let transactions = vec![
            income("Salary", "10.10", "2024-01-01"),
            expense("Rent", "20.20", "2024-01-03"),
        ];
        let cashflow = summarize(&transactions);
        assert_eq!(cashflow.balance(), amt("-10.1"));
        assert_eq!(cashflow.balance_sign(), BalanceSign::Negative);
    }

    #[test]
    fn test_empty_is_zero() {
        let cashflow = summarize(&Vec::<Transaction>::new());
        assert_eq!(cashflow, Cashflow::default());
        assert_eq!(cashflow.balance_sign(), BalanceSign::Positive);
    }

    #[test]
    fn test_exact_over_many_small_amounts() {
        let transactions: Vec<Transaction> = (0..1000)
            .map(|_| expense("Coffee", "0.10", "2024-01-01"))
            .chain((0..3).map(|_| income("Refund", "0.01", "2024-01-02")))
            .collect();
        let cashflow = summarize(&transactions);
        assert_eq!(cashflow.expense(), amt("100"));
        assert_eq!(cashflow.income(), amt("0.03"));
        assert_eq!(cashflow.balance(), amt("-99.97"));
    }
}
