//! Types that represent the core data model, such as `Transaction`, `Amount` and `MonthKey`.
mod amount;
mod currency;
mod month;
mod recurring;
mod transaction;

pub use amount::{Amount, AmountError};
pub use currency::{
    format, Currency, CurrencyPosition, CurrencySettings, BUILTIN_CURRENCIES, DEFAULT_CURRENCY,
};
pub use month::{MonthKey, MonthKeyError};
pub use recurring::{Frequency, RecurringTransaction};
pub use transaction::{Transaction, TransactionType, Transactions};
