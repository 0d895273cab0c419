use crate::args::ScheduleArgs;
use crate::commands::Out;
use crate::model::Transaction;
use crate::{utils, Result};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

/// The structured output of `cashlens schedule`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    definitions: usize,
    transactions: Vec<Transaction>,
}

impl Schedule {
    /// The number of recurring definitions that were expanded.
    pub fn definitions(&self) -> usize {
        self.definitions
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }
}

/// Expands every recurring definition in the file. Each definition gets a fresh recurring id that
/// all of its occurrences carry.
pub async fn schedule(args: ScheduleArgs) -> Result<Out<Schedule>> {
    let recurring = utils::load_recurring(args.recurring()).await?;
    let mut transactions = Vec::new();
    for definition in &recurring {
        let recurring_id = Uuid::new_v4().to_string();
        debug!("Assigned recurring id {recurring_id} to '{}'", definition.name());
        transactions.extend(definition.expand(&recurring_id)?);
    }
    transactions.sort_by_key(Transaction::date);

    let json =
        serde_json::to_string_pretty(&transactions).context("Unable to serialize transactions")?;
    let summary = format!(
        "Expanded {} recurring definitions into {} transactions",
        recurring.len(),
        transactions.len()
    );
    let message = match args.output() {
        Some(path) => {
            utils::write(path, json).await?;
            format!("{summary}, written to {}", path.display())
        }
        None => format!("{summary}\n{json}"),
    };

    Ok(Out::new(
        message,
        Schedule {
            definitions: recurring.len(),
            transactions,
        },
    ))
}
