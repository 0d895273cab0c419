use crate::model::{RecurringTransaction, Transactions};
use crate::Result;
use anyhow::Context;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Write a file.
pub(crate) async fn write(path: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> Result<()> {
    let path = path.as_ref();
    tokio::fs::write(path, contents)
        .await
        .context(format!("Unable to write to {}", path.to_string_lossy()))
}

/// Read a file to a `String`.
pub async fn read(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read file at {}", path.display()))
}

/// Deserialize a JSON file into type `T`.
pub async fn deserialize<T>(path: &Path) -> Result<T>
where
    T: DeserializeOwned,
{
    let content = read(path).await?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON file at {}", path.display()))
}

/// Create a directory and any missing parents.
pub(crate) async fn make_dir(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    tokio::fs::create_dir_all(path)
        .await
        .with_context(|| format!("Unable to create directory {}", path.display()))
}

/// Resolve `path` to an absolute path with symlinks followed. The path must exist.
pub(crate) async fn canonicalize(path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    tokio::fs::canonicalize(path)
        .await
        .with_context(|| format!("Unable to canonicalize {}", path.display()))
}

/// Load a JSON array of transactions and validate it.
pub async fn load_transactions(path: &Path) -> Result<Transactions> {
    let content = read(path).await?;
    Transactions::from_json(&content)
        .with_context(|| format!("Invalid transactions file at {}", path.display()))
}

/// Load a JSON array of recurring transaction definitions and validate each of them.
pub async fn load_recurring(path: &Path) -> Result<Vec<RecurringTransaction>> {
    let recurring: Vec<RecurringTransaction> = deserialize(path).await?;
    for (ix, r) in recurring.iter().enumerate() {
        r.validate()
            .with_context(|| format!("Invalid recurring transaction at index {ix}"))?;
    }
    Ok(recurring)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_transactions() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("transactions.json");
        let json = r#"[{"id": "a", "name": "Lunch", "category": "Food", "tags": [],
            "amount": "8.25", "type": "expense", "date": "2024-05-02"}]"#;
        write(&path, json).await.unwrap();

        let transactions = load_transactions(&path).await.unwrap();
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].name(), "Lunch");
    }

    #[tokio::test]
    async fn test_load_transactions_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load_transactions(&dir.path().join("nope.json"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read file"));
    }

    #[tokio::test]
    async fn test_load_recurring_rejects_invalid() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("recurring.json");
        let json = r#"[{"name": "Gym", "category": "Health", "amount": "30", "type": "expense",
            "startDate": "2024-05-01", "endDate": "2024-04-01", "frequency": "monthly"}]"#;
        write(&path, json).await.unwrap();

        let err = load_recurring(&path).await.unwrap_err();
        assert!(err.to_string().contains("index 0"));
    }

    #[tokio::test]
    async fn test_make_dir_and_canonicalize() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        make_dir(&nested).await.unwrap();
        let canonical = canonicalize(&nested).await.unwrap();
        assert!(canonical.is_absolute());
        assert!(canonical.is_dir());
    }
}
