use crate::commands::Out;
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;

/// Creates the data directory and an initial `config.json` file with default settings.
///
/// # Arguments
/// - `cashlens_home` - The directory that will be the root of data directory, e.g.
///   `$HOME/cashlens`
///
/// # Errors
/// - Returns an error if any file operations fail or the directory is already initialized.
pub async fn init(cashlens_home: &Path) -> Result<Out<()>> {
    let config = Config::create(cashlens_home)
        .await
        .context("Unable to create the data directory and config")?;
    Ok(format!(
        "Successfully created the cashlens directory and config at {}",
        config.config_path().display()
    )
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init() {
        let dir = TempDir::new().unwrap();
        let home = dir.path().join("home");
        let out = init(&home).await.unwrap();
        assert!(out.message().contains("config.json"));
        assert!(out.structure().is_none());
        assert!(Config::load(&home).await.is_ok());
    }

    #[tokio::test]
    async fn test_init_twice_fails() {
        let dir = TempDir::new().unwrap();
        init(dir.path()).await.unwrap();
        assert!(init(dir.path()).await.is_err());
    }
}
