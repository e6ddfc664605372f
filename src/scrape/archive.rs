use log::info;
use std::path::Path;
use tokio::fs;

use crate::error::FinderError;
use crate::model::Recipe;

/// Write recipes as pretty-printed JSON, creating parent directories as needed
pub async fn write_archive(path: &Path, recipes: &[Recipe]) -> Result<(), FinderError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }
    let json = serde_json::to_string_pretty(recipes)?;
    fs::write(path, json).await?;
    info!("Saved {} recipes to {}", recipes.len(), path.display());
    Ok(())
}

pub async fn read_archive(path: &Path) -> Result<Vec<Recipe>, FinderError> {
    let json = fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&json)?)
}
