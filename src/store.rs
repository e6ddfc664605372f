//! Per-user persistence of pantry and favorites.
//!
//! Callers pass the user id explicitly on every call; the store never looks
//! up an ambient session.

use async_trait::async_trait;
use log::debug;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::error::FinderError;
use crate::favorites::{Favorites, SaveOutcome};
use crate::model::Recipe;
use crate::pantry::{AddOutcome, Pantry, PantryEntry};

#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn load_pantry(&self, user_id: &str) -> Result<Pantry, FinderError>;

    /// Replace the whole pantry
    async fn save_pantry(&self, user_id: &str, pantry: Pantry) -> Result<(), FinderError>;

    async fn add_ingredient(
        &self,
        user_id: &str,
        entry: PantryEntry,
    ) -> Result<AddOutcome, FinderError>;

    /// Returns true if an entry was removed
    async fn remove_ingredient(&self, user_id: &str, name: &str) -> Result<bool, FinderError>;

    async fn load_favorites(&self, user_id: &str) -> Result<Favorites, FinderError>;

    async fn save_favorite(&self, user_id: &str, recipe: Recipe)
        -> Result<SaveOutcome, FinderError>;

    /// Returns true if a favorite was removed
    async fn remove_favorite(&self, user_id: &str, recipe_id: &str) -> Result<bool, FinderError>;
}

#[derive(Debug, Clone, Default)]
struct Account {
    pantry: Pantry,
    favorites: Favorites,
}

/// Keeps every account in process memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    accounts: RwLock<HashMap<String, Account>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn load_pantry(&self, user_id: &str) -> Result<Pantry, FinderError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .get(user_id)
            .map(|account| account.pantry.clone())
            .unwrap_or_default())
    }

    async fn save_pantry(&self, user_id: &str, pantry: Pantry) -> Result<(), FinderError> {
        let mut accounts = self.accounts.write().await;
        debug!("Replacing pantry for {} ({} entries)", user_id, pantry.len());
        accounts.entry(user_id.to_string()).or_default().pantry = pantry;
        Ok(())
    }

    async fn add_ingredient(
        &self,
        user_id: &str,
        entry: PantryEntry,
    ) -> Result<AddOutcome, FinderError> {
        let mut accounts = self.accounts.write().await;
        Ok(accounts
            .entry(user_id.to_string())
            .or_default()
            .pantry
            .add(entry))
    }

    async fn remove_ingredient(&self, user_id: &str, name: &str) -> Result<bool, FinderError> {
        let mut accounts = self.accounts.write().await;
        Ok(accounts
            .get_mut(user_id)
            .and_then(|account| account.pantry.remove(name))
            .is_some())
    }

    async fn load_favorites(&self, user_id: &str) -> Result<Favorites, FinderError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .get(user_id)
            .map(|account| account.favorites.clone())
            .unwrap_or_default())
    }

    async fn save_favorite(
        &self,
        user_id: &str,
        recipe: Recipe,
    ) -> Result<SaveOutcome, FinderError> {
        let mut accounts = self.accounts.write().await;
        Ok(accounts
            .entry(user_id.to_string())
            .or_default()
            .favorites
            .save(recipe))
    }

    async fn remove_favorite(&self, user_id: &str, recipe_id: &str) -> Result<bool, FinderError> {
        let mut accounts = self.accounts.write().await;
        Ok(accounts
            .get_mut(user_id)
            .and_then(|account| account.favorites.remove(recipe_id))
            .is_some())
    }
}
