use chrono::{DateTime, NaiveDate};
use log::debug;
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

use crate::error::FinderError;
use crate::freshness::Freshness;

/// A single ingredient the user has on hand.
///
/// Names are trimmed and lower-cased on construction; entries are never
/// edited in place, a changed entry replaces the old one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPantryEntry")]
pub struct PantryEntry {
    name: String,
    #[serde(rename = "expires")]
    expires_on: NaiveDate,
}

#[derive(Deserialize)]
struct RawPantryEntry {
    name: String,
    expires: String,
}

impl TryFrom<RawPantryEntry> for PantryEntry {
    type Error = FinderError;

    fn try_from(raw: RawPantryEntry) -> Result<Self, Self::Error> {
        PantryEntry::parse(&raw.name, &raw.expires)
    }
}

impl PantryEntry {
    pub fn new(name: &str, expires_on: NaiveDate) -> Result<Self, FinderError> {
        let name = normalize_name(name);
        if name.is_empty() {
            return Err(FinderError::EmptyIngredientName);
        }
        Ok(PantryEntry { name, expires_on })
    }

    /// Build an entry from a date string as produced by a date picker
    /// (`2024-06-10`). Full RFC 3339 timestamps are accepted and truncated
    /// to their calendar date.
    pub fn parse(name: &str, expires: &str) -> Result<Self, FinderError> {
        let expires = expires.trim();
        let expires_on = match NaiveDate::parse_from_str(expires, "%Y-%m-%d") {
            Ok(date) => date,
            Err(date_err) => DateTime::parse_from_rfc3339(expires)
                .map(|ts| ts.date_naive())
                .map_err(|_| FinderError::InvalidDate {
                    value: expires.to_string(),
                    source: date_err,
                })?,
        };
        PantryEntry::new(name, expires_on)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn expires_on(&self) -> NaiveDate {
        self.expires_on
    }

    pub fn freshness(&self, today: NaiveDate) -> Freshness {
        Freshness::classify(self.expires_on, today)
    }
}

/// Trim and lower-case an ingredient name
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Result of trying to add an entry to the pantry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// An entry with the same name already exists; the pantry is unchanged
    Duplicate,
}

/// The user's in-memory collection of ingredients.
///
/// No two entries share a name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<PantryEntry>", into = "Vec<PantryEntry>")]
pub struct Pantry {
    entries: Vec<PantryEntry>,
}

impl Pantry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[PantryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&PantryEntry> {
        let name = normalize_name(name);
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub fn add(&mut self, entry: PantryEntry) -> AddOutcome {
        if self.contains(&entry.name) {
            debug!("Ignoring duplicate pantry entry '{}'", entry.name);
            return AddOutcome::Duplicate;
        }
        self.entries.push(entry);
        AddOutcome::Added
    }

    pub fn remove(&mut self, name: &str) -> Option<PantryEntry> {
        let name = normalize_name(name);
        let index = self.entries.iter().position(|entry| entry.name == name)?;
        Some(self.entries.remove(index))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Drop every entry that is already expired. Entries expiring today are
    /// kept. Returns the removed entries.
    pub fn clear_expired(&mut self, today: NaiveDate) -> Vec<PantryEntry> {
        let (expired, kept): (Vec<_>, Vec<_>) = self
            .entries
            .drain(..)
            .partition(|entry| entry.freshness(today) == Freshness::Expired);
        self.entries = kept;
        expired
    }

    /// Entries that are expired or expire today
    pub fn expiring(&self, today: NaiveDate) -> impl Iterator<Item = &PantryEntry> {
        self.entries
            .iter()
            .filter(move |entry| entry.freshness(today).is_expiring())
    }

    /// Names offered by the exclusion selector, one per entry
    pub fn exclusion_options(&self) -> Vec<&str> {
        self.entries.iter().map(PantryEntry::name).collect()
    }
}

impl From<Vec<PantryEntry>> for Pantry {
    fn from(entries: Vec<PantryEntry>) -> Self {
        let mut pantry = Pantry::new();
        for entry in entries {
            pantry.add(entry);
        }
        pantry
    }
}

impl From<Pantry> for Vec<PantryEntry> {
    fn from(pantry: Pantry) -> Self {
        pantry.entries
    }
}
