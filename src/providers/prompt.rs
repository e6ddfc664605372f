use chrono::NaiveDate;
use std::fmt::Write;

use crate::error::FinderError;
use crate::pantry::{Pantry, PantryEntry};

/// The system prompt used when asking a model for recipe ideas.
pub const RECIPE_SUGGESTION_PROMPT: &str = r#"You are a helpful home cook.
Suggest one recipe the user can make, preferring ingredients they already have.
Ingredients marked as expired or nearly expired should be used first when they are
still safe to eat. Reply with a short title, an ingredient list and numbered steps.
Clearly mark any ingredient the user would need to buy."#;

const PANTRY_PHRASES: &[&str] = &["my ingredients", "ingredients i have", "fridge", "pantry"];

/// Message shown when there is nothing to ask about
pub const EMPTY_PANTRY_MESSAGE: &str = "Please add ingredients first!";

/// Does a free-text message refer to the user's own ingredients?
pub fn wants_pantry(message: &str) -> bool {
    let message = message.to_lowercase();
    PANTRY_PHRASES.iter().any(|phrase| message.contains(phrase))
}

/// What is sent to a model for a recipe suggestion
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub message: Option<String>,
    /// Pantry entries to mention, expiring ones first
    pub ingredients: Vec<PantryEntry>,
    pub today: NaiveDate,
}

impl ChatRequest {
    /// Build a request from an optional message and the pantry.
    ///
    /// Without a message the pantry is the whole request, so an empty pantry
    /// is an error. With a message the pantry is attached only when the
    /// message asks about it.
    pub fn new(
        message: Option<&str>,
        pantry: &Pantry,
        today: NaiveDate,
    ) -> Result<Self, FinderError> {
        let message = message
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(String::from);

        let include_pantry = match &message {
            None => {
                if pantry.is_empty() {
                    return Err(FinderError::EmptyChatRequest(EMPTY_PANTRY_MESSAGE.to_string()));
                }
                true
            }
            Some(message) => wants_pantry(message),
        };

        let mut ingredients: Vec<PantryEntry> = if include_pantry {
            pantry.entries().to_vec()
        } else {
            Vec::new()
        };
        ingredients.sort_by_key(|entry| !entry.freshness(today).is_expiring());

        Ok(ChatRequest {
            message,
            ingredients,
            today,
        })
    }

    /// The user turn of the conversation
    pub fn user_message(&self) -> String {
        let mut out = String::new();

        if !self.ingredients.is_empty() {
            out.push_str("Ingredients I have:\n");
            for entry in &self.ingredients {
                let _ = writeln!(
                    out,
                    "- {} (expires {}, {})",
                    entry.name(),
                    entry.expires_on(),
                    entry.freshness(self.today).label().to_lowercase()
                );
            }
        }

        match &self.message {
            Some(message) => {
                if !out.is_empty() {
                    out.push('\n');
                }
                out.push_str(message);
            }
            None => out.push_str("\nWhat can I cook with these?"),
        }

        out
    }
}
