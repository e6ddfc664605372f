use log::debug;
use strsim::normalized_levenshtein;

use crate::pantry::normalize_name;

/// Canonical ingredient names offered as corrections
pub const KNOWN_INGREDIENTS: &[&str] = &[
    "broccoli", "carrot", "onion", "potato", "chicken", "cheese", "lettuce", "tomato", "beef",
    "spinach",
];

/// Maximum normalized edit distance (0 = identical, 1 = nothing in common)
/// for a vocabulary entry to be offered as a correction
pub const DEFAULT_THRESHOLD: f64 = 0.4;

/// Outcome of looking up a typed ingredient name
#[derive(Debug, Clone, PartialEq)]
pub enum Suggestion {
    /// Nothing close enough (or the name is already canonical); use it as typed
    Unchanged(String),
    /// A vocabulary entry the user may want instead
    Correction {
        typed: String,
        suggested: String,
        /// Normalized edit distance between the two
        distance: f64,
    },
}

impl Suggestion {
    /// The name to insert if the user accepts the suggestion
    pub fn accepted(&self) -> &str {
        match self {
            Suggestion::Unchanged(name) => name,
            Suggestion::Correction { suggested, .. } => suggested,
        }
    }

    /// The name to insert if the user rejects the suggestion
    pub fn as_typed(&self) -> &str {
        match self {
            Suggestion::Unchanged(name) => name,
            Suggestion::Correction { typed, .. } => typed,
        }
    }

    pub fn is_correction(&self) -> bool {
        matches!(self, Suggestion::Correction { .. })
    }
}

/// Approximate matching of typed names against a fixed vocabulary
#[derive(Debug, Clone)]
pub struct IngredientSuggester {
    vocabulary: Vec<String>,
    threshold: f64,
}

impl Default for IngredientSuggester {
    fn default() -> Self {
        Self::new(KNOWN_INGREDIENTS.iter().copied(), DEFAULT_THRESHOLD)
    }
}

impl IngredientSuggester {
    pub fn new<I, S>(vocabulary: I, threshold: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        IngredientSuggester {
            vocabulary: vocabulary
                .into_iter()
                .map(|name| normalize_name(name.as_ref()))
                .filter(|name| !name.is_empty())
                .collect(),
            threshold: threshold.clamp(0.0, 1.0),
        }
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Find the closest vocabulary entry for `candidate`.
    ///
    /// Ties go to the entry listed first.
    pub fn suggest(&self, candidate: &str) -> Suggestion {
        let typed = normalize_name(candidate);
        if typed.is_empty() {
            return Suggestion::Unchanged(typed);
        }

        let best = self
            .vocabulary
            .iter()
            .map(|known| (known, 1.0 - normalized_levenshtein(&typed, known)))
            .fold(None::<(&String, f64)>, |best, (known, distance)| match best {
                Some((_, best_distance)) if best_distance <= distance => best,
                _ => Some((known, distance)),
            });

        match best {
            Some((known, distance)) if *known != typed && distance <= self.threshold => {
                debug!(
                    "Suggesting '{}' for '{}' (distance {:.2})",
                    known, typed, distance
                );
                Suggestion::Correction {
                    typed,
                    suggested: known.clone(),
                    distance,
                }
            }
            _ => Suggestion::Unchanged(typed),
        }
    }
}
