pub mod fsrs;
pub mod scheduler;
pub mod session;

use std::collections::HashMap;

use crate::core::{
    DictionaryLanguage,
    FavoriteItem,
    KhmineError,
};

pub use scheduler::{
    next_review_state,
    preview_intervals,
    PreviewIntervals,
    ReviewUpdate,
};
pub use session::{
    PendingRate,
    ReviewGameState,
    ReviewItem,
    ReviewSession,
    ReviewStore,
};

/// The study queue for one language: earliest due first, so overdue cards
/// surface at the top.
pub fn filter_by_language_and_sort_by_due(
    favorites: &[FavoriteItem],
    language: DictionaryLanguage,
) -> Vec<FavoriteItem> {
    let mut queue: Vec<FavoriteItem> = favorites
        .iter()
        .filter(|item| item.language == language)
        .cloned()
        .collect();
    queue.sort_by_key(|item| item.due);
    queue
}

/// Pairs every queued card with its fetched description. Strict: a missing
/// description aborts the whole zip, because the study view must not render
/// partially.
pub fn zip_queue_with_descriptions<D: Clone>(
    queue: &[FavoriteItem],
    descriptions: &HashMap<String, D>,
) -> Result<Vec<(FavoriteItem, D)>, KhmineError> {
    queue
        .iter()
        .map(|card| match descriptions.get(&card.word) {
            Some(description) => Ok((card.clone(), description.clone())),
            None => Err(KhmineError::MissingDefinition(card.word.clone())),
        })
        .collect()
}
